//! Status vocabulary queries.

use crate::entities::{AssetStatus, asset_status};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, prelude::*};

/// Lists the vocabulary ordered by id.
pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<asset_status::Model>> {
    AssetStatus::find()
        .order_by_asc(asset_status::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Looks a status up by id.
pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    status_id: i64,
) -> Result<Option<asset_status::Model>> {
    AssetStatus::find_by_id(status_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Looks a status up by its exact name.
pub async fn find_by_name<C: ConnectionTrait>(
    db: &C,
    name: &str,
) -> Result<Option<asset_status::Model>> {
    AssetStatus::find()
        .filter(asset_status::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Whether a status with this id exists.
pub async fn exists<C: ConnectionTrait>(db: &C, status_id: i64) -> Result<bool> {
    Ok(find_by_id(db, status_id).await?.is_some())
}
