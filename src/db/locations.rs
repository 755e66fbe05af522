//! Location queries, including the reference probes guarding deletion.

use crate::entities::{Asset, AssetTransfer, Location, asset, asset_transfer, location};
use crate::errors::Result;
use sea_orm::{Condition, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use sea_orm::prelude::*;

/// Lists all locations ordered by address.
pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<location::Model>> {
    Location::find()
        .order_by_asc(location::Column::Address)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists locations carrying the given type tag, ordered by address.
pub async fn find_by_type<C: ConnectionTrait>(
    db: &C,
    location_type: &str,
) -> Result<Vec<location::Model>> {
    Location::find()
        .filter(location::Column::LocationType.eq(location_type))
        .order_by_asc(location::Column::Address)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Looks a location up by id.
pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    location_id: i64,
) -> Result<Option<location::Model>> {
    Location::find_by_id(location_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Whether a location with this id exists.
pub async fn exists<C: ConnectionTrait>(db: &C, location_id: i64) -> Result<bool> {
    Ok(find_by_id(db, location_id).await?.is_some())
}

/// Whether any asset currently resides at the location.
pub async fn has_assets<C: ConnectionTrait>(db: &C, location_id: i64) -> Result<bool> {
    let count = Asset::find()
        .filter(asset::Column::CurrentLocationId.eq(location_id))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Whether any ledger entry names the location as source or destination.
pub async fn has_transfers<C: ConnectionTrait>(db: &C, location_id: i64) -> Result<bool> {
    let count = AssetTransfer::find()
        .filter(
            Condition::any()
                .add(asset_transfer::Column::FromLocationId.eq(location_id))
                .add(asset_transfer::Column::ToLocationId.eq(location_id)),
        )
        .count(db)
        .await?;
    Ok(count > 0)
}
