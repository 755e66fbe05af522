//! Asset queries.
//!
//! Reads join the status vocabulary, the current location and the owning department
//! so callers see display names next to the raw references.

use crate::entities::{Asset, asset, asset_status, department, location};
use crate::errors::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ConnectionTrait, EntityTrait, FromQueryResult, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, prelude::*,
};
use serde::Serialize;

/// An asset with its references resolved to display names
#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize)]
pub struct AssetView {
    /// Asset id
    pub id: i64,
    /// Asset name
    pub name: String,
    /// Category
    pub category: String,
    /// Acquisition date
    pub acquisition_date: Date,
    /// Acquisition cost
    pub cost: f64,
    /// Status id
    pub status_id: i64,
    /// Status name
    pub status: String,
    /// Current location id
    pub current_location_id: i64,
    /// Current location address
    pub location: String,
    /// Owning department id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<i64>,
    /// Owning department name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

/// Narrows an asset listing to one reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetFilter {
    /// Every asset
    All,
    /// Assets in the given status
    Status(i64),
    /// Assets currently at the given location
    Location(i64),
    /// Assets owned by the given department
    Department(i64),
}

fn view_query() -> Select<Asset> {
    Asset::find()
        .select_only()
        .columns([
            asset::Column::Id,
            asset::Column::Name,
            asset::Column::Category,
            asset::Column::AcquisitionDate,
            asset::Column::Cost,
            asset::Column::StatusId,
            asset::Column::CurrentLocationId,
            asset::Column::DepartmentId,
        ])
        .column_as(asset_status::Column::Name, "status")
        .column_as(location::Column::Address, "location")
        .column_as(department::Column::Name, "department")
        .join(JoinType::InnerJoin, asset::Relation::Status.def())
        .join(JoinType::InnerJoin, asset::Relation::Location.def())
        .join(JoinType::LeftJoin, asset::Relation::Department.def())
        .order_by_asc(asset::Column::Name)
        .order_by_asc(asset::Column::Id)
}

/// Lists assets ordered by name, narrowed by `filter`.
pub async fn find_all<C: ConnectionTrait>(db: &C, filter: AssetFilter) -> Result<Vec<AssetView>> {
    let query = match filter {
        AssetFilter::All => view_query(),
        AssetFilter::Status(id) => view_query().filter(asset::Column::StatusId.eq(id)),
        AssetFilter::Location(id) => view_query().filter(asset::Column::CurrentLocationId.eq(id)),
        AssetFilter::Department(id) => view_query().filter(asset::Column::DepartmentId.eq(id)),
    };
    query
        .into_model::<AssetView>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Looks an asset up by id with display names resolved.
pub async fn find_by_id<C: ConnectionTrait>(db: &C, asset_id: i64) -> Result<Option<AssetView>> {
    view_query()
        .filter(asset::Column::Id.eq(asset_id))
        .into_model::<AssetView>()
        .one(db)
        .await
        .map_err(Into::into)
}

/// Loads the stored asset row.
pub async fn find_model_by_id<C: ConnectionTrait>(
    db: &C,
    asset_id: i64,
) -> Result<Option<asset::Model>> {
    Asset::find_by_id(asset_id).one(db).await.map_err(Into::into)
}

/// Whether an asset with this id exists.
pub async fn exists<C: ConnectionTrait>(db: &C, asset_id: i64) -> Result<bool> {
    let count = Asset::find_by_id(asset_id).count(db).await?;
    Ok(count > 0)
}

/// Points the asset's current location at `location_id`.
///
/// Returns the number of rows touched (0 when the asset does not exist).
pub async fn update_location<C: ConnectionTrait>(
    db: &C,
    asset_id: i64,
    location_id: i64,
) -> Result<u64> {
    let result = Asset::update_many()
        .col_expr(asset::Column::CurrentLocationId, Expr::value(location_id))
        .filter(asset::Column::Id.eq(asset_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Sets the asset's status. Returns the number of rows touched.
pub async fn update_status<C: ConnectionTrait>(db: &C, asset_id: i64, status_id: i64) -> Result<u64> {
    let result = Asset::update_many()
        .col_expr(asset::Column::StatusId, Expr::value(status_id))
        .filter(asset::Column::Id.eq(asset_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
