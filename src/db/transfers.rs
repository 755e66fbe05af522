//! Transfer ledger queries.
//!
//! The ledger is append-only: besides reads there is a single insert, used by the
//! transfer workflow inside its transaction. Every listing is newest first.

use crate::entities::{AssetTransfer, asset, asset_transfer, employee, location};
use crate::errors::Result;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Alias, IntoColumnRef, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, Condition, ConnectionTrait, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, prelude::*,
};
use serde::Serialize;

const SOURCE_ALIAS: &str = "source_location";
const DESTINATION_ALIAS: &str = "destination_location";

/// A ledger entry with asset, employee and both locations resolved
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct TransferView {
    /// Transfer id
    pub id: i64,
    /// Asset id, absent once the asset has been deleted
    pub asset_id: Option<i64>,
    /// Asset name, absent once the asset has been deleted
    pub asset_name: Option<String>,
    /// Employee id
    pub employee_id: i64,
    /// Employee full name
    pub employee_name: String,
    /// Source location id
    pub from_location_id: i64,
    /// Source address
    pub from_location: String,
    /// Destination location id
    pub to_location_id: i64,
    /// Destination address
    pub to_location: String,
    /// When the move happened
    pub transfer_date: DateTime<Utc>,
    /// Free-text note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Values for one new ledger entry
#[derive(Debug, Clone)]
pub struct NewLedgerEntry {
    /// Asset id
    pub asset_id: i64,
    /// Employee id
    pub employee_id: i64,
    /// Source location id
    pub from_location_id: i64,
    /// Destination location id
    pub to_location_id: i64,
    /// When the move happened
    pub transfer_date: DateTime<Utc>,
    /// Free-text note
    pub notes: Option<String>,
}

fn address_of(alias: &str) -> SimpleExpr {
    SimpleExpr::Column((Alias::new(alias), location::Column::Address).into_column_ref())
}

fn view_query() -> Select<AssetTransfer> {
    AssetTransfer::find()
        .select_only()
        .columns([
            asset_transfer::Column::Id,
            asset_transfer::Column::AssetId,
            asset_transfer::Column::EmployeeId,
            asset_transfer::Column::FromLocationId,
            asset_transfer::Column::ToLocationId,
            asset_transfer::Column::TransferDate,
            asset_transfer::Column::Notes,
        ])
        .column_as(asset::Column::Name, "asset_name")
        .column_as(employee::Column::FullName, "employee_name")
        .column_as(address_of(SOURCE_ALIAS), "from_location")
        .column_as(address_of(DESTINATION_ALIAS), "to_location")
        .join(JoinType::LeftJoin, asset_transfer::Relation::Asset.def())
        .join(JoinType::InnerJoin, asset_transfer::Relation::Employee.def())
        .join_as(
            JoinType::InnerJoin,
            asset_transfer::Relation::FromLocation.def(),
            Alias::new(SOURCE_ALIAS),
        )
        .join_as(
            JoinType::InnerJoin,
            asset_transfer::Relation::ToLocation.def(),
            Alias::new(DESTINATION_ALIAS),
        )
        .order_by_desc(asset_transfer::Column::TransferDate)
        .order_by_desc(asset_transfer::Column::Id)
}

async fn fetch_all<C: ConnectionTrait>(db: &C, query: Select<AssetTransfer>) -> Result<Vec<TransferView>> {
    query
        .into_model::<TransferView>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Appends one entry to the ledger.
pub async fn insert<C: ConnectionTrait>(
    db: &C,
    entry: NewLedgerEntry,
) -> Result<asset_transfer::Model> {
    let model = asset_transfer::ActiveModel {
        asset_id: Set(Some(entry.asset_id)),
        employee_id: Set(entry.employee_id),
        from_location_id: Set(entry.from_location_id),
        to_location_id: Set(entry.to_location_id),
        transfer_date: Set(entry.transfer_date),
        notes: Set(entry.notes),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Lists the whole ledger.
pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<TransferView>> {
    fetch_all(db, view_query()).await
}

/// Looks one entry up by id.
pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    transfer_id: i64,
) -> Result<Option<TransferView>> {
    view_query()
        .filter(asset_transfer::Column::Id.eq(transfer_id))
        .into_model::<TransferView>()
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists the moves of one asset.
pub async fn find_by_asset<C: ConnectionTrait>(db: &C, asset_id: i64) -> Result<Vec<TransferView>> {
    fetch_all(
        db,
        view_query().filter(asset_transfer::Column::AssetId.eq(asset_id)),
    )
    .await
}

/// Lists the moves performed by one employee.
pub async fn find_by_employee<C: ConnectionTrait>(
    db: &C,
    employee_id: i64,
) -> Result<Vec<TransferView>> {
    fetch_all(
        db,
        view_query().filter(asset_transfer::Column::EmployeeId.eq(employee_id)),
    )
    .await
}

/// Whether the employee performed any recorded move.
pub async fn exists_for_employee<C: ConnectionTrait>(db: &C, employee_id: i64) -> Result<bool> {
    let count = AssetTransfer::find()
        .filter(asset_transfer::Column::EmployeeId.eq(employee_id))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Lists the moves into or out of one location.
pub async fn find_by_location<C: ConnectionTrait>(
    db: &C,
    location_id: i64,
) -> Result<Vec<TransferView>> {
    fetch_all(
        db,
        view_query().filter(
            Condition::any()
                .add(asset_transfer::Column::FromLocationId.eq(location_id))
                .add(asset_transfer::Column::ToLocationId.eq(location_id)),
        ),
    )
    .await
}

/// Lists the moves dated within `[from, to]`, keeping at most `limit` entries when given.
pub async fn find_between<C: ConnectionTrait>(
    db: &C,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    limit: Option<u64>,
) -> Result<Vec<TransferView>> {
    let query = view_query()
        .filter(asset_transfer::Column::TransferDate.gte(from))
        .filter(asset_transfer::Column::TransferDate.lte(to));
    let query = match limit {
        Some(limit) => query.limit(limit),
        None => query,
    };
    fetch_all(db, query).await
}
