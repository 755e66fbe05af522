//! Asset transfer entity - One append-only entry in the transfer ledger.
//!
//! Each row records that an employee moved an asset from one location to another
//! at a given time. Rows are never updated or deleted by the application.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Asset transfer database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "asset_transfers")]
pub struct Model {
    /// Unique identifier for the transfer
    #[sea_orm(primary_key)]
    pub id: i64,
    /// The asset that moved; cleared when the asset is deleted
    pub asset_id: Option<i64>,
    /// Employee who performed or authorized the move
    pub employee_id: i64,
    /// Where the asset was
    pub from_location_id: i64,
    /// Where the asset went
    pub to_location_id: i64,
    /// When the move happened
    pub transfer_date: DateTimeUtc,
    /// Optional free-text note
    pub notes: Option<String>,
}

/// Defines relationships between `AssetTransfer` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The moved asset; ledger rows outlive it
    #[sea_orm(
        belongs_to = "super::asset::Entity",
        from = "Column::AssetId",
        to = "super::asset::Column::Id",
        on_delete = "SetNull"
    )]
    Asset,
    /// The employee responsible for the move
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id",
        on_delete = "Restrict"
    )]
    Employee,
    /// Source location
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::FromLocationId",
        to = "super::location::Column::Id",
        on_delete = "Restrict"
    )]
    FromLocation,
    /// Destination location
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::ToLocationId",
        to = "super::location::Column::Id",
        on_delete = "Restrict"
    )]
    ToLocation,
}

impl Related<super::asset::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Asset.def()
    }
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
