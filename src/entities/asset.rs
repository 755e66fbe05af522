//! Asset entity - A piece of tracked equipment.
//!
//! `current_location_id` is denormalized: it mirrors the destination of the asset's
//! latest transfer (or its initial placement) and is kept in sync by
//! [`crate::core::transfer::create_transfer`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Asset database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "assets")]
pub struct Model {
    /// Unique identifier for the asset
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Asset name (e.g., "ThinkPad T14")
    pub name: String,
    /// Free-form category (e.g., "laptop", "furniture")
    pub category: String,
    /// Date the asset was acquired
    pub acquisition_date: Date,
    /// Acquisition cost
    pub cost: f64,
    /// Current status, from the status vocabulary
    pub status_id: i64,
    /// Where the asset currently is
    pub current_location_id: i64,
    /// Owning department, if any
    pub department_id: Option<i64>,
}

/// Defines relationships between Asset and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each asset has one status
    #[sea_orm(
        belongs_to = "super::asset_status::Entity",
        from = "Column::StatusId",
        to = "super::asset_status::Column::Id",
        on_delete = "Restrict"
    )]
    Status,
    /// Each asset resides at one location
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::CurrentLocationId",
        to = "super::location::Column::Id",
        on_delete = "Restrict"
    )]
    Location,
    /// Each asset is optionally owned by a department
    #[sea_orm(
        belongs_to = "super::department::Entity",
        from = "Column::DepartmentId",
        to = "super::department::Column::Id",
        on_delete = "SetNull"
    )]
    Department,
    /// Ledger entries recording this asset's moves
    #[sea_orm(has_many = "super::asset_transfer::Entity")]
    Transfers,
}

impl Related<super::asset_status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Status.def()
    }
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::asset_transfer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transfers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
