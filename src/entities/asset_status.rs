//! Asset status entity - the fixed vocabulary an asset's status is drawn from.
//!
//! Rows are seeded at startup and are read-only from the application's perspective.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Asset status database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "asset_statuses")]
pub struct Model {
    /// Unique identifier for the status
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Status name (e.g., "in-use", "under-repair")
    #[sea_orm(unique)]
    pub name: String,
}

/// Defines relationships between `AssetStatus` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One status is shared by many assets
    #[sea_orm(has_many = "super::asset::Entity")]
    Assets,
}

impl Related<super::asset::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
