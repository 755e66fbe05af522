//! Employee entity - A person who can authenticate and perform transfers.
//!
//! The password is only ever stored as a salted one-way hash and is never
//! serialized outward.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Default role tag for newly registered employees
pub const DEFAULT_ROLE: &str = "employee";

/// Employee database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    /// Unique identifier for the employee
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Full display name
    pub full_name: String,
    /// Job position
    pub position: String,
    /// Login email, unique across employees
    #[sea_orm(unique)]
    pub email: String,
    /// PHC-formatted argon2 hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Role tag carried in issued tokens
    pub role: String,
    /// Department the employee belongs to, if any
    pub department_id: Option<i64>,
}

/// Defines relationships between Employee and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each employee optionally belongs to one department
    #[sea_orm(
        belongs_to = "super::department::Entity",
        from = "Column::DepartmentId",
        to = "super::department::Column::Id",
        on_delete = "Restrict"
    )]
    Department,
    /// Transfers this employee performed
    #[sea_orm(has_many = "super::asset_transfer::Entity")]
    Transfers,
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
