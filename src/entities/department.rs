//! Department entity - An organizational unit with an optional head employee.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Department database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    /// Unique identifier for the department
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Department name
    pub name: String,
    /// Physical location text (not a reference to `locations`)
    pub location: String,
    /// Employee heading the department, if any
    pub head_id: Option<i64>,
}

/// Defines relationships between Department and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Employees assigned to this department
    #[sea_orm(has_many = "super::employee::Entity")]
    Employees,
    /// Assets owned by this department
    #[sea_orm(has_many = "super::asset::Entity")]
    Assets,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employees.def()
    }
}

impl Related<super::asset::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assets.def()
    }
}

/// Join from a department to its head employee.
///
/// Kept out of [`Relation`] so no foreign key is generated for `head_id`: employees
/// already reference departments, and a key in both directions would make table
/// creation order cyclic.
#[must_use]
pub fn head_relation() -> RelationDef {
    Entity::belongs_to(super::employee::Entity)
        .from(Column::HeadId)
        .to(super::employee::Column::Id)
        .into()
}

impl ActiveModelBehavior for ActiveModel {}
