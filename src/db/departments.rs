//! Department queries. Reads resolve the head employee's name through a join.

use crate::entities::{Department, Employee, department, employee};
use crate::errors::Result;
use sea_orm::{
    ConnectionTrait, EntityTrait, FromQueryResult, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, prelude::*,
};
use serde::Serialize;

/// A department as presented to callers
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct DepartmentView {
    /// Department id
    pub id: i64,
    /// Department name
    pub name: String,
    /// Physical location text
    pub location: String,
    /// Head employee id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_id: Option<i64>,
    /// Head employee's full name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_name: Option<String>,
}

fn view_query() -> Select<Department> {
    Department::find()
        .select_only()
        .columns([
            department::Column::Id,
            department::Column::Name,
            department::Column::Location,
            department::Column::HeadId,
        ])
        .column_as(employee::Column::FullName, "head_name")
        .join(JoinType::LeftJoin, department::head_relation())
        .order_by_asc(department::Column::Name)
}

/// Lists all departments ordered by name.
pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<DepartmentView>> {
    view_query()
        .into_model::<DepartmentView>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Looks a department up by id.
pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    department_id: i64,
) -> Result<Option<DepartmentView>> {
    view_query()
        .filter(department::Column::Id.eq(department_id))
        .into_model::<DepartmentView>()
        .one(db)
        .await
        .map_err(Into::into)
}

/// Whether a department with this id exists.
pub async fn exists<C: ConnectionTrait>(db: &C, department_id: i64) -> Result<bool> {
    let count = Department::find_by_id(department_id).count(db).await?;
    Ok(count > 0)
}

/// Whether any employee is currently assigned to the department.
pub async fn has_employees<C: ConnectionTrait>(db: &C, department_id: i64) -> Result<bool> {
    let count = Employee::find()
        .filter(employee::Column::DepartmentId.eq(department_id))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Whether the employee heads any department.
pub async fn is_department_head<C: ConnectionTrait>(db: &C, employee_id: i64) -> Result<bool> {
    let count = Department::find()
        .filter(department::Column::HeadId.eq(employee_id))
        .count(db)
        .await?;
    Ok(count > 0)
}
