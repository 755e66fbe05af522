//! Employee queries.
//!
//! Views never carry the password hash; the full model (with hash) is only
//! returned by [`find_model_by_email`], which authentication needs.

use crate::entities::{Employee, department, employee};
use crate::errors::Result;
use sea_orm::{
    ConnectionTrait, EntityTrait, FromQueryResult, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, prelude::*,
};
use serde::Serialize;

/// An employee's public profile
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct EmployeeView {
    /// Employee id
    pub id: i64,
    /// Full display name
    pub full_name: String,
    /// Job position
    pub position: String,
    /// Login email
    pub email: String,
    /// Role tag
    pub role: String,
    /// Department id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<i64>,
    /// Department name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

fn view_query() -> Select<Employee> {
    Employee::find()
        .select_only()
        .columns([
            employee::Column::Id,
            employee::Column::FullName,
            employee::Column::Position,
            employee::Column::Email,
            employee::Column::Role,
            employee::Column::DepartmentId,
        ])
        .column_as(department::Column::Name, "department")
        .join(JoinType::LeftJoin, employee::Relation::Department.def())
        .order_by_asc(employee::Column::FullName)
}

/// Lists all employees ordered by name.
pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<EmployeeView>> {
    view_query()
        .into_model::<EmployeeView>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Looks an employee's profile up by id.
pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    employee_id: i64,
) -> Result<Option<EmployeeView>> {
    view_query()
        .filter(employee::Column::Id.eq(employee_id))
        .into_model::<EmployeeView>()
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists the employees assigned to a department.
pub async fn find_by_department<C: ConnectionTrait>(
    db: &C,
    department_id: i64,
) -> Result<Vec<EmployeeView>> {
    view_query()
        .filter(employee::Column::DepartmentId.eq(department_id))
        .into_model::<EmployeeView>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Loads the stored row, hash included, for the given email.
pub async fn find_model_by_email<C: ConnectionTrait>(
    db: &C,
    email: &str,
) -> Result<Option<employee::Model>> {
    Employee::find()
        .filter(employee::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Whether an employee with this id exists.
pub async fn exists<C: ConnectionTrait>(db: &C, employee_id: i64) -> Result<bool> {
    let count = Employee::find_by_id(employee_id).count(db).await?;
    Ok(count > 0)
}
