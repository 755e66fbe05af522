//! Department business logic.

use crate::{
    db::{self, DepartmentView, EmployeeView},
    entities::department,
    errors::{DepartmentError, Error, Result},
};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait, Set,
    TransactionTrait,
};
use serde::Deserialize;
use tracing::{info, instrument};

/// Fields accepted when creating or updating a department
#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentInput {
    /// Department name
    pub name: String,
    /// Physical location, as free text
    #[serde(default)]
    pub location: String,
    /// Head employee, if any
    #[serde(default)]
    pub head_id: Option<i64>,
}

fn validate_input(input: &DepartmentInput) -> Result<()> {
    if input.name.trim().is_empty() {
        return Err(Error::invalid_input("Department name cannot be empty"));
    }
    Ok(())
}

async fn check_head<C: ConnectionTrait>(db: &C, head_id: Option<i64>) -> Result<()> {
    if let Some(employee_id) = head_id {
        if !db::employees::exists(db, employee_id).await? {
            return Err(DepartmentError::EmployeeNotFound { employee_id }.into());
        }
    }
    Ok(())
}

/// Lists departments ordered by name, with the head's name resolved.
pub async fn list_departments(db: &DatabaseConnection) -> Result<Vec<DepartmentView>> {
    db::departments::find_all(db).await
}

/// Retrieves one department.
pub async fn get_department(db: &DatabaseConnection, department_id: i64) -> Result<DepartmentView> {
    db::departments::find_by_id(db, department_id)
        .await?
        .ok_or_else(|| DepartmentError::NotFound { id: department_id }.into())
}

/// Creates a department.
///
/// # Errors
/// Returns `DepartmentError::EmployeeNotFound` if a head is named that does not exist.
#[instrument(skip(db, input), fields(name = %input.name))]
pub async fn create_department(
    db: &DatabaseConnection,
    input: DepartmentInput,
) -> Result<department::Model> {
    validate_input(&input)?;

    let txn = db.begin().await?;
    check_head(&txn, input.head_id).await?;

    let department = department::ActiveModel {
        name: Set(input.name.trim().to_string()),
        location: Set(input.location.trim().to_string()),
        head_id: Set(input.head_id),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    info!(department_id = department.id, "Created department");
    Ok(department)
}

/// Replaces a department's name, location and head.
///
/// # Errors
/// Returns an error if:
/// - The department does not exist
/// - A head is named that does not exist
#[instrument(skip(db, input))]
pub async fn update_department(
    db: &DatabaseConnection,
    department_id: i64,
    input: DepartmentInput,
) -> Result<department::Model> {
    validate_input(&input)?;

    let txn = db.begin().await?;
    let mut department: department::ActiveModel = department::Entity::find_by_id(department_id)
        .one(&txn)
        .await?
        .ok_or(DepartmentError::NotFound { id: department_id })?
        .into();
    check_head(&txn, input.head_id).await?;

    department.name = Set(input.name.trim().to_string());
    department.location = Set(input.location.trim().to_string());
    department.head_id = Set(input.head_id);
    let updated = department.update(&txn).await?;
    txn.commit().await?;

    Ok(updated)
}

/// Deletes a department with no assigned employees.
///
/// Assets owned by the department lose their owner rather than blocking the delete.
///
/// # Errors
/// Returns `DepartmentError::HasEmployees` while any employee is assigned.
#[instrument(skip(db))]
pub async fn delete_department(db: &DatabaseConnection, department_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let department = department::Entity::find_by_id(department_id)
        .one(&txn)
        .await?
        .ok_or(DepartmentError::NotFound { id: department_id })?;

    if db::departments::has_employees(&txn, department_id).await? {
        return Err(DepartmentError::HasEmployees { id: department_id }.into());
    }

    department.delete(&txn).await?;
    txn.commit().await?;

    info!(department_id, "Deleted department");
    Ok(())
}

/// Lists the employees assigned to a department.
pub async fn list_department_employees(
    db: &DatabaseConnection,
    department_id: i64,
) -> Result<Vec<EmployeeView>> {
    if !db::departments::exists(db, department_id).await? {
        return Err(DepartmentError::NotFound { id: department_id }.into());
    }
    db::employees::find_by_department(db, department_id).await
}
