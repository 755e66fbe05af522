//! Employee business logic.
//!
//! Registration and profile updates enforce unique emails and a valid department.
//! An employee heading a department cannot be removed until the headship moves.

use crate::{
    core::auth::hash_password,
    db::{self, EmployeeView, TransferView},
    entities::employee::{self, DEFAULT_ROLE},
    errors::{EmployeeError, Error, Result},
};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait, Set,
    TransactionTrait,
};
use serde::Deserialize;
use tracing::{info, instrument, warn};

/// Fields accepted when registering an employee
#[derive(Clone, Deserialize)]
pub struct NewEmployee {
    /// Full display name
    pub full_name: String,
    /// Job position
    #[serde(default)]
    pub position: String,
    /// Login email
    pub email: String,
    /// Plaintext password, hashed before storage
    pub password: String,
    /// Role tag, defaults to [`DEFAULT_ROLE`]
    #[serde(default)]
    pub role: Option<String>,
    /// Department to join
    #[serde(default)]
    pub department_id: Option<i64>,
}

/// Fields accepted when updating an employee's profile
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeUpdate {
    /// Full display name
    pub full_name: String,
    /// Job position
    #[serde(default)]
    pub position: String,
    /// Login email
    pub email: String,
    /// New role tag; the current role is kept when absent
    #[serde(default)]
    pub role: Option<String>,
    /// Department to belong to; `None` detaches the employee
    #[serde(default)]
    pub department_id: Option<i64>,
}

fn validate_profile(full_name: &str, email: &str) -> Result<()> {
    if full_name.trim().is_empty() {
        return Err(Error::invalid_input("Employee name cannot be empty"));
    }
    if !email.contains('@') {
        return Err(Error::invalid_input(format!("Invalid email address: {email}")));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(Error::invalid_input("Password cannot be empty"));
    }
    Ok(())
}

async fn check_department<C: ConnectionTrait>(db: &C, department_id: Option<i64>) -> Result<()> {
    if let Some(id) = department_id {
        if !db::departments::exists(db, id).await? {
            return Err(EmployeeError::DepartmentNotFound { id }.into());
        }
    }
    Ok(())
}

/// Checks that no employee other than `own_id` uses the email.
async fn check_email_free<C: ConnectionTrait>(
    db: &C,
    email: &str,
    own_id: Option<i64>,
) -> Result<()> {
    if let Some(existing) = db::employees::find_model_by_email(db, email).await? {
        if Some(existing.id) != own_id {
            return Err(EmployeeError::EmailAlreadyExists {
                email: email.to_string(),
            }
            .into());
        }
    }
    Ok(())
}

async fn find_model<C: ConnectionTrait>(db: &C, employee_id: i64) -> Result<employee::Model> {
    employee::Entity::find_by_id(employee_id)
        .one(db)
        .await?
        .ok_or_else(|| EmployeeError::NotFound { id: employee_id }.into())
}

/// Lists all employees ordered by name.
pub async fn list_employees(db: &DatabaseConnection) -> Result<Vec<EmployeeView>> {
    db::employees::find_all(db).await
}

/// Retrieves one employee's profile.
pub async fn get_employee(db: &DatabaseConnection, employee_id: i64) -> Result<EmployeeView> {
    db::employees::find_by_id(db, employee_id)
        .await?
        .ok_or_else(|| EmployeeError::NotFound { id: employee_id }.into())
}

/// Registers a new employee.
///
/// # Errors
/// Returns an error if:
/// - The name, email or password is blank or malformed
/// - The department does not exist
/// - The email is already taken
#[instrument(skip(db, input), fields(email = %input.email))]
pub async fn create_employee(
    db: &DatabaseConnection,
    input: NewEmployee,
) -> Result<EmployeeView> {
    let email = input.email.trim().to_string();
    validate_profile(&input.full_name, &email)?;
    validate_password(&input.password)?;

    let txn = db.begin().await?;
    check_department(&txn, input.department_id).await?;
    if let Err(e) = check_email_free(&txn, &email, None).await {
        warn!("Registration with an email already in use");
        return Err(e);
    }

    let role = input
        .role
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| DEFAULT_ROLE.to_string());

    let employee = employee::ActiveModel {
        full_name: Set(input.full_name.trim().to_string()),
        position: Set(input.position.trim().to_string()),
        email: Set(email),
        password_hash: Set(hash_password(&input.password)?),
        role: Set(role),
        department_id: Set(input.department_id),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let view = db::employees::find_by_id(&txn, employee.id)
        .await?
        .ok_or(EmployeeError::NotFound { id: employee.id })?;
    txn.commit().await?;

    info!(employee_id = view.id, "Registered employee");
    Ok(view)
}

/// Updates an employee's profile. The stored password is left untouched.
///
/// # Errors
/// Returns an error if:
/// - The employee or the department does not exist
/// - The email belongs to a different employee
#[instrument(skip(db, input))]
pub async fn update_employee(
    db: &DatabaseConnection,
    employee_id: i64,
    input: EmployeeUpdate,
) -> Result<EmployeeView> {
    let email = input.email.trim().to_string();
    validate_profile(&input.full_name, &email)?;

    let txn = db.begin().await?;
    let current = find_model(&txn, employee_id).await?;
    check_department(&txn, input.department_id).await?;
    check_email_free(&txn, &email, Some(employee_id)).await?;

    let role = input
        .role
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| current.role.clone());

    let mut employee: employee::ActiveModel = current.into();
    employee.full_name = Set(input.full_name.trim().to_string());
    employee.position = Set(input.position.trim().to_string());
    employee.email = Set(email);
    employee.role = Set(role);
    employee.department_id = Set(input.department_id);
    employee.update(&txn).await?;

    let view = db::employees::find_by_id(&txn, employee_id)
        .await?
        .ok_or(EmployeeError::NotFound { id: employee_id })?;
    txn.commit().await?;

    Ok(view)
}

/// Replaces an employee's password.
#[instrument(skip(db, new_password))]
pub async fn change_password(
    db: &DatabaseConnection,
    employee_id: i64,
    new_password: &str,
) -> Result<()> {
    validate_password(new_password)?;

    let txn = db.begin().await?;
    let mut employee: employee::ActiveModel = find_model(&txn, employee_id).await?.into();
    employee.password_hash = Set(hash_password(new_password)?);
    employee.update(&txn).await?;
    txn.commit().await?;

    info!(employee_id, "Password changed");
    Ok(())
}

/// Deletes an employee.
///
/// # Errors
/// Returns `EmployeeError::IsDepartmentHead` while the employee heads a department,
/// then `EmployeeError::HasTransfers` if the ledger names the employee.
#[instrument(skip(db))]
pub async fn delete_employee(db: &DatabaseConnection, employee_id: i64) -> Result<()> {
    let txn = db.begin().await?;
    let employee = find_model(&txn, employee_id).await?;

    if db::departments::is_department_head(&txn, employee_id).await? {
        return Err(EmployeeError::IsDepartmentHead { id: employee_id }.into());
    }
    if db::transfers::exists_for_employee(&txn, employee_id).await? {
        return Err(EmployeeError::HasTransfers { id: employee_id }.into());
    }

    employee.delete(&txn).await?;
    txn.commit().await?;

    info!(employee_id, "Deleted employee");
    Ok(())
}

/// Lists the transfers an employee performed, newest first.
pub async fn list_employee_transfers(
    db: &DatabaseConnection,
    employee_id: i64,
) -> Result<Vec<TransferView>> {
    if !db::employees::exists(db, employee_id).await? {
        return Err(EmployeeError::NotFound { id: employee_id }.into());
    }
    db::transfers::find_by_employee(db, employee_id).await
}
