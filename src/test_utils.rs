//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        asset::{self, AssetInput},
        department::{self, DepartmentInput},
        employee::{self, NewEmployee},
        location::{self, LocationInput},
        status,
        transfer::{self, NewTransfer},
    },
    db::{AssetView, EmployeeView},
    entities,
    errors::Result,
};
use chrono::{Duration, NaiveDate, Utc};
use sea_orm::DatabaseConnection;

/// Password given to every employee created by [`create_test_employee`]
pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Routes `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

/// Creates a test location of type "office".
pub async fn create_test_location(
    db: &DatabaseConnection,
    address: &str,
) -> Result<entities::location::Model> {
    create_custom_location(db, address, "office").await
}

/// Creates a test location with a custom type.
pub async fn create_custom_location(
    db: &DatabaseConnection,
    address: &str,
    location_type: &str,
) -> Result<entities::location::Model> {
    location::create_location(
        db,
        LocationInput {
            address: address.to_string(),
            location_type: location_type.to_string(),
        },
    )
    .await
}

/// Creates a headless test department.
pub async fn create_test_department(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::department::Model> {
    department::create_department(
        db,
        DepartmentInput {
            name: name.to_string(),
            location: "Building A".to_string(),
            head_id: None,
        },
    )
    .await
}

/// Creates a test employee named "Test Employee" with [`TEST_PASSWORD`].
pub async fn create_test_employee(
    db: &DatabaseConnection,
    email: &str,
    department_id: Option<i64>,
) -> Result<EmployeeView> {
    employee::create_employee(
        db,
        NewEmployee {
            full_name: "Test Employee".to_string(),
            position: "Technician".to_string(),
            email: email.to_string(),
            password: TEST_PASSWORD.to_string(),
            role: None,
            department_id,
        },
    )
    .await
}

/// A small, fully linked inventory.
///
/// # Contents
/// * statuses `in-use` and `in-stock`
/// * locations `office`, `warehouse` and `depot`
/// * department "IT" with one employee
/// * `laptop`: in use at the office, owned by IT, cost 1200.0
pub struct Inventory {
    /// Database holding the fixture
    pub db: DatabaseConnection,
    /// The "in-use" status
    pub in_use: entities::asset_status::Model,
    /// The "in-stock" status
    pub in_stock: entities::asset_status::Model,
    /// Where the laptop starts
    pub office: entities::location::Model,
    /// Second location
    pub warehouse: entities::location::Model,
    /// Third location
    pub depot: entities::location::Model,
    /// Department "IT"
    pub department: entities::department::Model,
    /// Employee in IT
    pub employee: EmployeeView,
    /// The one asset
    pub laptop: AssetView,
}

/// Builds an [`Inventory`] in a fresh in-memory database.
pub async fn setup_inventory() -> Result<Inventory> {
    let db = setup_test_db().await?;
    status::seed_statuses(&db, &["in-use".to_string(), "in-stock".to_string()]).await?;
    let in_use = status::get_status_by_name(&db, "in-use").await?;
    let in_stock = status::get_status_by_name(&db, "in-stock").await?;

    let office = create_test_location(&db, "1 Office Park").await?;
    let warehouse = create_custom_location(&db, "2 Dock Road", "warehouse").await?;
    let depot = create_custom_location(&db, "3 Rail Yard", "warehouse").await?;

    let department = create_test_department(&db, "IT").await?;
    let employee = create_test_employee(&db, "tech@example.com", Some(department.id)).await?;

    let laptop = asset::create_asset(
        &db,
        AssetInput {
            name: "Laptop".to_string(),
            category: "computer".to_string(),
            acquisition_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap_or_default(),
            cost: 1200.0,
            status_id: in_use.id,
            current_location_id: office.id,
            department_id: Some(department.id),
        },
    )
    .await?;

    Ok(Inventory {
        db,
        in_use,
        in_stock,
        office,
        warehouse,
        depot,
        department,
        employee,
        laptop,
    })
}

/// Transfers the fixture laptop, dated one hour ago.
pub async fn move_asset(
    fixture: &Inventory,
    from_location_id: i64,
    to_location_id: i64,
) -> Result<entities::asset_transfer::Model> {
    transfer::create_transfer(
        &fixture.db,
        NewTransfer {
            asset_id: fixture.laptop.id,
            employee_id: fixture.employee.id,
            from_location_id,
            to_location_id,
            transfer_date: Utc::now() - Duration::hours(1),
            notes: None,
        },
    )
    .await
}
