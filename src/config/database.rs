//! Database configuration module.
//!
//! This module handles the store connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust models
//! without hand-written DDL. Creation order follows the foreign keys: statuses and
//! locations first, the transfer ledger last.

use crate::config::settings::DatabaseSettings;
use crate::entities::{Asset, AssetStatus, AssetTransfer, Department, Employee, Location};
use crate::errors::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info};

/// Builds the connection URL from the configured parameters.
///
/// An explicit `DATABASE_URL` wins over the individual host/port/credential
/// settings, which lets local runs point at `SQLite` instead of Postgres.
#[must_use]
pub fn get_database_url(settings: &DatabaseSettings) -> String {
    settings.url.clone().unwrap_or_else(|| {
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            settings.user,
            settings.password,
            settings.host,
            settings.port,
            settings.name,
            settings.ssl_mode
        )
    })
}

/// Establishes a connection pool to the configured store.
pub async fn create_connection(settings: &DatabaseSettings) -> Result<DatabaseConnection> {
    let database_url = get_database_url(settings);
    let mut options = ConnectOptions::new(database_url);
    options.sqlx_logging(false);

    debug!(host = %settings.host, name = %settings.name, "Connecting to database");
    Database::connect(options).await.map_err(Into::into)
}

/// Creates all necessary tables using `SeaORM`'s schema generation from entity definitions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let tables = [
        schema.create_table_from_entity(AssetStatus),
        schema.create_table_from_entity(Location),
        schema.create_table_from_entity(Department),
        schema.create_table_from_entity(Employee),
        schema.create_table_from_entity(Asset),
        schema.create_table_from_entity(AssetTransfer),
    ];

    for mut table in tables {
        table.if_not_exists();
        db.execute(builder.build(&table)).await?;
    }

    info!("Database tables ensured.");
    Ok(())
}
