//! Location business logic.
//!
//! Locations are simple records, but deleting one is guarded: a location that still
//! holds assets, or that appears anywhere in the transfer ledger, is permanent.

use crate::{
    db::{self, TransferView},
    entities::location,
    errors::{Error, LocationError, Result},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, ModelTrait, Set, TransactionTrait};
use serde::Deserialize;
use tracing::{info, instrument};

/// Fields accepted when creating or updating a location
#[derive(Debug, Clone, Deserialize)]
pub struct LocationInput {
    /// Street address or other description
    pub address: String,
    /// Free-form type tag
    #[serde(rename = "type")]
    pub location_type: String,
}

fn validate_input(input: &LocationInput) -> Result<()> {
    if input.address.trim().is_empty() {
        return Err(Error::invalid_input("Location address cannot be empty"));
    }
    if input.location_type.trim().is_empty() {
        return Err(Error::invalid_input("Location type cannot be empty"));
    }
    Ok(())
}

/// Lists locations ordered by address, optionally only those of one type.
pub async fn list_locations(
    db: &DatabaseConnection,
    location_type: Option<&str>,
) -> Result<Vec<location::Model>> {
    match location_type {
        Some(location_type) => db::locations::find_by_type(db, location_type).await,
        None => db::locations::find_all(db).await,
    }
}

/// Retrieves one location.
pub async fn get_location(db: &DatabaseConnection, location_id: i64) -> Result<location::Model> {
    db::locations::find_by_id(db, location_id)
        .await?
        .ok_or_else(|| LocationError::NotFound { id: location_id }.into())
}

/// Creates a location.
///
/// # Errors
/// Returns `Error::InvalidInput` if the address or type is blank.
#[instrument(skip(db, input))]
pub async fn create_location(
    db: &DatabaseConnection,
    input: LocationInput,
) -> Result<location::Model> {
    validate_input(&input)?;

    let location = location::ActiveModel {
        address: Set(input.address.trim().to_string()),
        location_type: Set(input.location_type.trim().to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(location_id = location.id, "Created location");
    Ok(location)
}

/// Replaces a location's address and type.
#[instrument(skip(db, input))]
pub async fn update_location(
    db: &DatabaseConnection,
    location_id: i64,
    input: LocationInput,
) -> Result<location::Model> {
    validate_input(&input)?;

    let txn = db.begin().await?;
    let mut location: location::ActiveModel = db::locations::find_by_id(&txn, location_id)
        .await?
        .ok_or(LocationError::NotFound { id: location_id })?
        .into();

    location.address = Set(input.address.trim().to_string());
    location.location_type = Set(input.location_type.trim().to_string());
    let updated = location.update(&txn).await?;
    txn.commit().await?;

    Ok(updated)
}

/// Deletes a location that nothing references.
///
/// # Errors
/// Returns an error if:
/// - The location does not exist
/// - Any asset currently resides there (`LocationError::HasAssets`)
/// - Any transfer names it as source or destination (`LocationError::HasTransfers`)
#[instrument(skip(db))]
pub async fn delete_location(db: &DatabaseConnection, location_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let location = db::locations::find_by_id(&txn, location_id)
        .await?
        .ok_or(LocationError::NotFound { id: location_id })?;

    if db::locations::has_assets(&txn, location_id).await? {
        return Err(LocationError::HasAssets { id: location_id }.into());
    }
    if db::locations::has_transfers(&txn, location_id).await? {
        return Err(LocationError::HasTransfers { id: location_id }.into());
    }

    location.delete(&txn).await?;
    txn.commit().await?;

    info!(location_id, "Deleted location");
    Ok(())
}

/// Lists the transfers into or out of a location, newest first.
pub async fn list_location_transfers(
    db: &DatabaseConnection,
    location_id: i64,
) -> Result<Vec<TransferView>> {
    if !db::locations::exists(db, location_id).await? {
        return Err(LocationError::NotFound { id: location_id }.into());
    }
    db::transfers::find_by_location(db, location_id).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_location_validation() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_location(
            &db,
            LocationInput {
                address: "  ".to_string(),
                location_type: "office".to_string(),
            },
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidInput { .. })));

        let result = create_location(
            &db,
            LocationInput {
                address: "1 Main St".to_string(),
                location_type: String::new(),
            },
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidInput { .. })));
    }

    #[tokio::test]
    async fn test_list_locations_by_type() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_location(&db, "B Street").await?;
        create_custom_location(&db, "A Avenue", "warehouse").await?;

        let all = list_locations(&db, None).await?;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].address, "A Avenue");

        let warehouses = list_locations(&db, Some("warehouse")).await?;
        assert_eq!(warehouses.len(), 1);
        assert_eq!(warehouses[0].location_type, "warehouse");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_location() -> Result<()> {
        let db = setup_test_db().await?;
        let location = create_test_location(&db, "Old Road").await?;

        let updated = update_location(
            &db,
            location.id,
            LocationInput {
                address: "New Road".to_string(),
                location_type: "warehouse".to_string(),
            },
        )
        .await?;
        assert_eq!(updated.address, "New Road");
        assert_eq!(get_location(&db, location.id).await?.location_type, "warehouse");

        let missing = update_location(
            &db,
            999,
            LocationInput {
                address: "x".to_string(),
                location_type: "y".to_string(),
            },
        )
        .await;
        assert!(matches!(
            missing,
            Err(Error::Location(LocationError::NotFound { id: 999 }))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_unreferenced_location() -> Result<()> {
        let db = setup_test_db().await?;
        let location = create_test_location(&db, "Spare Room").await?;

        delete_location(&db, location.id).await?;
        assert!(get_location(&db, location.id).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_location_with_assets_fails() -> Result<()> {
        let fixture = setup_inventory().await?;

        let result = delete_location(&fixture.db, fixture.office.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Location(LocationError::HasAssets { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_location_with_transfer_history_fails() -> Result<()> {
        let fixture = setup_inventory().await?;
        move_asset(&fixture, fixture.office.id, fixture.warehouse.id).await?;
        move_asset(&fixture, fixture.warehouse.id, fixture.depot.id).await?;

        // The office no longer holds anything but was a transfer source.
        let result = delete_location(&fixture.db, fixture.office.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Location(LocationError::HasTransfers { .. })
        ));

        // The warehouse was both a destination and a source.
        let result = delete_location(&fixture.db, fixture.warehouse.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Location(LocationError::HasTransfers { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_location_transfers() -> Result<()> {
        let fixture = setup_inventory().await?;
        move_asset(&fixture, fixture.office.id, fixture.warehouse.id).await?;

        let at_office = list_location_transfers(&fixture.db, fixture.office.id).await?;
        let at_warehouse = list_location_transfers(&fixture.db, fixture.warehouse.id).await?;
        let at_depot = list_location_transfers(&fixture.db, fixture.depot.id).await?;
        assert_eq!(at_office.len(), 1);
        assert_eq!(at_warehouse.len(), 1);
        assert!(at_depot.is_empty());

        assert!(list_location_transfers(&fixture.db, 999).await.is_err());
        Ok(())
    }
}
