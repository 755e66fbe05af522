//! The transfer workflow and ledger reads.
//!
//! A transfer is the only recorded way to move an asset. The checks below run in a
//! fixed order and the first failure wins; once all pass, the ledger entry and the
//! asset's new location are written in the same transaction, so the asset's stored
//! location always equals the destination of its latest transfer.

use crate::{
    db::{self, NewLedgerEntry, TransferView},
    entities::asset_transfer,
    errors::{Result, TransferError},
};
use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Deserialize;
use tracing::{info, instrument, warn};

/// A requested move of one asset
#[derive(Debug, Clone, Deserialize)]
pub struct NewTransfer {
    /// Asset to move
    pub asset_id: i64,
    /// Employee performing the move
    pub employee_id: i64,
    /// Where the caller believes the asset is
    pub from_location_id: i64,
    /// Where the asset goes
    pub to_location_id: i64,
    /// When the move happened; must not be in the future
    pub transfer_date: DateTime<Utc>,
    /// Optional free-text note
    #[serde(default)]
    pub notes: Option<String>,
}

/// Records a transfer, judging "the future" against the current time.
pub async fn create_transfer(
    db: &DatabaseConnection,
    input: NewTransfer,
) -> Result<asset_transfer::Model> {
    create_transfer_at(db, input, Utc::now()).await
}

/// Records a transfer, judging "the future" against `now`.
///
/// # Errors
/// Returns the first failing check, in this order:
/// 1. `AssetNotFound`
/// 2. `EmployeeNotFound`
/// 3. `SourceLocationMismatch` when the declared source is not the asset's location
/// 4. `LocationNotFound` for the destination
/// 5. `SameLocations`
/// 6. `InvalidTransferDate` when the date lies after `now`
#[instrument(skip(db, input, now), fields(asset_id = input.asset_id))]
pub async fn create_transfer_at(
    db: &DatabaseConnection,
    input: NewTransfer,
    now: DateTime<Utc>,
) -> Result<asset_transfer::Model> {
    let txn = db.begin().await?;

    let asset = db::assets::find_model_by_id(&txn, input.asset_id)
        .await?
        .ok_or(TransferError::AssetNotFound {
            asset_id: input.asset_id,
        })?;

    if !db::employees::exists(&txn, input.employee_id).await? {
        return Err(TransferError::EmployeeNotFound {
            employee_id: input.employee_id,
        }
        .into());
    }

    if asset.current_location_id != input.from_location_id {
        warn!(
            declared = input.from_location_id,
            current = asset.current_location_id,
            "Transfer source does not match asset location"
        );
        return Err(TransferError::SourceLocationMismatch {
            declared: input.from_location_id,
            current: asset.current_location_id,
        }
        .into());
    }

    if !db::locations::exists(&txn, input.to_location_id).await? {
        return Err(TransferError::LocationNotFound {
            location_id: input.to_location_id,
        }
        .into());
    }

    if input.from_location_id == input.to_location_id {
        return Err(TransferError::SameLocations {
            location_id: input.to_location_id,
        }
        .into());
    }

    if input.transfer_date > now {
        return Err(TransferError::InvalidTransferDate.into());
    }

    let notes = input
        .notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let transfer = db::transfers::insert(
        &txn,
        NewLedgerEntry {
            asset_id: asset.id,
            employee_id: input.employee_id,
            from_location_id: input.from_location_id,
            to_location_id: input.to_location_id,
            transfer_date: input.transfer_date,
            notes,
        },
    )
    .await?;
    db::assets::update_location(&txn, asset.id, input.to_location_id).await?;

    txn.commit().await?;

    info!(
        transfer_id = transfer.id,
        from = transfer.from_location_id,
        to = transfer.to_location_id,
        "Asset transferred"
    );
    Ok(transfer)
}

/// Lists the whole ledger, newest first.
pub async fn list_transfers(db: &DatabaseConnection) -> Result<Vec<TransferView>> {
    db::transfers::find_all(db).await
}

/// Retrieves one ledger entry.
pub async fn get_transfer(db: &DatabaseConnection, transfer_id: i64) -> Result<TransferView> {
    db::transfers::find_by_id(db, transfer_id)
        .await?
        .ok_or_else(|| TransferError::NotFound { id: transfer_id }.into())
}

/// Lists the transfers dated within `[from, to]`, newest first.
///
/// # Errors
/// Returns `TransferError::InvalidDateRange` if `from` is after `to`.
pub async fn list_transfers_between(
    db: &DatabaseConnection,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<TransferView>> {
    if from > to {
        return Err(TransferError::InvalidDateRange.into());
    }
    db::transfers::find_between(db, from, to, None).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::asset::get_asset;
    use crate::errors::{Error, ErrorKind};
    use crate::test_utils::*;
    use chrono::Duration;

    fn request(fixture: &Inventory, from: i64, to: i64) -> NewTransfer {
        NewTransfer {
            asset_id: fixture.laptop.id,
            employee_id: fixture.employee.id,
            from_location_id: from,
            to_location_id: to,
            transfer_date: Utc::now() - Duration::hours(1),
            notes: Some("  quarterly move ".to_string()),
        }
    }

    async fn ledger_len(fixture: &Inventory) -> usize {
        list_transfers(&fixture.db).await.unwrap().len()
    }

    async fn current_location(fixture: &Inventory) -> i64 {
        get_asset(&fixture.db, fixture.laptop.id)
            .await
            .unwrap()
            .current_location_id
    }

    #[tokio::test]
    async fn test_successful_transfer_moves_asset() -> Result<()> {
        let fixture = setup_inventory().await?;

        let transfer = create_transfer(
            &fixture.db,
            request(&fixture, fixture.office.id, fixture.warehouse.id),
        )
        .await?;

        assert_eq!(transfer.from_location_id, fixture.office.id);
        assert_eq!(transfer.to_location_id, fixture.warehouse.id);
        assert_eq!(transfer.notes.as_deref(), Some("quarterly move"));
        assert_eq!(current_location(&fixture).await, fixture.warehouse.id);

        let ledger = list_transfers(&fixture.db).await?;
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].from_location, fixture.office.address);
        assert_eq!(ledger[0].to_location, fixture.warehouse.address);
        assert_eq!(ledger[0].asset_name.as_deref(), Some(fixture.laptop.name.as_str()));
        Ok(())
    }

    #[tokio::test]
    async fn test_stale_source_is_rejected() -> Result<()> {
        let fixture = setup_inventory().await?;
        move_asset(&fixture, fixture.office.id, fixture.warehouse.id).await?;

        // Declares the office again although the laptop is now in the warehouse.
        let err = create_transfer(
            &fixture.db,
            request(&fixture, fixture.office.id, fixture.depot.id),
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            format!(
                "source location {} does not match asset's current location {}",
                fixture.office.id, fixture.warehouse.id
            )
        );
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(ledger_len(&fixture).await, 1);
        assert_eq!(current_location(&fixture).await, fixture.warehouse.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_same_location_is_rejected() -> Result<()> {
        let fixture = setup_inventory().await?;

        let err = create_transfer(
            &fixture.db,
            request(&fixture, fixture.office.id, fixture.office.id),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            Error::Transfer(TransferError::SameLocations { .. })
        ));
        assert_eq!(ledger_len(&fixture).await, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_future_date_is_rejected() -> Result<()> {
        let fixture = setup_inventory().await?;
        let mut input = request(&fixture, fixture.office.id, fixture.warehouse.id);
        input.transfer_date = Utc::now() + Duration::days(1);

        let err = create_transfer(&fixture.db, input).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Transfer(TransferError::InvalidTransferDate)
        ));
        assert_eq!(current_location(&fixture).await, fixture.office.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_transfer_dated_now_is_accepted() -> Result<()> {
        let fixture = setup_inventory().await?;
        let now = Utc::now();
        let mut input = request(&fixture, fixture.office.id, fixture.warehouse.id);
        input.transfer_date = now;

        create_transfer_at(&fixture.db, input, now).await?;
        assert_eq!(ledger_len(&fixture).await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_first_failing_check_wins() -> Result<()> {
        let fixture = setup_inventory().await?;

        // Unknown asset beats every other problem.
        let mut input = request(&fixture, 999, 999);
        input.asset_id = 999;
        input.employee_id = 999;
        input.transfer_date = Utc::now() + Duration::days(1);
        assert!(matches!(
            create_transfer(&fixture.db, input.clone()).await.unwrap_err(),
            Error::Transfer(TransferError::AssetNotFound { asset_id: 999 })
        ));

        input.asset_id = fixture.laptop.id;
        assert!(matches!(
            create_transfer(&fixture.db, input.clone()).await.unwrap_err(),
            Error::Transfer(TransferError::EmployeeNotFound { employee_id: 999 })
        ));

        input.employee_id = fixture.employee.id;
        assert!(matches!(
            create_transfer(&fixture.db, input.clone()).await.unwrap_err(),
            Error::Transfer(TransferError::SourceLocationMismatch { declared: 999, .. })
        ));

        input.from_location_id = fixture.office.id;
        assert!(matches!(
            create_transfer(&fixture.db, input.clone()).await.unwrap_err(),
            Error::Transfer(TransferError::LocationNotFound { location_id: 999 })
        ));

        input.to_location_id = fixture.office.id;
        assert!(matches!(
            create_transfer(&fixture.db, input.clone()).await.unwrap_err(),
            Error::Transfer(TransferError::SameLocations { .. })
        ));

        input.to_location_id = fixture.warehouse.id;
        assert!(matches!(
            create_transfer(&fixture.db, input).await.unwrap_err(),
            Error::Transfer(TransferError::InvalidTransferDate)
        ));

        assert_eq!(ledger_len(&fixture).await, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_chained_transfers_track_latest_destination() -> Result<()> {
        let fixture = setup_inventory().await?;
        move_asset(&fixture, fixture.office.id, fixture.warehouse.id).await?;
        move_asset(&fixture, fixture.warehouse.id, fixture.depot.id).await?;
        move_asset(&fixture, fixture.depot.id, fixture.office.id).await?;

        let history = list_transfers(&fixture.db).await?;
        assert_eq!(history.len(), 3);
        // Newest first: the latest destination is where the asset is.
        assert_eq!(history[0].to_location_id, current_location(&fixture).await);
        assert_eq!(history[0].from_location_id, fixture.depot.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_transfer() -> Result<()> {
        let fixture = setup_inventory().await?;
        let transfer = move_asset(&fixture, fixture.office.id, fixture.warehouse.id).await?;

        let view = get_transfer(&fixture.db, transfer.id).await?;
        assert_eq!(view.employee_name, fixture.employee.full_name);

        assert!(matches!(
            get_transfer(&fixture.db, 999).await.unwrap_err(),
            Error::Transfer(TransferError::NotFound { id: 999 })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_transfers_between() -> Result<()> {
        let fixture = setup_inventory().await?;
        let now = Utc::now();
        let mut old = request(&fixture, fixture.office.id, fixture.warehouse.id);
        old.transfer_date = now - Duration::days(40);
        create_transfer(&fixture.db, old).await?;
        let mut recent = request(&fixture, fixture.warehouse.id, fixture.depot.id);
        recent.transfer_date = now - Duration::days(2);
        create_transfer(&fixture.db, recent).await?;

        let window = list_transfers_between(&fixture.db, now - Duration::days(7), now).await?;
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].to_location_id, fixture.depot.id);

        let inverted = list_transfers_between(&fixture.db, now, now - Duration::days(7)).await;
        assert!(matches!(
            inverted.unwrap_err(),
            Error::Transfer(TransferError::InvalidDateRange)
        ));
        Ok(())
    }
}
