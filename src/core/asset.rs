//! Asset business logic.
//!
//! Every write validates its references in a fixed order (status, location,
//! department) inside the same transaction as the write itself.

use crate::{
    db::{self, AssetFilter, AssetView, TransferView},
    entities::asset,
    errors::{AssetError, Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait,
};
use serde::Deserialize;
use tracing::{info, instrument};

/// Fields accepted when creating or updating an asset
#[derive(Debug, Clone, Deserialize)]
pub struct AssetInput {
    /// Asset name
    pub name: String,
    /// Free-form category
    #[serde(default)]
    pub category: String,
    /// Acquisition date, `YYYY-MM-DD`
    pub acquisition_date: NaiveDate,
    /// Acquisition cost
    pub cost: f64,
    /// Status from the vocabulary
    pub status_id: i64,
    /// Where the asset is
    pub current_location_id: i64,
    /// Owning department, if any
    #[serde(default)]
    pub department_id: Option<i64>,
}

fn validate_input(input: &AssetInput) -> Result<()> {
    if input.name.trim().is_empty() {
        return Err(Error::invalid_input("Asset name cannot be empty"));
    }
    if !input.cost.is_finite() || input.cost < 0.0 {
        return Err(Error::invalid_input(format!(
            "Asset cost must be a non-negative amount, got {}",
            input.cost
        )));
    }
    Ok(())
}

async fn check_references<C: ConnectionTrait>(db: &C, input: &AssetInput) -> Result<()> {
    if !db::statuses::exists(db, input.status_id).await? {
        return Err(AssetError::StatusNotFound {
            id: input.status_id,
        }
        .into());
    }
    if !db::locations::exists(db, input.current_location_id).await? {
        return Err(AssetError::LocationNotFound {
            id: input.current_location_id,
        }
        .into());
    }
    if let Some(id) = input.department_id {
        if !db::departments::exists(db, id).await? {
            return Err(AssetError::DepartmentNotFound { id }.into());
        }
    }
    Ok(())
}

async fn find_view<C: ConnectionTrait>(db: &C, asset_id: i64) -> Result<AssetView> {
    db::assets::find_by_id(db, asset_id)
        .await?
        .ok_or_else(|| AssetError::NotFound { id: asset_id }.into())
}

/// Lists assets, optionally narrowed to one status, location or department.
///
/// # Errors
/// Returns the matching `*NotFound` error if the filter names a missing record.
pub async fn list_assets(db: &DatabaseConnection, filter: AssetFilter) -> Result<Vec<AssetView>> {
    match filter {
        AssetFilter::All => {}
        AssetFilter::Status(id) => {
            if !db::statuses::exists(db, id).await? {
                return Err(AssetError::StatusNotFound { id }.into());
            }
        }
        AssetFilter::Location(id) => {
            if !db::locations::exists(db, id).await? {
                return Err(AssetError::LocationNotFound { id }.into());
            }
        }
        AssetFilter::Department(id) => {
            if !db::departments::exists(db, id).await? {
                return Err(AssetError::DepartmentNotFound { id }.into());
            }
        }
    }
    db::assets::find_all(db, filter).await
}

/// Retrieves one asset with its references resolved.
pub async fn get_asset(db: &DatabaseConnection, asset_id: i64) -> Result<AssetView> {
    find_view(db, asset_id).await
}

/// Creates an asset.
///
/// # Errors
/// Returns an error if:
/// - The name is blank or the cost is negative
/// - The status, location or department does not exist (checked in that order)
#[instrument(skip(db, input), fields(name = %input.name))]
pub async fn create_asset(db: &DatabaseConnection, input: AssetInput) -> Result<AssetView> {
    validate_input(&input)?;

    let txn = db.begin().await?;
    check_references(&txn, &input).await?;

    let asset = asset::ActiveModel {
        name: Set(input.name.trim().to_string()),
        category: Set(input.category.trim().to_string()),
        acquisition_date: Set(input.acquisition_date),
        cost: Set(input.cost),
        status_id: Set(input.status_id),
        current_location_id: Set(input.current_location_id),
        department_id: Set(input.department_id),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let view = find_view(&txn, asset.id).await?;
    txn.commit().await?;

    info!(asset_id = view.id, "Created asset");
    Ok(view)
}

/// Replaces every attribute of an asset, including its current location.
///
/// A location changed here leaves no ledger entry; moves that should be recorded
/// go through [`crate::core::transfer::create_transfer`].
#[instrument(skip(db, input))]
pub async fn update_asset(
    db: &DatabaseConnection,
    asset_id: i64,
    input: AssetInput,
) -> Result<AssetView> {
    validate_input(&input)?;

    let txn = db.begin().await?;
    let mut asset: asset::ActiveModel = db::assets::find_model_by_id(&txn, asset_id)
        .await?
        .ok_or(AssetError::NotFound { id: asset_id })?
        .into();
    check_references(&txn, &input).await?;

    asset.name = Set(input.name.trim().to_string());
    asset.category = Set(input.category.trim().to_string());
    asset.acquisition_date = Set(input.acquisition_date);
    asset.cost = Set(input.cost);
    asset.status_id = Set(input.status_id);
    asset.current_location_id = Set(input.current_location_id);
    asset.department_id = Set(input.department_id);
    asset.update(&txn).await?;

    let view = find_view(&txn, asset_id).await?;
    txn.commit().await?;

    Ok(view)
}

/// Moves an asset to another status from the vocabulary.
#[instrument(skip(db))]
pub async fn update_asset_status(
    db: &DatabaseConnection,
    asset_id: i64,
    status_id: i64,
) -> Result<AssetView> {
    let txn = db.begin().await?;
    if !db::assets::exists(&txn, asset_id).await? {
        return Err(AssetError::NotFound { id: asset_id }.into());
    }
    if !db::statuses::exists(&txn, status_id).await? {
        return Err(AssetError::StatusNotFound { id: status_id }.into());
    }

    db::assets::update_status(&txn, asset_id, status_id).await?;
    let view = find_view(&txn, asset_id).await?;
    txn.commit().await?;

    info!(asset_id, status = %view.status, "Asset status changed");
    Ok(view)
}

/// Deletes an asset.
///
/// Its ledger entries are kept; they lose the asset reference but still name both
/// locations, which therefore stay undeletable.
#[instrument(skip(db))]
pub async fn delete_asset(db: &DatabaseConnection, asset_id: i64) -> Result<()> {
    let txn = db.begin().await?;
    if !db::assets::exists(&txn, asset_id).await? {
        return Err(AssetError::NotFound { id: asset_id }.into());
    }

    asset::Entity::delete_by_id(asset_id).exec(&txn).await?;
    txn.commit().await?;

    info!(asset_id, "Deleted asset");
    Ok(())
}

/// Lists an asset's moves, newest first.
pub async fn get_asset_transfer_history(
    db: &DatabaseConnection,
    asset_id: i64,
) -> Result<Vec<TransferView>> {
    if !db::assets::exists(db, asset_id).await? {
        return Err(AssetError::NotFound { id: asset_id }.into());
    }
    db::transfers::find_by_asset(db, asset_id).await
}
