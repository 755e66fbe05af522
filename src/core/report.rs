//! Report generation business logic.
//!
//! Reports are read-only aggregations. The summarizing functions are pure and work
//! on already-loaded rows; the async wrappers load the rows and delegate to them.

use crate::{
    db::{self, AssetFilter, AssetView, TransferView},
    entities::asset_status,
    errors::Result,
};
use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::collections::BTreeMap;

/// Bucket name for assets owned by no department
pub const UNASSIGNED_DEPARTMENT: &str = "Unassigned";

/// Most transfers listed in an inventory snapshot
pub const RECENT_TRANSFER_LIMIT: u64 = 10;

/// How far back an inventory snapshot looks for transfers
pub const RECENT_TRANSFER_WINDOW_DAYS: i64 = 30;

/// Count and summed cost of the assets in one status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSummary {
    /// Status id
    pub status_id: i64,
    /// Status name
    pub status: String,
    /// Number of assets in this status
    pub count: u64,
    /// Sum of their costs
    pub total_cost: f64,
}

/// Cost figures for the assets owned by one department
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentCost {
    /// Department id, `None` for the unassigned bucket
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<i64>,
    /// Department name or [`UNASSIGNED_DEPARTMENT`]
    pub department: String,
    /// Number of assets
    pub count: u64,
    /// Sum of their costs
    pub total_cost: f64,
    /// `total_cost / count`
    pub average_cost: f64,
}

/// Point-in-time overview of the whole inventory
#[derive(Debug, Clone, Serialize)]
pub struct InventoryReport {
    /// Number of assets
    pub total_assets: u64,
    /// Sum of all asset costs
    pub total_value: f64,
    /// Asset count per status name
    pub by_status: BTreeMap<String, u64>,
    /// Asset count per location address
    pub by_location: BTreeMap<String, u64>,
    /// Asset count per department name
    pub by_department: BTreeMap<String, u64>,
    /// Newest transfers of the last 30 days, at most 10
    pub recent_transfers: Vec<TransferView>,
    /// When the snapshot was taken
    pub generated_at: DateTime<Utc>,
}

/// Transfers recorded within a window
#[derive(Debug, Clone, Serialize)]
pub struct TransferReport {
    /// Window start
    pub from: DateTime<Utc>,
    /// Window end
    pub to: DateTime<Utc>,
    /// Number of transfers in the window
    pub total: usize,
    /// The transfers, newest first
    pub transfers: Vec<TransferView>,
}

fn department_name(asset: &AssetView) -> String {
    asset
        .department
        .clone()
        .unwrap_or_else(|| UNASSIGNED_DEPARTMENT.to_string())
}

/// Summarizes assets per status, including statuses no asset currently has.
#[must_use]
pub fn summarize_by_status(
    statuses: &[asset_status::Model],
    assets: &[AssetView],
) -> Vec<StatusSummary> {
    statuses
        .iter()
        .map(|status| {
            let in_status = assets.iter().filter(|a| a.status_id == status.id);
            let (count, total_cost) =
                in_status.fold((0, 0.0), |(count, total), a| (count + 1, total + a.cost));
            StatusSummary {
                status_id: status.id,
                status: status.name.clone(),
                count,
                total_cost,
            }
        })
        .collect()
}

/// Groups assets by owning department, ordered by department name.
///
/// Only departments owning at least one asset appear, so every bucket's count is
/// at least one.
#[must_use]
pub fn summarize_cost_by_department(assets: &[AssetView]) -> Vec<DepartmentCost> {
    let mut buckets: BTreeMap<Option<i64>, DepartmentCost> = BTreeMap::new();

    for asset in assets {
        let bucket = buckets
            .entry(asset.department_id)
            .or_insert_with(|| DepartmentCost {
                department_id: asset.department_id,
                department: department_name(asset),
                count: 0,
                total_cost: 0.0,
                average_cost: 0.0,
            });
        bucket.count += 1;
        bucket.total_cost += asset.cost;
    }

    let mut summaries: Vec<DepartmentCost> = buckets
        .into_values()
        .map(|mut bucket| {
            #[allow(clippy::cast_precision_loss)] // Asset counts stay far below 2^52
            let count = bucket.count as f64;
            bucket.average_cost = bucket.total_cost / count;
            bucket
        })
        .collect();
    summaries.sort_by(|a, b| {
        a.department
            .cmp(&b.department)
            .then(a.department_id.cmp(&b.department_id))
    });
    summaries
}

fn count_by<F>(assets: &[AssetView], key: F) -> BTreeMap<String, u64>
where
    F: Fn(&AssetView) -> String,
{
    let mut counts = BTreeMap::new();
    for asset in assets {
        *counts.entry(key(asset)).or_insert(0) += 1;
    }
    counts
}

/// Builds an inventory snapshot from loaded rows.
#[must_use]
pub fn summarize_inventory(
    statuses: &[asset_status::Model],
    assets: &[AssetView],
    recent_transfers: Vec<TransferView>,
    generated_at: DateTime<Utc>,
) -> InventoryReport {
    let by_status = summarize_by_status(statuses, assets)
        .into_iter()
        .map(|summary| (summary.status, summary.count))
        .collect();

    InventoryReport {
        total_assets: assets.len() as u64,
        total_value: assets.iter().map(|a| a.cost).sum(),
        by_status,
        by_location: count_by(assets, |a| a.location.clone()),
        by_department: count_by(assets, department_name),
        recent_transfers,
        generated_at,
    }
}

/// Asset count and cost per status.
pub async fn assets_by_status_report(db: &DatabaseConnection) -> Result<Vec<StatusSummary>> {
    let statuses = db::statuses::find_all(db).await?;
    let assets = db::assets::find_all(db, AssetFilter::All).await?;
    Ok(summarize_by_status(&statuses, &assets))
}

/// Asset count, total and average cost per owning department.
pub async fn department_cost_report(db: &DatabaseConnection) -> Result<Vec<DepartmentCost>> {
    let assets = db::assets::find_all(db, AssetFilter::All).await?;
    Ok(summarize_cost_by_department(&assets))
}

/// Inventory snapshot as of now.
pub async fn inventory_report(db: &DatabaseConnection) -> Result<InventoryReport> {
    inventory_report_at(db, Utc::now()).await
}

/// Inventory snapshot as of `now`.
pub async fn inventory_report_at(
    db: &DatabaseConnection,
    now: DateTime<Utc>,
) -> Result<InventoryReport> {
    let statuses = db::statuses::find_all(db).await?;
    let assets = db::assets::find_all(db, AssetFilter::All).await?;
    let recent = db::transfers::find_between(
        db,
        now - Duration::days(RECENT_TRANSFER_WINDOW_DAYS),
        now,
        Some(RECENT_TRANSFER_LIMIT),
    )
    .await?;

    Ok(summarize_inventory(&statuses, &assets, recent, now))
}

/// Transfers recorded within `[from, to]`.
///
/// # Errors
/// Returns `TransferError::InvalidDateRange` if `from` is after `to`.
pub async fn transfers_report(
    db: &DatabaseConnection,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<TransferReport> {
    let transfers = crate::core::transfer::list_transfers_between(db, from, to).await?;
    Ok(TransferReport {
        from,
        to,
        total: transfers.len(),
        transfers,
    })
}
