//! `/reports` handlers.

use super::{AppState, error::ApiQuery};
use crate::{
    core::report::{self, DepartmentCost, InventoryReport, StatusSummary, TransferReport},
    errors::{Error, Result},
};
use axum::{Json, Router, extract::State, routing::get};
use chrono::{DateTime, Duration, Months, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;

/// Window for the transfers report, as calendar dates
#[derive(Debug, Deserialize)]
pub struct ReportWindow {
    /// First day (`YYYY-MM-DD`); defaults to one month ago
    pub from: Option<NaiveDate>,
    /// Last day (`YYYY-MM-DD`), included in full; defaults to now
    pub to: Option<NaiveDate>,
}

impl ReportWindow {
    /// Resolves the window to instants relative to `now`.
    ///
    /// A `to` date whose following day is out of range is rejected as invalid input.
    fn resolve(&self, now: DateTime<Utc>) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        let from = match self.from {
            Some(date) => date.and_time(NaiveTime::MIN).and_utc(),
            None => now
                .checked_sub_months(Months::new(1))
                .or_else(|| now.checked_sub_signed(Duration::days(30)))
                .ok_or_else(|| Error::invalid_input("report window start is out of range"))?,
        };
        let to = match self.to {
            Some(date) => date
                .and_time(NaiveTime::MIN)
                .and_utc()
                .checked_add_signed(Duration::days(1))
                .map(|next_day| next_day - Duration::nanoseconds(1))
                .ok_or_else(|| Error::invalid_input(format!("report end date {date} is out of range")))?,
            None => now,
        };
        Ok((from, to))
    }
}

/// Report routes, nested under `/reports`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/assets-by-status", get(assets_by_status))
        .route("/department-costs", get(department_costs))
        .route("/inventory", get(inventory))
        .route("/transfers", get(transfers))
}

async fn assets_by_status(State(state): State<AppState>) -> Result<Json<Vec<StatusSummary>>> {
    Ok(Json(report::assets_by_status_report(&state.db).await?))
}

async fn department_costs(State(state): State<AppState>) -> Result<Json<Vec<DepartmentCost>>> {
    Ok(Json(report::department_cost_report(&state.db).await?))
}

async fn inventory(State(state): State<AppState>) -> Result<Json<InventoryReport>> {
    Ok(Json(report::inventory_report(&state.db).await?))
}

async fn transfers(
    State(state): State<AppState>,
    ApiQuery(window): ApiQuery<ReportWindow>,
) -> Result<Json<TransferReport>> {
    let (from, to) = window.resolve(Utc::now())?;
    Ok(Json(report::transfers_report(&state.db, from, to).await?))
}
