//! `/transfers` handlers. The ledger is append-only, so there is no update or delete.

use super::{
    AppState,
    error::{ApiJson, ApiPath, ApiQuery},
};
use crate::{
    core::transfer::{self, NewTransfer},
    db::TransferView,
    entities::asset_transfer,
    errors::{Error, Result},
};
use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Optional window over the ledger; both ends or neither
#[derive(Debug, Deserialize)]
pub struct TransferQuery {
    /// Window start (RFC 3339)
    pub from: Option<DateTime<Utc>>,
    /// Window end (RFC 3339)
    pub to: Option<DateTime<Utc>>,
}

/// Transfer routes, nested under `/transfers`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_transfers).post(create_transfer))
        .route("/{id}", get(get_transfer))
}

async fn list_transfers(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<TransferQuery>,
) -> Result<Json<Vec<TransferView>>> {
    let transfers = match (query.from, query.to) {
        (None, None) => transfer::list_transfers(&state.db).await?,
        (Some(from), Some(to)) => transfer::list_transfers_between(&state.db, from, to).await?,
        _ => {
            return Err(Error::invalid_input(
                "Both 'from' and 'to' are required for a date range",
            ));
        }
    };
    Ok(Json(transfers))
}

async fn create_transfer(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewTransfer>,
) -> Result<(StatusCode, Json<asset_transfer::Model>)> {
    let created = transfer::create_transfer(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_transfer(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<TransferView>> {
    Ok(Json(transfer::get_transfer(&state.db, id).await?))
}
