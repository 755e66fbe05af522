//! `/assets` handlers.

use super::{
    AppState,
    error::{ApiJson, ApiPath, ApiQuery},
};
use crate::{
    core::asset::{self, AssetInput},
    db::{AssetFilter, AssetView, TransferView},
    errors::{Error, Result},
};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, put},
};
use serde::Deserialize;

/// Optional listing filters; at most one may be given
#[derive(Debug, Default, Deserialize)]
pub struct AssetQuery {
    /// Only assets in this status
    pub status_id: Option<i64>,
    /// Only assets at this location
    pub location_id: Option<i64>,
    /// Only assets owned by this department
    pub department_id: Option<i64>,
}

impl AssetQuery {
    fn into_filter(self) -> Result<AssetFilter> {
        match (self.status_id, self.location_id, self.department_id) {
            (None, None, None) => Ok(AssetFilter::All),
            (Some(id), None, None) => Ok(AssetFilter::Status(id)),
            (None, Some(id), None) => Ok(AssetFilter::Location(id)),
            (None, None, Some(id)) => Ok(AssetFilter::Department(id)),
            _ => Err(Error::invalid_input(
                "Filter by at most one of status_id, location_id, department_id",
            )),
        }
    }
}

/// Body of a status change
#[derive(Debug, Deserialize)]
pub struct StatusChange {
    /// New status
    pub status_id: i64,
}

/// Asset routes, nested under `/assets`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_assets).post(create_asset))
        .route(
            "/{id}",
            get(get_asset).put(update_asset).delete(delete_asset),
        )
        .route("/{id}/status", put(update_asset_status))
        .route("/{id}/transfers", get(asset_transfers))
}

async fn list_assets(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AssetQuery>,
) -> Result<Json<Vec<AssetView>>> {
    let assets = asset::list_assets(&state.db, query.into_filter()?).await?;
    Ok(Json(assets))
}

async fn create_asset(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<AssetInput>,
) -> Result<(StatusCode, Json<AssetView>)> {
    let created = asset::create_asset(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_asset(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<AssetView>> {
    Ok(Json(asset::get_asset(&state.db, id).await?))
}

async fn update_asset(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<AssetInput>,
) -> Result<Json<AssetView>> {
    Ok(Json(asset::update_asset(&state.db, id, input).await?))
}

async fn update_asset_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(change): ApiJson<StatusChange>,
) -> Result<Json<AssetView>> {
    Ok(Json(
        asset::update_asset_status(&state.db, id, change.status_id).await?,
    ))
}

async fn delete_asset(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode> {
    asset::delete_asset(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn asset_transfers(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Vec<TransferView>>> {
    Ok(Json(asset::get_asset_transfer_history(&state.db, id).await?))
}
