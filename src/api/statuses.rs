//! `/statuses` handlers - the read-only status vocabulary.

use super::{AppState, error::ApiPath};
use crate::{core::status, entities::asset_status, errors::Result};
use axum::{Json, Router, extract::State, routing::get};

/// Status routes, nested under `/statuses`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_statuses))
        .route("/{id}", get(get_status))
}

async fn list_statuses(State(state): State<AppState>) -> Result<Json<Vec<asset_status::Model>>> {
    Ok(Json(status::list_statuses(&state.db).await?))
}

async fn get_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<asset_status::Model>> {
    Ok(Json(status::get_status(&state.db, id).await?))
}
