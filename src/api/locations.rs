//! `/locations` handlers.

use super::{
    AppState,
    error::{ApiJson, ApiPath, ApiQuery},
};
use crate::{
    core::location::{self, LocationInput},
    db::TransferView,
    entities::location as location_entity,
    errors::Result,
};
use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Deserialize;

/// Optional listing filter
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    /// Only locations of this type
    #[serde(rename = "type")]
    pub location_type: Option<String>,
}

/// Location routes, nested under `/locations`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_locations).post(create_location))
        .route(
            "/{id}",
            get(get_location).put(update_location).delete(delete_location),
        )
        .route("/{id}/transfers", get(location_transfers))
}

async fn list_locations(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<LocationQuery>,
) -> Result<Json<Vec<location_entity::Model>>> {
    let locations = location::list_locations(&state.db, query.location_type.as_deref()).await?;
    Ok(Json(locations))
}

async fn create_location(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<LocationInput>,
) -> Result<(StatusCode, Json<location_entity::Model>)> {
    let created = location::create_location(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_location(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<location_entity::Model>> {
    Ok(Json(location::get_location(&state.db, id).await?))
}

async fn update_location(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<LocationInput>,
) -> Result<Json<location_entity::Model>> {
    Ok(Json(location::update_location(&state.db, id, input).await?))
}

async fn delete_location(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode> {
    location::delete_location(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn location_transfers(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Vec<TransferView>>> {
    Ok(Json(location::list_location_transfers(&state.db, id).await?))
}
