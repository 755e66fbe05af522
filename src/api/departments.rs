//! `/departments` handlers.

use super::{
    AppState,
    error::{ApiJson, ApiPath},
};
use crate::{
    core::department::{self, DepartmentInput},
    db::{DepartmentView, EmployeeView},
    entities::department as department_entity,
    errors::Result,
};
use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

/// Department routes, nested under `/departments`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_departments).post(create_department))
        .route(
            "/{id}",
            get(get_department)
                .put(update_department)
                .delete(delete_department),
        )
        .route("/{id}/employees", get(department_employees))
}

async fn list_departments(State(state): State<AppState>) -> Result<Json<Vec<DepartmentView>>> {
    Ok(Json(department::list_departments(&state.db).await?))
}

async fn create_department(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<DepartmentInput>,
) -> Result<(StatusCode, Json<department_entity::Model>)> {
    let created = department::create_department(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_department(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<DepartmentView>> {
    Ok(Json(department::get_department(&state.db, id).await?))
}

async fn update_department(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<DepartmentInput>,
) -> Result<Json<department_entity::Model>> {
    Ok(Json(department::update_department(&state.db, id, input).await?))
}

async fn delete_department(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode> {
    department::delete_department(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn department_employees(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Vec<EmployeeView>>> {
    Ok(Json(department::list_department_employees(&state.db, id).await?))
}
