//! `/employees` handlers.

use super::{
    AppState,
    error::{ApiJson, ApiPath},
};
use crate::{
    core::employee::{self, EmployeeUpdate, NewEmployee},
    db::{EmployeeView, TransferView},
    errors::Result,
};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, put},
};
use serde::Deserialize;

/// Body of a password change
#[derive(Deserialize)]
pub struct PasswordChange {
    /// New plaintext password
    pub password: String,
}

/// Employee routes, nested under `/employees`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/{id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .route("/{id}/password", put(change_password))
        .route("/{id}/transfers", get(employee_transfers))
}

async fn list_employees(State(state): State<AppState>) -> Result<Json<Vec<EmployeeView>>> {
    Ok(Json(employee::list_employees(&state.db).await?))
}

async fn create_employee(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewEmployee>,
) -> Result<(StatusCode, Json<EmployeeView>)> {
    let created = employee::create_employee(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_employee(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<EmployeeView>> {
    Ok(Json(employee::get_employee(&state.db, id).await?))
}

async fn update_employee(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<EmployeeUpdate>,
) -> Result<Json<EmployeeView>> {
    Ok(Json(employee::update_employee(&state.db, id, input).await?))
}

async fn change_password(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(change): ApiJson<PasswordChange>,
) -> Result<StatusCode> {
    employee::change_password(&state.db, id, &change.password).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_employee(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode> {
    employee::delete_employee(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn employee_transfers(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Vec<TransferView>>> {
    Ok(Json(employee::list_employee_transfers(&state.db, id).await?))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::super::test_support::*;
    use super::*;
    use crate::test_utils::*;
    use axum::http::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_employee_endpoints() -> Result<()> {
        let fixture = setup_inventory().await?;
        let app = test_app(&fixture);
        let token = login_token(&app, &fixture).await;
        let token = Some(token.as_str());

        let (status, created) = send(
            &app,
            Method::POST,
            "/employees",
            token,
            Some(json!({
                "full_name": "Linus",
                "position": "Maintainer",
                "email": "linus@example.com",
                "password": "penguin",
                "department_id": fixture.department.id,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_i64().unwrap();
        assert_eq!(created["department"], "IT");

        let (status, _) = send(
            &app,
            Method::PUT,
            &format!("/employees/{id}/password"),
            token,
            Some(json!({"password": "tux"})),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, login) = send(
            &app,
            Method::POST,
            "/login",
            None,
            Some(json!({"email": "linus@example.com", "password": "tux"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(login["employee"]["id"], id);

        let (status, listed) = send(&app, Method::GET, "/employees", token, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().unwrap().len(), 2);

        let (status, _) =
            send(&app, Method::DELETE, &format!("/employees/{id}"), token, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        Ok(())
    }

    #[tokio::test]
    async fn test_employee_with_transfers_cannot_be_deleted() -> Result<()> {
        let fixture = setup_inventory().await?;
        move_asset(&fixture, fixture.office.id, fixture.warehouse.id).await?;
        let app = test_app(&fixture);
        let token = login_token(&app, &fixture).await;
        let token = Some(token.as_str());

        let uri = format!("/employees/{}/transfers", fixture.employee.id);
        let (status, transfers) = send(&app, Method::GET, &uri, token, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(transfers.as_array().unwrap().len(), 1);

        let uri = format!("/employees/{}", fixture.employee.id);
        let (status, _) = send(&app, Method::DELETE, &uri, token, None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        Ok(())
    }
}
