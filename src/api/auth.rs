//! Login, registration and the bearer-token middleware.

use super::{
    AppState,
    error::ApiJson,
};
use crate::{
    core::{
        auth::{self, LoginResponse},
        employee::{self, NewEmployee},
    },
    db::EmployeeView,
    errors::{AuthError, Result},
};
use axum::{
    Extension, Json, Router,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::Response,
    routing::post,
};
use serde::Deserialize;
use tracing::{info, warn};

/// The authenticated caller, inserted into request extensions by [`require_bearer`]
#[derive(Debug, Clone)]
pub struct CurrentEmployee {
    /// Role claim of the presented token
    pub role: String,
    /// Current profile
    pub profile: EmployeeView,
}

/// Login request body
#[derive(Deserialize)]
pub struct LoginRequest {
    /// Login email
    pub email: String,
    /// Plaintext password
    pub password: String,
}

/// Routes reachable without a token.
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
}

/// Auth routes that require a token.
pub fn protected_router() -> Router<AppState> {
    Router::new().route("/logout", post(logout))
}

async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let response = auth::login(&state.db, &state.signer, &request.email, &request.password).await?;
    Ok(Json(response))
}

async fn register(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewEmployee>,
) -> Result<(StatusCode, Json<EmployeeView>)> {
    let profile = employee::create_employee(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Tokens are stateless, so there is nothing to revoke.
async fn logout(Extension(current): Extension<CurrentEmployee>) -> StatusCode {
    info!(employee_id = current.profile.id, role = %current.role, "Employee logged out");
    StatusCode::NO_CONTENT
}

/// Rejects requests without a valid `Authorization: Bearer <token>` header.
///
/// # Errors
/// - `AuthError::MissingCredential` when the header is absent
/// - `AuthError::InvalidToken` for a malformed header, a bad signature or an
///   employee that no longer exists
/// - `AuthError::TokenExpired` once the token's lifetime has passed
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingCredential)?;

    let Some(token) = header_value.strip_prefix("Bearer ") else {
        warn!(uri = %request.uri(), "Malformed authorization header");
        return Err(AuthError::InvalidToken.into());
    };

    let (claims, profile) = auth::validate_token(&state.db, &state.signer, token.trim()).await?;
    request.extensions_mut().insert(CurrentEmployee {
        role: claims.role,
        profile,
    });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::super::test_support::*;
    use crate::errors::Result;
    use crate::test_utils::*;
    use axum::http::{Method, StatusCode};
    use chrono::Utc;
    use serde_json::json;

    #[tokio::test]
    async fn test_liveness_is_public() -> Result<()> {
        let fixture = setup_inventory().await?;
        let app = test_app(&fixture);

        let (status, body) = send(&app, Method::GET, "/", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_str().unwrap().contains("running"));
        Ok(())
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() -> Result<()> {
        let fixture = setup_inventory().await?;
        let app = test_app(&fixture);

        let (status, body) = send(&app, Method::GET, "/assets", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "UNAUTHORIZED");

        let (status, _) = send(&app, Method::GET, "/assets", Some("not-a-jwt"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        Ok(())
    }

    #[tokio::test]
    async fn test_login_returns_token_and_profile() -> Result<()> {
        let fixture = setup_inventory().await?;
        let app = test_app(&fixture);

        let (status, body) = send(
            &app,
            Method::POST,
            "/login",
            None,
            Some(json!({"email": "tech@example.com", "password": TEST_PASSWORD})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["employee"]["id"], fixture.employee.id);
        assert!(body["employee"].get("password_hash").is_none());
        assert!(body["expires_at"].is_string());

        let token = body["token"].as_str().unwrap();
        let (status, _) = send(&app, Method::GET, "/assets", Some(token), None).await;
        assert_eq!(status, StatusCode::OK);
        Ok(())
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() -> Result<()> {
        let fixture = setup_inventory().await?;
        let app = test_app(&fixture);

        let (wrong_status, wrong_body) = send(
            &app,
            Method::POST,
            "/login",
            None,
            Some(json!({"email": "tech@example.com", "password": "wrong"})),
        )
        .await;
        let (unknown_status, unknown_body) = send(
            &app,
            Method::POST,
            "/login",
            None,
            Some(json!({"email": "nobody@example.com", "password": "wrong"})),
        )
        .await;
        assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_status, unknown_status);
        assert_eq!(wrong_body, unknown_body);
        Ok(())
    }

    #[tokio::test]
    async fn test_register_then_duplicate() -> Result<()> {
        let fixture = setup_inventory().await?;
        let app = test_app(&fixture);
        let registration = json!({
            "full_name": "Grace Hopper",
            "position": "Admiral",
            "email": "grace@example.com",
            "password": "cobol",
        });

        let (status, body) =
            send(&app, Method::POST, "/register", None, Some(registration.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["role"], "employee");

        let (status, body) = send(&app, Method::POST, "/register", None, Some(registration)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "CONFLICT");

        // The first registration still authenticates with its own password.
        let (status, _) = send(
            &app,
            Method::POST,
            "/login",
            None,
            Some(json!({"email": "grace@example.com", "password": "cobol"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() -> Result<()> {
        let fixture = setup_inventory().await?;
        let app = test_app(&fixture);

        let (status, body) =
            send(&app, Method::POST, "/login", None, Some(json!({"email": 5}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "INVALID_INPUT");
        Ok(())
    }

    #[tokio::test]
    async fn test_logout_keeps_token_valid() -> Result<()> {
        let fixture = setup_inventory().await?;
        let app = test_app(&fixture);
        let token = login_token(&app, &fixture).await;

        let (status, _) = send(&app, Method::POST, "/logout", Some(&token), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, Method::GET, "/statuses", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        Ok(())
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() -> Result<()> {
        let fixture = setup_inventory().await?;
        let app = test_app(&fixture);
        let issued = test_signer().issue(
            fixture.employee.id,
            "employee",
            Utc::now() - chrono::Duration::hours(3),
        )?;

        let (status, body) = send(&app, Method::GET, "/assets", Some(&issued.token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "token expired");
        Ok(())
    }
}
