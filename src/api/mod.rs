//! HTTP boundary - axum router, bearer-token middleware and JSON handlers.
//!
//! Handlers only translate between HTTP and the rule layer in [`crate::core`]; they
//! hold no business logic of their own.

pub mod assets;
pub mod auth;
pub mod departments;
pub mod employees;
pub mod error;
pub mod locations;
pub mod reports;
pub mod statuses;
pub mod transfers;

use crate::core::auth::TokenSigner;
use axum::{Router, middleware, routing::get};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Store connection pool
    pub db: DatabaseConnection,
    /// Token signer built from the auth settings
    pub signer: Arc<TokenSigner>,
}

impl AppState {
    /// Bundles a connection and a signer.
    #[must_use]
    pub fn new(db: DatabaseConnection, signer: TokenSigner) -> Self {
        Self {
            db,
            signer: Arc::new(signer),
        }
    }
}

async fn liveness() -> &'static str {
    "Asset tracking API is running"
}

/// Builds the complete application.
///
/// `/`, `/login` and `/register` are public; every other route requires a valid
/// bearer token.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(auth::protected_router())
        .nest("/assets", assets::router())
        .nest("/statuses", statuses::router())
        .nest("/employees", employees::router())
        .nest("/departments", departments::router())
        .nest("/locations", locations::router())
        .nest("/transfers", transfers::router())
        .nest("/reports", reports::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ));

    Router::new()
        .route("/", get(liveness))
        .merge(auth::public_router())
        .merge(protected)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Helpers for driving the router in tests.
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::config::settings::AuthSettings;
    use crate::test_utils::{Inventory, TEST_PASSWORD, init_test_tracing};
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    /// Signer used by every router test
    pub fn test_signer() -> TokenSigner {
        TokenSigner::new(&AuthSettings {
            secret_key: "router-test-secret".to_string(),
            token_expiry: chrono::Duration::hours(1),
        })
    }

    /// Router over the fixture's database
    pub fn test_app(fixture: &Inventory) -> Router {
        init_test_tracing();
        router(AppState::new(fixture.db.clone(), test_signer()))
    }

    /// Sends one request and returns the status and the parsed JSON body
    /// (`Value::Null` for an empty body).
    pub async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    /// Logs the fixture employee in and returns the token.
    pub async fn login_token(app: &Router, fixture: &Inventory) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/login",
            None,
            Some(serde_json::json!({
                "email": fixture.employee.email,
                "password": TEST_PASSWORD,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }
}
