//! HTTP Handlers

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tower_http::trace::TraceLayer;

use finder_core::CommandCall;

use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database_connected: bool,
    pub lookup_networks: Vec<String>,
    pub etherscan_configured: bool,
}

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    /// Caller identity, vouched for by the bearer of the API token
    pub user_id: i64,
    /// Raw message, e.g. `/scan_address btc 1A1zP1...`
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub reply: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: &str, code: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/command", post(command_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        database_connected: state.store.ping().await,
        lookup_networks: state
            .explorer
            .supported_networks()
            .iter()
            .map(ToString::to_string)
            .collect(),
        etherscan_configured: state.etherscan_configured,
    })
}

/// Require `Authorization: Bearer <COMMAND_API_TOKEN>`
fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let expected = state.command_api_token.as_deref().ok_or_else(|| {
        api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "Command API not configured",
            "COMMAND_API_DISABLED",
        )
    })?;

    let presented = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default();

    if bool::from(presented.as_bytes().ct_eq(expected.as_bytes())) {
        Ok(())
    } else {
        tracing::warn!("Rejected /api/command request with missing or invalid token");
        Err(api_error(
            StatusCode::UNAUTHORIZED,
            "Missing or invalid API token",
            "UNAUTHORIZED",
        ))
    }
}

/// Run one command on behalf of a trusted integration
pub async fn command_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CommandRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    authorize(&state, &headers)?;

    let unknown = || api_error(StatusCode::NOT_FOUND, "Not a known command", "UNKNOWN_COMMAND");

    let call = CommandCall::parse(&payload.text, payload.user_id).ok_or_else(unknown)?;
    let reply = state.registry.dispatch(&call).await.ok_or_else(unknown)?;

    Ok(Json(CommandResponse { reply }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::Request,
    };
    use tower::ServiceExt;
    use wallet_finder::{build_registry, CommandOptions, MockExplorerClient, SqliteWalletStore};

    const TOKEN: &str = "test-token";

    async fn app_with_token(token: Option<&str>) -> Router {
        let store = Arc::new(SqliteWalletStore::open("sqlite::memory:").await.unwrap());
        let explorer: Arc<dyn wallet_finder::ExplorerClient> = Arc::new(MockExplorerClient::new());
        let registry = build_registry(store.clone(), explorer.clone(), CommandOptions::default());

        router(AppState {
            registry: Arc::new(registry),
            store,
            explorer,
            etherscan_configured: false,
            command_api_token: token.map(Arc::from),
        })
    }

    async fn app() -> Router {
        app_with_token(Some(TOKEN)).await
    }

    async fn post_command_as(
        app: Router,
        authorization: Option<&str>,
        user_id: i64,
        text: &str,
    ) -> (StatusCode, serde_json::Value) {
        let body = serde_json::json!({ "user_id": user_id, "text": text }).to_string();
        let mut request = Request::builder()
            .method("POST")
            .uri("/api/command")
            .header("content-type", "application/json");
        if let Some(value) = authorization {
            request = request.header("authorization", value);
        }

        let response = app
            .oneshot(request.body(Body::from(body)).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_command(app: Router, user_id: i64, text: &str) -> (StatusCode, serde_json::Value) {
        post_command_as(app, Some("Bearer test-token"), user_id, text).await
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .await
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["database_connected"], true);
        assert_eq!(json["lookup_networks"], serde_json::json!(["BTC", "ETH"]));
        assert_eq!(json["etherscan_configured"], false);
    }

    #[tokio::test]
    async fn test_command_roundtrip() {
        let app = app().await;

        let (status, json) = post_command(app.clone(), 5, "/add_address btc 1A1zP1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["reply"], "✅ Wallet 1A1zP1 on BTC added!");

        let (_, json) = post_command(app, 5, "/list_wallets").await;
        assert_eq!(json["reply"], "💼 Your wallets:\n1. [BTC] 1A1zP1");
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let (status, json) = post_command(app().await, 5, "/withdraw everything").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["code"], "UNKNOWN_COMMAND");

        let (status, _) = post_command(app().await, 5, "hello").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_command_requires_token() {
        let app = app().await;
        post_command(app.clone(), 5, "/add_address btc 1A1zP1").await;

        let (status, json) = post_command_as(app.clone(), None, 5, "/list_wallets").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["code"], "UNAUTHORIZED");

        let (status, _) = post_command_as(app.clone(), Some("Bearer wrong-token"), 5, "/delete_wallet 1").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = post_command_as(app.clone(), Some("test-token"), 5, "/list_wallets").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        // Rejected requests did not touch the store
        let (_, json) = post_command(app, 5, "/list_wallets").await;
        assert_eq!(json["reply"], "💼 Your wallets:\n1. [BTC] 1A1zP1");
    }

    #[tokio::test]
    async fn test_command_disabled_without_token() {
        let app = app_with_token(None).await;

        let (status, json) = post_command_as(app.clone(), None, 5, "/list_wallets").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["code"], "COMMAND_API_DISABLED");

        let (status, _) = post_command_as(app, Some("Bearer "), 5, "/list_wallets").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
