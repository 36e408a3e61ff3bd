//! HTTP surface for the metadata resolver.
//!
//! A deliberately small JSON API intended to sit behind a bookmark-saving
//! frontend: the client submits a URL, the service answers with a display
//! title and an absolute favicon URL.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/metadata` | Resolve `{ "url": … }` into `{ "title", "favicon" }` |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! - Missing or empty `url` → `400 { "error": "URL is required" }`
//! - Invalid URL or any downstream failure →
//!   `500 { "error": <message>, "details": <guidance> }`
//!
//! No internal error type or transport stack trace crosses this boundary;
//! every failure resolves to one of the shapes above for that request.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so browser frontends
//! can call the service directly; preflight requests are acknowledged by
//! the CORS layer.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::fetch;
use crate::models::{MetadataRequest, PageMetadata};
use crate::resolver;

/// Fixed guidance string attached to every 500 response.
const FAILURE_GUIDANCE: &str = "The metadata service failed to process your URL. Please verify the URL is accessible and try again.";

/// Shared application state passed to route handlers via Axum's `State`
/// extractor. The reqwest client is built once and reused; it is cheaply
/// cloneable and internally pooled.
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    client: reqwest::Client,
}

/// Build the router with all routes, CORS, and shared state.
///
/// Split out from [`run_server`] so tests can mount the app on an
/// ephemeral port.
pub fn app(config: &Config) -> anyhow::Result<Router> {
    let client = fetch::build_client(&config.fetch)?;
    let state = AppState {
        config: Arc::new(config.clone()),
        client,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Ok(Router::new()
        .route("/metadata", post(handle_metadata))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state))
}

/// Start the metadata HTTP service.
///
/// Binds to the address configured in `[server].bind` and serves until
/// the process is terminated. Individual request failures are converted
/// to structured responses; nothing here is fatal to the process.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let app = app(config)?;

    tracing::info!("metadata service listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

/// JSON error body. `details` is present on 500s only, matching the
/// documented error contract.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    error: String,
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.error,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

/// 400 for a request without a usable `url` field.
fn missing_url() -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        error: "URL is required".to_string(),
        details: None,
    }
}

/// 500 with the fixed guidance string, for validation and downstream
/// failures alike.
fn service_error(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        error: message.into(),
        details: Some(FAILURE_GUIDANCE.to_string()),
    }
}

// ============ GET /health ============

/// JSON response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Handler for `GET /health`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ POST /metadata ============

/// Handler for `POST /metadata`.
///
/// The body is deserialized by hand rather than through the `Json`
/// extractor so a malformed body still yields the JSON 500 shape instead
/// of a framework plain-text rejection.
async fn handle_metadata(
    State(state): State<AppState>,
    body: axum::body::Bytes,
) -> Result<Json<PageMetadata>, AppError> {
    let request: MetadataRequest = serde_json::from_slice(&body)
        .map_err(|e| service_error(format!("Invalid request body: {}", e)))?;

    // An empty string is treated the same as a missing field.
    let url = match request.url.as_deref() {
        Some(url) if !url.is_empty() => url,
        _ => return Err(missing_url()),
    };

    let metadata = resolver::resolve_metadata(&state.client, &state.config.fetch, url)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "metadata resolution failed");
            service_error(e.to_string())
        })?;

    Ok(Json(metadata))
}
