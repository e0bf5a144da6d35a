use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Service name reported by the root and health endpoints.
pub const SERVICE_NAME: &str = "autoux-backend";

/// Root endpoint payload.
#[derive(Serialize)]
pub struct RootResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

/// GET / -- service identity.
async fn root_info() -> Json<RootResponse> {
    Json(RootResponse {
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
    })
}

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the hosted database is configured and reachable.
    pub database: bool,
    /// Whether an LLM client is configured.
    pub ai_available: bool,
}

/// GET /health -- service, database, and LLM health.
///
/// The database flag reflects a live probe; the server still answers
/// (degraded) when either collaborator is down, so status is `degraded`
/// rather than an error.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match &state.db {
        Some(db) => autoux_db::catalog::health_check(db.as_ref()).await.is_ok(),
        None => false,
    };
    let ai_available = state.llm.is_some();

    let status = if database && ai_available {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database,
        ai_available,
    })
}

/// Mount root-level routes (`/` and `/health`, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root_info))
        .route("/health", get(health_check))
}
