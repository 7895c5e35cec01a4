//! Liveness endpoint, mounted at the root rather than under `/api/v1`.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when every dependency is reachable, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Whether the cover directory exists (it is created on first upload).
    pub covers_dir_present: bool,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = gamezone_db::health_check(&state.pool).await.is_ok();
    let covers_dir_present = tokio::fs::try_exists(state.covers.root())
        .await
        .unwrap_or(false);

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        covers_dir_present,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
