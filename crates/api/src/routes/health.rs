//! Liveness endpoint for load balancers and deploy checks.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Newest applied migration, so a deploy can confirm the schema it runs
    /// against. `null` when the database is unreachable.
    pub schema_version: Option<i64>,
}

/// GET /health
///
/// 200 when the database answers, 503 otherwise.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let schema_version = goalboard_db::schema_version(&state.pool).await;
    if let Err(e) = &schema_version {
        tracing::warn!(error = %e, "Health check could not reach the database");
    }
    let db_healthy = schema_version.is_ok();

    let (code, status) = if db_healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
            schema_version: schema_version.ok().flatten(),
        }),
    )
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
