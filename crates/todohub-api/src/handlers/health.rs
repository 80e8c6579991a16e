//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match state.repositories.health_check().await {
        Ok(up) => up,
        Err(e) => {
            warn!(error = %e, "Database health check failed");
            false
        }
    };
    let cache = match state.cache.health_check().await {
        Ok(up) => up,
        Err(e) => {
            warn!(error = %e, "Cache health check failed");
            false
        }
    };

    let status = if database && cache {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let label = |up: bool| if up { "up" } else { "down" };

    (
        status,
        Json(HealthResponse {
            status: if status == StatusCode::OK { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            database: label(database),
            cache: label(cache),
        }),
    )
}
