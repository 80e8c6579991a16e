//! Per-request access log.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, info, warn};

/// Logs method, path, status, and duration of every request.
///
/// Server errors are logged at `warn`; health probes at `debug` so they do
/// not drown the log.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status().as_u16();
    let duration_ms = started.elapsed().as_millis() as u64;

    if response.status().is_server_error() {
        warn!(%method, %path, status, duration_ms, "Request failed");
    } else if path == "/health" {
        debug!(%method, %path, status, duration_ms, "Health probe");
    } else {
        info!(%method, %path, status, duration_ms, "Request handled");
    }

    response
}
