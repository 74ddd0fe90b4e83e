//! Service health endpoint.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

/// Liveness report returned by `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Reporting service.
    pub service: &'static str,
    /// Always `healthy` while the process is up.
    pub status: &'static str,
    /// Crate version baked in at build time.
    pub version: &'static str,
}

/// Report process liveness. Backends are not probed here.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: "notedrop",
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates the health routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_reports_healthy() {
        let Json(response) = health_check().await;
        assert_eq!(response.service, "notedrop");
        assert_eq!(response.status, "healthy");
        assert!(!response.version.is_empty());
    }
}
