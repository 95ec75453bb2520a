//! Liveness endpoint.

use axum::Json;

/// GET /health - Simple health check endpoint (no auth required).
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
