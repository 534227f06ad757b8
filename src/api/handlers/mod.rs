//! Route handlers, one module per resource

pub mod auth;
pub mod comments;
pub mod tickets;
pub mod users;

use axum::Json;

/// Liveness probe, no authentication
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
