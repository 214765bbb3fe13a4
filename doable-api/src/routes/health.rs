/// Health check endpoint

use axum::Json;
use serde_json::{json, Value};

/// Liveness probe
///
/// `GET /health` - returns 200 with the service name and version. Does not
/// touch the store.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "doable-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
