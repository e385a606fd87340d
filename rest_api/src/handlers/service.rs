// rest_api/src/handlers/service.rs

use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

// Handler for GET /api/health
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "message": "clinic API is healthy" })),
    )
}

// Handler for GET /api/version
pub async fn version() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "version": env!("CARGO_PKG_VERSION"), "api_level": 1 })),
    )
}
