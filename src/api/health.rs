use axum::response::Json;
use serde_json::{Value, json};

/// Liveness probe for the redirect listener.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
