use crate::startup::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// Liveness probe. The service has no backing store, so being up is being healthy.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": state.config.service_name,
        "version": env!("CARGO_PKG_VERSION")
    }))
}
