use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and which collaborators are live.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "skillpath-api",
        "llm": if state.config.anthropic_api_key.is_some() { "enabled" } else { "disabled" },
        "profileStore": if state.config.redis_url.is_some() { "redis" } else { "memory" },
    }))
}
