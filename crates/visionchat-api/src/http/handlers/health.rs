//! GET /health

use axum::Json;
use axum::extract::State;
use visionchat_core::llm::provider::MultimodalProvider;

use crate::state::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "model": state.assistant.provider().model(),
    }))
}
