use axum::{extract::State, response::Json};
use serde_json::{json, Value};
use tracing::info;

use crate::error::AppResult;
use crate::handlers::AppState;

/// Health check endpoint
pub async fn health_handler(State(state): State<AppState>) -> AppResult<Json<Value>> {
    info!("Health check requested");

    let response = json!({
        "status": "healthy",
        "service": "distill",
        "version": env!("CARGO_PKG_VERSION"),
        "extractor_url": state.extractor.base_url(),
    });

    Ok(Json(response))
}
