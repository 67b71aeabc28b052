pub mod extract;
pub mod health;

pub use extract::*;
pub use health::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::middleware::logging_middleware;
use crate::services::ExtractorClient;

#[derive(Clone)]
pub struct AppState {
    pub extractor: ExtractorClient,
}

/// Build the application router. `main` adds the transport-level layers
/// (body limit, CORS, tracing) on top.
pub fn create_router(extractor: ExtractorClient) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/extract", post(extract_handler))
        .layer(axum::middleware::from_fn(logging_middleware))
        .with_state(AppState { extractor })
}
