pub mod schemas;
pub mod upload;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use intake_ingest::Uploader;

/// Shared application state available to the handler.
#[derive(Clone)]
pub struct AppState {
    /// The upload pipeline.
    pub uploader: Arc<Uploader>,
    /// Request body cap. `None` disables the limit.
    pub max_body_bytes: Option<usize>,
}

/// Build the Axum router: `POST /upload` with tracing and permissive CORS.
pub fn router(state: AppState) -> Router {
    let body_limit = match state.max_body_bytes {
        Some(max) => DefaultBodyLimit::max(max),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route("/upload", post(upload::upload))
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
