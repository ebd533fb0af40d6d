//! Router configuration for the Web API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    download_file, file_info, list_files, permanent_delete_file, restore_file, trash_file,
    upload_file, AppState,
};
use super::middleware::create_cors_layer;

/// Headroom on top of the upload ceiling for multipart framing overhead.
const BODY_LIMIT_SLACK: u64 = 64 * 1024;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let body_limit = (app_state.max_upload_size + BODY_LIMIT_SLACK) as usize;

    let file_routes = Router::new()
        .route("/upload", post(upload_file))
        .route("/", get(list_files))
        .route("/download/:key", get(download_file))
        .route("/delete/:key", delete(trash_file))
        .route("/restore/:key", post(restore_file))
        .route("/permanent/:key", delete(permanent_delete_file))
        .route("/info/:key", get(file_info));

    let api_routes = Router::new().nest("/files", file_routes);

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
