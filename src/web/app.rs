use super::{MAX_UPLOAD_SIZE_BYTES, SharedImageRepository, handlers};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::Level;

pub fn create_app(repository: SharedImageRepository) -> Router {
    // Configure the router with all API endpoints
    Router::new()
        // Ingest
        .route("/upload", post(handlers::upload_image))
        // Read-side endpoints
        .route("/preview/{filename}", get(handlers::preview_image))
        .route("/list", get(handlers::list_images))
        // Download endpoints
        .route("/download_multi", post(handlers::download_multiple))
        .route("/download_single", post(handlers::download_single))
        // Apply a layer to limit the maximum size of request bodies
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE_BYTES))
        // Add CORS layer for broader client compatibility
        .layer(CorsLayer::permissive())
        // Add tracing for HTTP requests and responses
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::new().level(Level::INFO)))
        // Provide the shared state
        .with_state(repository)
}
