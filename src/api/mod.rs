//! API module for handling HTTP requests and responses

#[cfg(feature = "web")]
pub mod extract;
#[cfg(feature = "web")]
pub mod handlers;
#[cfg(feature = "web")]
pub(crate) mod responses;

#[cfg(feature = "web")]
use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::{HeaderName, Request},
    routing::{get, post},
    Router,
};
#[cfg(feature = "web")]
use std::sync::Arc;
#[cfg(feature = "web")]
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeFile,
    trace::TraceLayer,
};
#[cfg(feature = "web")]
use crate::state::AppState;

#[cfg(feature = "web")]
pub use handlers::*;

#[cfg(feature = "web")]
const REQUEST_ID_HEADER: &str = "x-request-id";

#[cfg(feature = "web")]
/// Create the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let static_dir = &state.config.static_dir;
    let max_upload_size = state.config.max_upload_size;

    Router::new()
        .route("/health", get(health_check))
        // Item records
        .route("/register", post(register_item))
        .route("/inventory", get(list_items))
        .route(
            "/inventory/:id",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/inventory/:id/photo", get(get_photo).put(replace_photo))
        .route("/search", post(search_item))
        // Static forms and the OpenAPI document
        .route_service(
            "/RegisterForm.html",
            ServeFile::new(static_dir.join("RegisterForm.html")),
        )
        .route_service(
            "/SearchForm.html",
            ServeFile::new(static_dir.join("SearchForm.html")),
        )
        .route_service(
            "/docs/openapi.yaml",
            ServeFile::new(static_dir.join("openapi.yaml")),
        )
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_size))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %req.method(),
                    uri = %req.uri(),
                    request_id = req
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-"),
                )
            }),
        )
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

#[cfg(feature = "web")]
/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}
