//! Axum router construction.
//!
//! Builds the application router with the API routes, middleware layers,
//! and the static image directory.

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::context::AppContext;
use crate::middleware::request_id::request_id_middleware;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::auth::login,
        routes::images::home,
        routes::images::about,
        routes::images::work,
        routes::images::get_by_id,
        routes::images::get_by_page_and_id,
        routes::uploads::upload_image,
        routes::uploads::update_image,
    ),
    components(schemas(
        routes::auth::LoginRequest,
        routes::auth::LoginResponse,
        routes::auth::UserResponse,
        crate::gallery::ImageResponse,
        crate::gallery::HomeImages,
        crate::gallery::AboutImages,
        crate::gallery::WorkImages,
        routes::images::PageImageResponse,
        routes::uploads::UploadResponse,
        routes::uploads::UploadForm,
    ))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/login", post(routes::auth::login))
        .route("/images/home", get(routes::images::home))
        .route("/images/about", get(routes::images::about))
        .route("/images/work", get(routes::images::work))
        .route("/images/upload", post(routes::uploads::upload_image))
        .route(
            "/images/{id}",
            get(routes::images::get_by_id).put(routes::uploads::update_image),
        )
        .route(
            "/images/{page}/{id}",
            get(routes::images::get_by_page_and_id),
        )
        .method_not_allowed_fallback(routes::fallback::method_not_allowed)
        .fallback(routes::fallback::not_found)
        .layer(DefaultBodyLimit::max(ctx.config.server.max_upload_bytes));

    let mut app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api", api);

    if let Some(dir) = ctx.config.server.static_dir.as_ref() {
        if dir.is_dir() {
            tracing::info!("Serving static images from {}", dir.display());
            app = app.nest_service("/images", ServeDir::new(dir));
        } else {
            tracing::debug!("Static image directory {} not found; skipping", dir.display());
        }
    }

    app.layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
