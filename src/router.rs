use crate::handlers::{
    github::github_stats, health::health_check, repositories::list_repositories,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use common::GITHUB_STATS_PATH;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let static_dir = state.settings.static_dir.clone();
    // Leave room for the upstream client to time out first and answer 504
    let timeout = state.settings.request_timeout() + Duration::from_secs(5);

    // Unknown paths get index.html so the frontend can boot from any URL
    let frontend = ServeDir::new(&static_dir)
        .not_found_service(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Forecast API
        .route(GITHUB_STATS_PATH, post(github_stats))
        .route("/api/repositories", get(list_repositories))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Frontend bundle
        .fallback_service(frontend)
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(timeout))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
