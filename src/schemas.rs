use common::{GithubRequest, RepositoryOption};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::config::Settings;
use crate::upstream::UpstreamClient;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub settings: Arc<Settings>,
    /// Forecasting service client
    pub upstream: UpstreamClient,
    /// Upstream responses keyed by repository; `None` when caching is disabled
    pub cache: Option<Cache<String, Value>>,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Forecasting service base URL
    pub upstream: String,
}

/// Repositories offered by the dashboard
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RepositoriesResponse {
    pub repositories: Vec<RepositoryOption>,
    /// Key selected when the dashboard opens
    pub default_key: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::github::github_stats,
        crate::handlers::repositories::list_repositories,
    ),
    components(
        schemas(
            GithubRequest,
            RepositoryOption,
            RepositoriesResponse,
            ErrorResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "forecast", description = "Repository statistics and forecasts"),
    ),
    info(
        title = "Forecast Dashboard API",
        description = "Serves the forecast dashboard and forwards statistics requests to the forecasting service",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
