use axum::{extract::State, response::Json};
use axum_valid::Valid;
use common::GithubRequest;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::error::ApiError;
use crate::schemas::AppState;

/// Statistics and forecast chart URLs for one repository.
///
/// The body is forwarded to the forecasting service and its JSON answer is
/// returned as is. Answers are cached per repository when caching is enabled.
#[utoipa::path(
    post,
    path = "/api/github",
    tag = "forecast",
    request_body = GithubRequest,
    responses(
        (status = 200, description = "Stats payload from the forecasting service", content_type = "application/json"),
        (status = 400, description = "Repository is not in owner/name form"),
        (status = 502, description = "Forecasting service failed", body = crate::schemas::ErrorResponse),
        (status = 504, description = "Forecasting service timed out", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip_all, fields(repository = %request.repository))]
pub async fn github_stats(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<GithubRequest>>,
) -> Result<Json<Value>, ApiError> {
    if let Some(cache) = &state.cache {
        if let Some(stats) = cache.get(&request.repository).await {
            debug!("Serving stats from cache");
            return Ok(Json(stats));
        }
    }

    let stats = state.upstream.fetch_stats(&request).await?;
    info!("Stats retrieved from forecasting service");

    if let Some(cache) = &state.cache {
        cache.insert(request.repository.clone(), stats.clone()).await;
    }

    Ok(Json(stats))
}
