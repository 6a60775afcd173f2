use common::{FetchError, FetchTicket, StatsPayload, GITHUB_STATS_PATH};
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use crate::settings;

/// Common POST request handler
pub async fn post<T, B>(endpoint: &str, body: &B) -> Result<T, FetchError>
where
    T: for<'de> Deserialize<'de>,
    B: Serialize,
{
    let url = settings::get_settings().api_url(endpoint);
    log::debug!("POST request to: {}", url);

    let response = Request::post(&url)
        .json(body)
        .map_err(|e| {
            log::error!("POST {} - Failed to serialize request: {}", endpoint, e);
            FetchError::Transport(e.to_string())
        })?
        .send()
        .await
        .map_err(|e| {
            log::error!("POST {} - Request failed: {}", endpoint, e);
            FetchError::Transport(e.to_string())
        })?;

    if !response.ok() {
        log::error!("POST {} - HTTP error: {}", endpoint, response.status());
        return Err(FetchError::Status(response.status()));
    }

    log::trace!("POST {} - Response received, parsing JSON", endpoint);
    let data: T = response.json().await.map_err(|e| {
        log::error!("POST {} - Failed to parse response: {}", endpoint, e);
        FetchError::Decode(e.to_string())
    })?;

    log::info!("POST {} - Success", endpoint);
    Ok(data)
}

/// Request the statistics and forecasts for the repository of `ticket`.
pub async fn fetch_repository_stats(ticket: &FetchTicket) -> Result<StatsPayload, FetchError> {
    log::debug!(
        "Fetching stats for {} (request #{})",
        ticket.repository,
        ticket.generation
    );
    post(GITHUB_STATS_PATH, &ticket.request()).await
}
