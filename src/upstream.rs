//! Client for the external forecasting service.

use common::{GithubRequest, GITHUB_STATS_PATH};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, trace};

use crate::error::ApiError;

/// Forwards stats requests to the forecasting service.
#[derive(Clone, Debug)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn stats_url(&self) -> String {
        format!("{}{}", self.base_url, GITHUB_STATS_PATH)
    }

    /// POST the request upstream and return its JSON body untouched.
    #[instrument(skip(self), fields(repository = %request.repository))]
    pub async fn fetch_stats(&self, request: &GithubRequest) -> Result<Value, ApiError> {
        let url = self.stats_url();
        debug!("POST request to: {}", url);

        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::UpstreamStatus {
                status: status.as_u16(),
                message: body,
            });
        }

        trace!("Response received, parsing JSON ({} bytes)", body.len());
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_url_strips_trailing_slash() {
        let client = UpstreamClient::new("http://localhost:8080/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.stats_url(), "http://localhost:8080/api/github");
    }
}
