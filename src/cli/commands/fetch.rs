use anyhow::{bail, Result};
use common::GithubRequest;
use tracing::{info, warn};
use validator::Validate;

use crate::config::Settings;
use crate::upstream::UpstreamClient;

pub async fn fetch_stats(settings: &Settings, repository: &str) -> Result<()> {
    let request = GithubRequest::new(repository);
    if request.validate().is_err() {
        bail!("Repository must be in owner/name form, got '{}'", repository);
    }

    if settings.catalog.find(repository).is_none() {
        warn!("{} is not in the configured catalog", repository);
    }

    let client = UpstreamClient::new(&settings.upstream_url, settings.request_timeout())?;
    info!("Requesting stats for {} from {}", repository, client.stats_url());

    let stats = client.fetch_stats(&request).await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
