use anyhow::{Context, Result};
use common::RepositoryCatalog;
use moka::future::Cache;
use serde::Deserialize;
use std::{path::{Path, PathBuf}, sync::Arc, time::Duration};
use tracing::{debug, info};

use crate::schemas::AppState;
use crate::upstream::UpstreamClient;

/// Prefix of environment variables overriding settings, e.g. `DASHBOARD_UPSTREAM_URL`.
pub const ENV_PREFIX: &str = "DASHBOARD";

/// Server settings.
///
/// Sources, later ones winning: built-in defaults, an optional config file,
/// `DASHBOARD_*` environment variables, command line flags.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Format: IP:PORT (e.g., 0.0.0.0:3000)
    pub bind_address: String,
    /// Base URL of the forecasting service; `/api/github` is appended
    pub upstream_url: String,
    /// Timeout for upstream requests and for whole API requests
    pub request_timeout_secs: u64,
    /// How long upstream responses are reused; 0 disables the cache
    pub cache_ttl_secs: u64,
    pub cache_capacity: u64,
    /// Directory holding the built frontend bundle
    pub static_dir: PathBuf,
    /// Repositories offered by the dashboard
    pub catalog: RepositoryCatalog,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            upstream_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 30,
            cache_ttl_secs: 300,
            cache_capacity: 64,
            static_dir: PathBuf::from("workspace/frontend/dist"),
            catalog: RepositoryCatalog::default(),
        }
    }
}

impl Settings {
    /// Load settings from an optional file and the environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = config_path {
            debug!("Reading configuration file {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX).try_parsing(true),
        );

        let settings: Settings = builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        Ok(settings)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Initialize application state from settings
pub fn initialize_app_state(settings: Settings) -> Result<AppState> {
    info!("Forwarding forecast requests to {}", settings.upstream_url);
    let upstream = UpstreamClient::new(&settings.upstream_url, settings.request_timeout())
        .context("Failed to build forecasting service client")?;

    let cache = if settings.cache_ttl_secs > 0 {
        Some(
            Cache::builder()
                .max_capacity(settings.cache_capacity)
                .time_to_live(Duration::from_secs(settings.cache_ttl_secs))
                .build(),
        )
    } else {
        info!("Response cache disabled");
        None
    };

    Ok(AppState {
        settings: Arc::new(settings),
        upstream,
        cache,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.bind_address, "0.0.0.0:3000");
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
        assert_eq!(settings.catalog.len(), 11);
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("forecast-dashboard-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("dashboard.toml");
        std::fs::write(
            &path,
            r#"
upstream_url = "http://forecast.internal:9000"
cache_ttl_secs = 0

[catalog]
default_key = "pallets/flask"

[[catalog.repositories]]
key = "d3/d3"
label = "D3"

[[catalog.repositories]]
key = "pallets/flask"
label = "Flask"
"#,
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.upstream_url, "http://forecast.internal:9000");
        assert_eq!(settings.cache_ttl_secs, 0);
        assert_eq!(settings.bind_address, "0.0.0.0:3000");
        assert_eq!(settings.request_timeout_secs, 30);
        assert_eq!(settings.catalog.len(), 2);
        assert_eq!(settings.catalog.default_option().label, "Flask");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = Settings::load(Some(Path::new("/nonexistent/dashboard.toml")));
        assert!(result.is_err());
    }
}
