use common::StalePolicy;
use log::Level;
use web_sys::window;

const STORAGE_PREFIX: &str = "forecast_";

/// Global application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Base URL prepended to API paths; empty means same origin
    pub api_base_url: String,

    /// Default log level for the application
    pub log_level: Level,

    /// Enable debug mode
    pub debug_mode: bool,

    /// What to do with responses for a repository that is no longer selected
    pub stale_policy: StalePolicy,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            log_level: Level::Info,
            debug_mode: false,
            stale_policy: StalePolicy::default(),
        }
    }
}

fn storage_key(name: &str) -> String {
    format!("{}{}", STORAGE_PREFIX, name)
}

fn parse_level(value: &str) -> Option<Level> {
    match value.to_lowercase().as_str() {
        "error" => Some(Level::Error),
        "warn" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        "trace" => Some(Level::Trace),
        _ => None,
    }
}

fn parse_policy(value: &str) -> Option<StalePolicy> {
    match value.to_lowercase().as_str() {
        "discard_superseded" => Some(StalePolicy::DiscardSuperseded),
        "last_resolved_wins" => Some(StalePolicy::LastResolvedWins),
        _ => None,
    }
}

impl AppSettings {
    /// Create settings from window location and localStorage overrides
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        let Some(window) = window() else {
            return settings;
        };

        if let Ok(hostname) = window.location().hostname() {
            settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";

            // In development, use more verbose logging
            if settings.debug_mode {
                settings.log_level = Level::Debug;
            }
        }

        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(base)) = storage.get_item(&storage_key("api_base_url")) {
                settings.api_base_url = base.trim_end_matches('/').to_string();
            }

            if let Ok(Some(level)) = storage.get_item(&storage_key("log_level")) {
                settings.log_level = parse_level(&level).unwrap_or(settings.log_level);
            }

            if let Ok(Some(policy)) = storage.get_item(&storage_key("stale_policy")) {
                settings.stale_policy = parse_policy(&policy).unwrap_or(settings.stale_policy);
            }
        }

        settings
    }

    /// Get the full API URL for an endpoint
    pub fn api_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_base_url, endpoint)
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::default());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}
