//! Repository catalog shown in the dashboard sidebar.
//!
//! The catalog is a plain value so the server can load it from configuration
//! and the frontend can receive it as a component property. `Default` yields the
//! list the forecasting service has precomputed data for.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One selectable repository.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct RepositoryOption {
    /// `owner/name` identifier sent to the forecasting service
    pub key: String,
    /// Display name
    pub label: String,
}

impl RepositoryOption {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Key of the repository selected when the dashboard first mounts.
pub const DEFAULT_REPOSITORY_KEY: &str = "angular/angular";

const DEFAULT_REPOSITORIES: [(&str, &str); 11] = [
    ("golang/go", "Go"),
    ("google/go-github", "Go Github"),
    ("angular/angular", "Angular"),
    ("angular/material", "Angular Material"),
    ("angular/angular-cli", "Angular CLI"),
    ("SebastianM/angular-google-maps", "Angular Google Maps"),
    ("d3/d3", "D3"),
    ("facebook/react", "React"),
    ("tensorflow/tensorflow", "Tensorflow"),
    ("keras-team/keras", "Keras"),
    ("pallets/flask", "Flask"),
];

/// Errors raised when building a catalog from configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("repository catalog is empty")]
    Empty,
    #[error("duplicate repository key: {0}")]
    DuplicateKey(String),
    #[error("default repository {0} is not part of the catalog")]
    UnknownDefault(String),
}

/// Ordered, immutable list of repository options plus the initial selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawCatalog")]
pub struct RepositoryCatalog {
    repositories: Vec<RepositoryOption>,
    default_key: String,
}

#[derive(Deserialize)]
struct RawCatalog {
    repositories: Vec<RepositoryOption>,
    #[serde(default)]
    default_key: Option<String>,
}

impl TryFrom<RawCatalog> for RepositoryCatalog {
    type Error = CatalogError;

    fn try_from(raw: RawCatalog) -> Result<Self, Self::Error> {
        Self::new(raw.repositories, raw.default_key.as_deref())
    }
}

impl Default for RepositoryCatalog {
    fn default() -> Self {
        Self {
            repositories: DEFAULT_REPOSITORIES
                .iter()
                .map(|(key, label)| RepositoryOption::new(*key, *label))
                .collect(),
            default_key: DEFAULT_REPOSITORY_KEY.to_string(),
        }
    }
}

impl RepositoryCatalog {
    /// Build a catalog, rejecting empty lists, duplicate keys and a default
    /// that is not in the list. When `default_key` is `None` the first entry
    /// becomes the initial selection.
    pub fn new(
        repositories: Vec<RepositoryOption>,
        default_key: Option<&str>,
    ) -> Result<Self, CatalogError> {
        let first = repositories.first().ok_or(CatalogError::Empty)?;
        let default_key = default_key.unwrap_or(&first.key).to_string();

        for (idx, option) in repositories.iter().enumerate() {
            if repositories[..idx].iter().any(|o| o.key == option.key) {
                return Err(CatalogError::DuplicateKey(option.key.clone()));
            }
        }

        if !repositories.iter().any(|o| o.key == default_key) {
            return Err(CatalogError::UnknownDefault(default_key));
        }

        Ok(Self {
            repositories,
            default_key,
        })
    }

    pub fn repositories(&self) -> &[RepositoryOption] {
        &self.repositories
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }

    pub fn find(&self, key: &str) -> Option<&RepositoryOption> {
        self.repositories.iter().find(|o| o.key == key)
    }

    /// The option selected before any user interaction.
    pub fn default_option(&self) -> &RepositoryOption {
        // `new` guarantees the default key is present
        self.find(&self.default_key)
            .unwrap_or(&self.repositories[0])
    }
}
