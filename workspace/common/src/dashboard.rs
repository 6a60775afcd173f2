//! Dashboard selection and fetch state.
//!
//! [`DashboardState`] owns the catalog, the current selection and the
//! [`FetchState`] of the most recent request. Selecting a repository returns a
//! [`FetchTicket`]; the caller performs the request and hands the outcome back
//! through [`DashboardState::resolve`] together with the ticket.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::{RepositoryCatalog, RepositoryOption};
use crate::payload::{GithubRequest, StatsPayload};

/// Why a stats request produced no payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("HTTP error: {0}")]
    Status(u16),
    #[error("failed to parse response: {0}")]
    Decode(String),
}

/// Status of the most recent stats request.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState {
    #[default]
    Loading,
    Loaded(StatsPayload),
    /// The request failed; rendered exactly like a payload with no fields.
    Empty,
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Payload of a successful fetch.
    pub fn data(&self) -> Option<&StatsPayload> {
        match self {
            Self::Loaded(payload) => Some(payload),
            _ => None,
        }
    }
}

/// What to do with a result whose request has been superseded by a newer
/// selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Drop results of superseded requests; only the current ticket settles
    /// the view.
    #[default]
    DiscardSuperseded,
    /// Apply every result in arrival order, so a slow response for an earlier
    /// selection can overwrite a newer one.
    LastResolvedWins,
}

/// Identifies one dispatched request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    pub generation: u64,
    pub repository: String,
}

impl FetchTicket {
    pub fn request(&self) -> GithubRequest {
        GithubRequest::new(self.repository.clone())
    }
}

/// Selection plus fetch status of the dashboard view.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    catalog: RepositoryCatalog,
    selected: RepositoryOption,
    fetch: FetchState,
    generation: u64,
    policy: StalePolicy,
}

impl DashboardState {
    /// Initial state: the catalog default is selected and its request is
    /// pending, see [`DashboardState::current_ticket`].
    pub fn new(catalog: RepositoryCatalog, policy: StalePolicy) -> Self {
        let selected = catalog.default_option().clone();
        Self {
            catalog,
            selected,
            fetch: FetchState::Loading,
            generation: 0,
            policy,
        }
    }

    pub fn catalog(&self) -> &RepositoryCatalog {
        &self.catalog
    }

    pub fn selected(&self) -> &RepositoryOption {
        &self.selected
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch
    }

    pub fn policy(&self) -> StalePolicy {
        self.policy
    }

    pub fn is_loading(&self) -> bool {
        self.fetch.is_loading()
    }

    /// Ticket of the latest dispatched request.
    pub fn current_ticket(&self) -> FetchTicket {
        FetchTicket {
            generation: self.generation,
            repository: self.selected.key.clone(),
        }
    }

    pub fn is_selected(&self, option: &RepositoryOption) -> bool {
        option.key == self.selected.key
    }

    /// While a request is in flight every option but the selected one is
    /// disabled.
    pub fn is_disabled(&self, option: &RepositoryOption) -> bool {
        self.is_loading() && !self.is_selected(option)
    }

    /// Select the option with `key` and start a new request for it.
    ///
    /// Returns `None` without changing anything when the key is unknown, when
    /// the option is disabled, or when the selected option is clicked again
    /// while its request is still in flight. Reselecting a settled option
    /// starts a fresh request, which is how a failed fetch is retried.
    pub fn select(&mut self, key: &str) -> Option<FetchTicket> {
        let Some(option) = self.catalog.find(key) else {
            warn!(repository = key, "Ignoring selection of unknown repository");
            return None;
        };

        if self.is_disabled(option) {
            debug!(repository = key, "Ignoring selection while another repository is loading");
            return None;
        }

        if self.is_loading() && self.is_selected(option) {
            debug!(repository = key, "Request already in flight");
            return None;
        }

        self.selected = option.clone();
        self.fetch = FetchState::Loading;
        self.generation += 1;

        let ticket = self.current_ticket();
        debug!(
            repository = %ticket.repository,
            generation = ticket.generation,
            "Repository selected"
        );
        Some(ticket)
    }

    /// Apply the outcome of the request identified by `ticket`.
    ///
    /// Failures are logged and collapse into [`FetchState::Empty`]. Returns
    /// whether the outcome was applied; under [`StalePolicy::DiscardSuperseded`]
    /// outcomes for anything but the current ticket are dropped.
    pub fn resolve(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<StatsPayload, FetchError>,
    ) -> bool {
        let current = ticket.generation == self.generation;
        if !current && self.policy == StalePolicy::DiscardSuperseded {
            debug!(
                repository = %ticket.repository,
                generation = ticket.generation,
                current_generation = self.generation,
                "Discarding result of superseded request"
            );
            return false;
        }

        self.fetch = match outcome {
            Ok(payload) => {
                debug!(repository = %ticket.repository, "Stats loaded");
                FetchState::Loaded(payload)
            }
            Err(err) => {
                warn!(repository = %ticket.repository, error = %err, "Failed to load stats");
                FetchState::Empty
            }
        };
        true
    }
}
