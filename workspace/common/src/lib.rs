//! Types shared between the dashboard server and the browser frontend.
//! The wire types mirror what the forecasting service sends so both sides
//! decode the same shapes, and the dashboard state and render model live here
//! so they can be tested without a browser.

mod catalog;
mod dashboard;
mod payload;
pub mod view;

pub use catalog::{CatalogError, RepositoryCatalog, RepositoryOption, DEFAULT_REPOSITORY_KEY};
pub use dashboard::{DashboardState, FetchError, FetchState, FetchTicket, StalePolicy};
pub use payload::{
    validate_repository_key, GithubRequest, IssueImageUrls, PullsImageUrls, Series, SeriesPoint,
    StatsPayload, GITHUB_STATS_PATH,
};
