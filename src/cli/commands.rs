pub mod fetch;
pub mod repositories;
pub mod serve;

pub use fetch::fetch_stats;
pub use repositories::list_repositories;
pub use serve::serve;
