pub mod github;
pub mod health;
pub mod repositories;
