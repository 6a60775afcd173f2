pub mod charts;
pub mod dashboard;
pub mod image;
pub mod layout;
