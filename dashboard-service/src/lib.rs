pub mod analytics;
pub mod api;
pub mod config;
pub mod dataset;
pub mod export;
pub mod observability;
pub mod presentation;

pub use analytics::EmptySetError;
pub use dataset::DataLoadError;
