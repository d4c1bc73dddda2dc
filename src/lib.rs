/// Data structures passed between lookups and the report
pub mod data;

/// API clients and text extraction helpers
pub mod helpers;

/// Classification, expansion, ranking and comparison
pub mod related;

/// Configuration file handling
pub mod config;

/// Logger setup
pub mod logging;

pub use config::Config;
pub use data::{ArtistReport, SeedOutcome};
pub use helpers::ApiGateway;
pub use related::Suggester;
