//! arXiv Dash Common Library
//!
//! Shared code for the dashboard service including:
//! - Configuration management
//! - Error types and handling
//! - Database pool, query definitions, and the report store
//! - Report building (category aggregation, trend reshaping, panels)
//! - Metrics and observability

pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;
pub mod reports;

// Re-export commonly used types
pub use config::AppConfig;
pub use db::{DbPool, ReportStore, Repository};
pub use errors::{AppError, Result};
pub use reports::{AuthorFilter, Panel, ReportService};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of categories shown in ranked category charts
pub const TOP_CATEGORIES: usize = 15;

/// Row cap for the author-filtered metadata listing
pub const METADATA_ROW_LIMIT: u64 = 100;
