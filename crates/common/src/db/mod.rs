//! Database layer for arXiv Dash
//!
//! Provides:
//! - Row models for the reporting tables
//! - Query definitions keyed by report and author filter
//! - The [`ReportStore`] seam and its SeaORM-backed [`Repository`]
//! - Connection pool management
//!
//! Every access is a read; nothing in this crate writes to the store.

pub mod models;
pub mod queries;
mod repository;

pub use repository::Repository;

use crate::config::DatabaseConfig;
use crate::errors::{AppError, Result};
use crate::reports::{trends::KeywordTopic, AuthorFilter};
use async_trait::async_trait;
use models::*;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

/// Read access to the reporting tables
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Paper counts per year, for one author pattern or overall
    async fn papers_per_year(&self, filter: &AuthorFilter) -> Result<Vec<YearCount>>;

    /// Raw category fields of the papers in view
    async fn paper_categories(&self, filter: &AuthorFilter) -> Result<Vec<CategoryRow>>;

    /// Paper metadata listing
    async fn paper_metadata(&self, filter: &AuthorFilter) -> Result<Vec<PaperRecord>>;

    /// Category code→name reference table
    async fn category_map(&self) -> Result<Vec<CategoryMapEntry>>;

    async fn category_counts_all_time(&self) -> Result<Vec<CategoryCount>>;

    async fn abstract_length_by_year(&self) -> Result<Vec<AbstractLength>>;

    async fn multicategory_share_by_year(&self) -> Result<Vec<MulticategoryShare>>;

    async fn keyword_trend(&self, topic: KeywordTopic) -> Result<Vec<YearCount>>;

    /// Connectivity check for readiness probes
    async fn ping(&self) -> Result<()>;
}

/// Database connection pool wrapper
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Create a new database pool from configuration
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!(
            host = %config.host,
            port = config.port,
            database = %config.name,
            "Connecting to database..."
        );

        let url = config.url()?;
        let mut opts = ConnectOptions::new(url);
        opts.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(config.connect_timeout())
            .idle_timeout(config.idle_timeout())
            .sqlx_logging(true);

        let conn = Database::connect(opts)
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Failed to connect: {}", e),
            })?;

        info!("Database connection established");

        Ok(Self { conn })
    }

    /// Wrap an existing connection
    pub fn from_connection(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub fn conn(&self) -> &DatabaseConnection {
        &self.conn
    }

    pub fn into_connection(self) -> DatabaseConnection {
        self.conn
    }

    /// Ping the database to check connectivity
    pub async fn ping(&self) -> Result<()> {
        self.conn
            .execute_unprepared("SELECT 1")
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Ping failed: {}", e),
            })?;
        Ok(())
    }
}
