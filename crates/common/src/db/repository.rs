//! Repository over the reporting tables
//!
//! Executes the statements from [`queries`](super::queries) on the pool
//! and maps rows into the typed models.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, FromQueryResult, Statement};
use tracing::debug;

use super::models::*;
use super::{queries, DbPool, ReportStore};
use crate::errors::Result;
use crate::reports::{trends::KeywordTopic, AuthorFilter};

/// Repository for data access operations
pub struct Repository {
    pool: DbPool,
}

impl Repository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> &DatabaseConnection {
        self.pool.conn()
    }

    async fn fetch<M>(&self, stmt: Statement) -> Result<Vec<M>>
    where
        M: FromQueryResult + Send + Sync,
    {
        debug!(sql = %stmt.sql.trim(), "Running report query");
        let rows = M::find_by_statement(stmt).all(self.conn()).await?;
        Ok(rows)
    }
}

#[async_trait]
impl ReportStore for Repository {
    async fn papers_per_year(&self, filter: &AuthorFilter) -> Result<Vec<YearCount>> {
        self.fetch(queries::papers_per_year(filter)).await
    }

    async fn paper_categories(&self, filter: &AuthorFilter) -> Result<Vec<CategoryRow>> {
        self.fetch(queries::paper_categories(filter)).await
    }

    async fn paper_metadata(&self, filter: &AuthorFilter) -> Result<Vec<PaperRecord>> {
        self.fetch(queries::paper_metadata(filter)).await
    }

    async fn category_map(&self) -> Result<Vec<CategoryMapEntry>> {
        self.fetch(queries::category_map()).await
    }

    async fn category_counts_all_time(&self) -> Result<Vec<CategoryCount>> {
        self.fetch(queries::category_counts_all_time()).await
    }

    async fn abstract_length_by_year(&self) -> Result<Vec<AbstractLength>> {
        self.fetch(queries::abstract_length_by_year()).await
    }

    async fn multicategory_share_by_year(&self) -> Result<Vec<MulticategoryShare>> {
        self.fetch(queries::multicategory_share_by_year()).await
    }

    async fn keyword_trend(&self, topic: KeywordTopic) -> Result<Vec<YearCount>> {
        self.fetch(queries::keyword_trend(topic)).await
    }

    async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }
}
