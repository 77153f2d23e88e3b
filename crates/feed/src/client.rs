//! arXiv query API client

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use crate::atom::Feed;
use crate::error::{FeedError, Result};

/// Query parameters for one page of results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    pub search_query: String,
    pub start: u32,
    pub max_results: u32,
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            search_query: "all:llm".to_string(),
            start: 0,
            max_results: 1,
        }
    }
}

impl FeedQuery {
    fn params(&self) -> [(&'static str, String); 3] {
        [
            ("search_query", self.search_query.clone()),
            ("start", self.start.to_string()),
            ("max_results", self.max_results.to_string()),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct FeedClient {
    http: Client,
    base_url: String,
}

impl FeedClient {
    /// Build a client; without a timeout requests wait indefinitely
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            "arxivdash-feed/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Single GET against the query endpoint; no retry
    pub async fn fetch(&self, query: &FeedQuery) -> Result<Feed> {
        info!(
            url = %self.base_url,
            search_query = %query.search_query,
            start = query.start,
            max_results = query.max_results,
            "Fetching arXiv feed"
        );

        let response = self
            .http
            .get(&self.base_url)
            .query(&query.params())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status { status });
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "Received feed document");

        let feed = Feed::parse(&body)?;
        debug!(entries = feed.entries.len(), "Parsed feed");
        Ok(feed)
    }
}
