//! Paper metadata row

use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

/// One paper as listed in the metadata table (`papers2` or `default_table`)
#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize, Deserialize)]
pub struct PaperRecord {
    pub id: String,

    pub title: String,

    /// Raw author string as stored
    pub authors: String,

    /// Space-separated category codes
    pub categories: Option<String>,

    /// Submission year
    pub year: Option<i32>,

    pub comments: Option<String>,
}

impl PaperRecord {
    pub const COLUMNS: [&'static str; 6] = ["id", "title", "authors", "categories", "year", "comments"];
}
