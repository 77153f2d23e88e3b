//! Category rows and the code→name reference map

use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The multi-category field of a single paper
#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize, Deserialize)]
pub struct CategoryRow {
    pub categories: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize, Deserialize)]
pub struct CategoryMapEntry {
    pub category_code: String,
    pub category_name: Option<String>,
}

/// Precomputed all-time paper count for one category code
#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category_code: String,
    pub count: i64,
}

impl CategoryMapEntry {
    /// Build a code→name lookup; entries without a name are left out so the
    /// raw code is displayed for them.
    pub fn lookup(entries: Vec<CategoryMapEntry>) -> HashMap<String, String> {
        entries
            .into_iter()
            .filter_map(|entry| entry.category_name.map(|name| (entry.category_code, name)))
            .collect()
    }
}
