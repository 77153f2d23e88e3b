//! Per-year aggregate rows

use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::reports::trends::WideRecord;

/// Paper count for one year (author counts, homepage, keyword trends)
#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i32,
    pub count: i64,
}

#[derive(Clone, Debug, PartialEq, FromQueryResult, Serialize, Deserialize)]
pub struct AbstractLength {
    pub year: i32,
    pub avg_length: f64,
    pub median_length: f64,
}

/// Share of papers listing more than one category
#[derive(Clone, Debug, PartialEq, FromQueryResult, Serialize, Deserialize)]
pub struct MulticategoryShare {
    pub year: i32,
    pub share: f64,
}

impl WideRecord for AbstractLength {
    fn year(&self) -> i32 {
        self.year
    }

    fn metric(&self, name: &str) -> Option<f64> {
        match name {
            "avg_length" => Some(self.avg_length),
            "median_length" => Some(self.median_length),
            _ => None,
        }
    }
}
