//! Trend reshaping
//!
//! Wide per-year metric rows are melted into long `(year, metric, value)`
//! rows, relabeled for display, and grouped into line series.

use serde::{Deserialize, Serialize};

use super::panel::{Point, Series};

/// Display names for machine-readable metric columns
pub const METRIC_LABELS: &[(&str, &str)] = &[
    ("avg_length", "Average Length"),
    ("median_length", "Median Length"),
];

/// A row with a year and named numeric columns
pub trait WideRecord {
    fn year(&self) -> i32;

    /// Value of the named column, if the row has it
    fn metric(&self, name: &str) -> Option<f64>;
}

/// One year of one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongRow {
    pub year: i32,
    pub metric: String,
    pub value: f64,
}

/// Melt wide rows into long rows, variable-major: every row for the first
/// variable, then every row for the second, and so on. A column a row
/// lacks is skipped for that row.
pub fn melt<R: WideRecord>(rows: &[R], value_vars: &[&str]) -> Vec<LongRow> {
    let mut long = Vec::with_capacity(rows.len() * value_vars.len());
    for var in value_vars {
        for row in rows {
            if let Some(value) = row.metric(var) {
                long.push(LongRow {
                    year: row.year(),
                    metric: var.to_string(),
                    value,
                });
            }
        }
    }
    long
}

/// Replace metric names found in `labels`; others pass through unchanged.
pub fn relabel(rows: Vec<LongRow>, labels: &[(&str, &str)]) -> Vec<LongRow> {
    rows.into_iter()
        .map(|mut row| {
            if let Some((_, label)) = labels.iter().find(|(name, _)| *name == row.metric) {
                row.metric = label.to_string();
            }
            row
        })
        .collect()
}

/// Group long rows into one series per metric, in first-appearance order
pub fn into_series(rows: Vec<LongRow>) -> Vec<Series> {
    let mut series: Vec<Series> = Vec::new();
    for row in rows {
        let point = Point { x: row.year, y: row.value };
        match series.iter_mut().find(|s| s.name == row.metric) {
            Some(existing) => existing.points.push(point),
            None => series.push(Series {
                name: row.metric,
                points: vec![point],
            }),
        }
    }
    series
}

/// Research topics with a precomputed per-year keyword count table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordTopic {
    Llm,
    DeepLearning,
    MachineLearning,
    ReinforcementLearning,
}

impl KeywordTopic {
    /// Chart order
    pub const ALL: [KeywordTopic; 4] = [
        KeywordTopic::Llm,
        KeywordTopic::DeepLearning,
        KeywordTopic::MachineLearning,
        KeywordTopic::ReinforcementLearning,
    ];

    pub fn table(&self) -> &'static str {
        match self {
            KeywordTopic::Llm => "llm",
            KeywordTopic::DeepLearning => "dl",
            KeywordTopic::MachineLearning => "ml",
            KeywordTopic::ReinforcementLearning => "rl",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            KeywordTopic::Llm => "LLM Papers",
            KeywordTopic::DeepLearning => "Deep Learning Papers",
            KeywordTopic::MachineLearning => "Machine Learning Papers",
            KeywordTopic::ReinforcementLearning => "Reinforcement Learning Papers",
        }
    }
}
