//! Metrics and observability utilities
//!
//! Prometheus metrics for report requests and database queries,
//! following one naming convention.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit};
use std::time::Instant;

use crate::errors::AppError;

/// Metrics prefix for all arXiv Dash metrics
pub const METRICS_PREFIX: &str = "arxivdash";

/// Histogram buckets for report latency (in seconds)
pub const LATENCY_BUCKETS: &[f64] = &[
    0.005,  // 5ms
    0.010,  // 10ms
    0.025,  // 25ms
    0.050,  // 50ms
    0.100,  // 100ms
    0.250,  // 250ms
    0.500,  // 500ms
    1.000,  // 1s
    2.500,  // 2.5s
    5.000,  // 5s
    10.00,  // 10s
];

/// Register all metric descriptions
pub fn register_metrics() {
    describe_counter!(
        format!("{}_report_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of report panel requests"
    );

    describe_histogram!(
        format!("{}_report_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Report build latency in seconds, queries included"
    );

    describe_gauge!(
        format!("{}_report_rows", METRICS_PREFIX),
        Unit::Count,
        "Data points in the most recent panel of each report"
    );

    describe_counter!(
        format!("{}_report_empty_total", METRICS_PREFIX),
        Unit::Count,
        "Report requests that produced an empty panel"
    );

    describe_counter!(
        format!("{}_db_query_errors_total", METRICS_PREFIX),
        Unit::Count,
        "Report requests that failed in the database"
    );

    tracing::info!("Metrics registered");
}

/// Times one report build from start to completion
pub struct ReportTimer {
    start: Instant,
    report: &'static str,
    filter: &'static str,
}

impl ReportTimer {
    pub fn start(report: &'static str, filter: &'static str) -> Self {
        Self {
            start: Instant::now(),
            report,
            filter,
        }
    }

    /// Record a successful build carrying `rows` data points
    pub fn finish(self, rows: usize, empty: bool) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_report_requests_total", METRICS_PREFIX),
            "report" => self.report,
            "filter" => self.filter,
            "status" => "ok"
        )
        .increment(1);

        histogram!(
            format!("{}_report_duration_seconds", METRICS_PREFIX),
            "report" => self.report
        )
        .record(duration);

        gauge!(
            format!("{}_report_rows", METRICS_PREFIX),
            "report" => self.report
        )
        .set(rows as f64);

        if empty {
            counter!(
                format!("{}_report_empty_total", METRICS_PREFIX),
                "report" => self.report
            )
            .increment(1);
        }
    }

    /// Record a failed build; only database failures count as query errors
    pub fn fail(self, error: &AppError) {
        counter!(
            format!("{}_report_requests_total", METRICS_PREFIX),
            "report" => self.report,
            "filter" => self.filter,
            "status" => "error"
        )
        .increment(1);

        if error.is_database_error() {
            counter!(
                format!("{}_db_query_errors_total", METRICS_PREFIX),
                "report" => self.report
            )
            .increment(1);
        }
    }
}
