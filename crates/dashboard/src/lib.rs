//! arXiv Dash web dashboard
//!
//! Serves the dashboard page and one JSON endpoint per report panel.
//! Every panel is fetched independently, so a failing query only breaks
//! its own panel.

pub mod handlers;

use arxivdash_common::{config::AppConfig, reports::ReportService};
use axum::{routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub reports: ReportService,
    /// Prometheus render handle; absent when no recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    let report_routes = Router::new()
        .route("/timeseries", get(handlers::reports::time_series))
        .route("/categories", get(handlers::reports::categories))
        .route("/metadata", get(handlers::reports::metadata))
        .route("/trends/all-time", get(handlers::reports::all_time_categories))
        .route("/trends/abstract-length", get(handlers::reports::abstract_length))
        .route("/trends/keywords", get(handlers::reports::keyword_trends))
        .route("/trends/multicategory", get(handlers::reports::multicategory_share))
        .route("/{*report}", get(handlers::reports::by_slug));

    Router::new()
        // Dashboard page
        .route("/", get(handlers::page::index))
        // Health endpoints
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        // Prometheus scrape endpoint
        .route("/metrics", get(handlers::health::metrics))
        .nest("/api/reports", report_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(propagate_id)
        .layer(request_id)
        .with_state(state)
}
