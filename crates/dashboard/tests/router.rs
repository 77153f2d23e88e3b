//! Router tests against an in-memory report store

use std::sync::Arc;

use arxivdash_common::{
    config::AppConfig,
    db::models::*,
    errors::{AppError, Result},
    reports::{trends::KeywordTopic, AuthorFilter, ReportService},
    ReportStore,
};
use arxivdash_dashboard::{create_router, AppState};
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use sea_orm::DbErr;
use serde_json::Value;
use tower::ServiceExt;

/// Store with one known author; `broken` fails every query
#[derive(Default)]
struct StubStore {
    broken: bool,
}

impl StubStore {
    fn check(&self) -> Result<()> {
        if self.broken {
            return Err(AppError::Database(DbErr::Custom("connection refused".into())));
        }
        Ok(())
    }
}

fn known(filter: &AuthorFilter) -> bool {
    filter
        .author()
        .map(|a| "noah a. smith".contains(&a.to_lowercase()))
        .unwrap_or(true)
}

#[async_trait]
impl ReportStore for StubStore {
    async fn papers_per_year(&self, filter: &AuthorFilter) -> Result<Vec<YearCount>> {
        self.check()?;
        if !known(filter) {
            return Ok(vec![]);
        }
        Ok(vec![YearCount { year: 2023, count: 2 }, YearCount { year: 2024, count: 5 }])
    }

    async fn paper_categories(&self, filter: &AuthorFilter) -> Result<Vec<CategoryRow>> {
        self.check()?;
        if !known(filter) {
            return Ok(vec![]);
        }
        Ok(vec![CategoryRow { categories: Some("cs.CL cs.LG".into()) }])
    }

    async fn paper_metadata(&self, filter: &AuthorFilter) -> Result<Vec<PaperRecord>> {
        self.check()?;
        if !known(filter) {
            return Ok(vec![]);
        }
        Ok(vec![PaperRecord {
            id: "2401.00001".into(),
            title: "Tokenization <b>matters</b>".into(),
            authors: "Noah A. Smith".into(),
            categories: Some("cs.CL".into()),
            year: Some(2024),
            comments: None,
        }])
    }

    async fn category_map(&self) -> Result<Vec<CategoryMapEntry>> {
        self.check()?;
        Ok(vec![CategoryMapEntry {
            category_code: "cs.CL".into(),
            category_name: Some("Computation and Language".into()),
        }])
    }

    async fn category_counts_all_time(&self) -> Result<Vec<CategoryCount>> {
        self.check()?;
        Ok(vec![CategoryCount { category_code: "cs.CL".into(), count: 42 }])
    }

    async fn abstract_length_by_year(&self) -> Result<Vec<AbstractLength>> {
        self.check()?;
        Ok(vec![AbstractLength { year: 2000, avg_length: 120.0, median_length: 110.0 }])
    }

    async fn multicategory_share_by_year(&self) -> Result<Vec<MulticategoryShare>> {
        self.check()?;
        Ok(vec![MulticategoryShare { year: 2000, share: 30.0 }])
    }

    async fn keyword_trend(&self, _topic: KeywordTopic) -> Result<Vec<YearCount>> {
        self.check()?;
        Ok(vec![YearCount { year: 2020, count: 1 }])
    }

    async fn ping(&self) -> Result<()> {
        self.check()
    }
}

fn app(store: StubStore) -> Router {
    create_router(AppState {
        config: Arc::new(AppConfig::default()),
        reports: ReportService::new(Arc::new(store)),
        metrics: None,
    })
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_default_time_series() {
    let (status, body) = get(app(StubStore::default()), "/api/reports/timeseries").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "line");
    assert_eq!(body["title"], "ArXiv Papers per Year");
    assert_eq!(body["series"][0]["points"][1]["x"], 2024);
}

#[tokio::test]
async fn test_blank_author_uses_default_view() {
    let (_, body) = get(app(StubStore::default()), "/api/reports/metadata?author=%20%20").await;
    assert_eq!(body["kind"], "table");
    assert_eq!(body["title"], "ArXiv Papers (Recent)");
}

#[tokio::test]
async fn test_metadata_for_author() {
    let (status, body) = get(
        app(StubStore::default()),
        "/api/reports/metadata?author=Noah%20A.%20Smith",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "table");
    assert_eq!(body["title"], "ArXiv Papers by Noah A. Smith");
    assert_eq!(body["page_size"], 15);
    assert_eq!(body["rows"][0]["id"], "2401.00001");
    assert_eq!(body["columns"][4]["id"], "year");
}

#[tokio::test]
async fn test_unknown_author_gets_empty_panels() {
    let (status, body) = get(app(StubStore::default()), "/api/reports/timeseries?author=Nobody").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "empty");
    assert_eq!(body["message"], "No papers found for author: Nobody");

    let (_, body) = get(app(StubStore::default()), "/api/reports/categories?author=Nobody").await;
    assert_eq!(body["kind"], "empty");
    assert_eq!(body["title"], "Category Distribution for Nobody");

    let (_, body) = get(app(StubStore::default()), "/api/reports/metadata?author=Nobody").await;
    assert_eq!(body["kind"], "empty");
    assert_eq!(body["title"], "");
    assert_eq!(body["message"], "No results found");
}

#[tokio::test]
async fn test_trend_panels() {
    let (_, body) = get(app(StubStore::default()), "/api/reports/trends/all-time").await;
    assert_eq!(body["kind"], "bar");
    assert_eq!(body["bars"][0]["name"], "Computation and Language");
    assert_eq!(body["color_scale"], "plasma");

    let (_, body) = get(app(StubStore::default()), "/api/reports/trends/abstract-length").await;
    assert_eq!(body["series"][0]["name"], "Average Length");
    assert_eq!(body["series"][1]["name"], "Median Length");

    let (_, body) = get(app(StubStore::default()), "/api/reports/trends/keywords").await;
    assert_eq!(body["series"].as_array().unwrap().len(), 4);

    let (_, body) = get(app(StubStore::default()), "/api/reports/trends/multicategory?author=Nobody").await;
    assert_eq!(body["kind"], "line");
    assert_eq!(body["y_label"], "% of Papers");
}

#[tokio::test]
async fn test_unknown_report_is_not_found() {
    let (status, body) = get(app(StubStore::default()), "/api/reports/trends/heatmap").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_overlong_author_rejected() {
    let uri = format!("/api/reports/timeseries?author={}", "a".repeat(201));
    let (status, body) = get(app(StubStore::default()), &uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_query_failure_is_isolated_to_the_panel() {
    let (status, body) = get(app(StubStore { broken: true }), "/api/reports/categories").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "DATABASE_ERROR");

    let (status, _) = get(app(StubStore { broken: true }), "/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_reports_service() {
    let (status, body) = get(app(StubStore::default()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "arxivdash");
}

#[tokio::test]
async fn test_readiness_reflects_database() {
    let (status, body) = get(app(StubStore::default()), "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["database"]["status"], "up");

    let (status, body) = get(app(StubStore { broken: true }), "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "not_ready");
}

#[tokio::test]
async fn test_index_page_served() {
    let response = app(StubStore::default())
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("ArXiv Papers Dashboard"));
    assert!(html.contains("author-input"));
    assert!(html.contains("new AbortController()"));
}

#[tokio::test]
async fn test_metrics_without_recorder() {
    let response = app(StubStore::default())
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
