//! Report panel handlers
//!
//! Filter-dependent panels read the `author` query parameter; trend panels
//! accept it but ignore it.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::AppState;
use arxivdash_common::{
    errors::{AppError, Result},
    reports::{AuthorFilter, Panel, ReportKind},
};

/// Query string shared by every report endpoint
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ReportQuery {
    /// Case-insensitive author name substring
    #[validate(length(max = 200))]
    pub author: Option<String>,
}

async fn render(state: &AppState, kind: ReportKind, query: ReportQuery) -> Result<Json<Panel>> {
    query.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: Some("author".to_string()),
    })?;

    let filter = AuthorFilter::from_input(query.author.as_deref());
    let panel = state.reports.build(kind, &filter).await?;

    if let AuthorFilter::Filtered(author) = &filter {
        tracing::info!(
            report = kind.slug(),
            author = %author,
            empty = panel.is_empty(),
            "Filtered report served"
        );
    }

    Ok(Json(panel))
}

pub async fn time_series(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Panel>> {
    render(&state, ReportKind::TimeSeries, query).await
}

pub async fn categories(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Panel>> {
    render(&state, ReportKind::CategoryDistribution, query).await
}

pub async fn metadata(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Panel>> {
    render(&state, ReportKind::Metadata, query).await
}

pub async fn all_time_categories(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Panel>> {
    render(&state, ReportKind::AllTimeCategories, query).await
}

pub async fn abstract_length(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Panel>> {
    render(&state, ReportKind::AbstractLength, query).await
}

pub async fn keyword_trends(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Panel>> {
    render(&state, ReportKind::KeywordTrends, query).await
}

pub async fn multicategory_share(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Panel>> {
    render(&state, ReportKind::MulticategoryShare, query).await
}

/// Any report addressed by its slug; unknown slugs are 404
pub async fn by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Panel>> {
    let kind = ReportKind::from_slug(&slug)?;
    render(&state, kind, query).await
}
