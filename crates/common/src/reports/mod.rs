//! Report building
//!
//! [`ReportService`] turns store rows into dashboard panels. The three
//! author-dependent reports pick their view through [`AuthorFilter`]; the
//! four trend reports always read the same tables.

pub mod categories;
pub mod filter;
pub mod panel;
pub mod trends;

pub use filter::AuthorFilter;
pub use panel::{BarChart, EmptyPanel, LineChart, Panel, Point, Series, TableColumn, TablePanel};

use futures::future::try_join_all;
use std::future::Future;
use std::sync::Arc;

use crate::db::models::{CategoryMapEntry, YearCount};
use crate::db::ReportStore;
use crate::errors::{AppError, Result};
use crate::metrics::ReportTimer;
use crate::TOP_CATEGORIES;
use categories::{rank_categories, tally_tokens, CodeCount};
use trends::{into_series, melt, relabel, KeywordTopic, METRIC_LABELS};

/// The dashboard's report panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    TimeSeries,
    CategoryDistribution,
    Metadata,
    AllTimeCategories,
    AbstractLength,
    KeywordTrends,
    MulticategoryShare,
}

impl ReportKind {
    pub const ALL: [ReportKind; 7] = [
        ReportKind::TimeSeries,
        ReportKind::CategoryDistribution,
        ReportKind::Metadata,
        ReportKind::AllTimeCategories,
        ReportKind::AbstractLength,
        ReportKind::KeywordTrends,
        ReportKind::MulticategoryShare,
    ];

    /// URL slug under `/api/reports/`
    pub fn slug(&self) -> &'static str {
        match self {
            ReportKind::TimeSeries => "timeseries",
            ReportKind::CategoryDistribution => "categories",
            ReportKind::Metadata => "metadata",
            ReportKind::AllTimeCategories => "trends/all-time",
            ReportKind::AbstractLength => "trends/abstract-length",
            ReportKind::KeywordTrends => "trends/keywords",
            ReportKind::MulticategoryShare => "trends/multicategory",
        }
    }

    pub fn from_slug(slug: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == slug)
            .ok_or_else(|| AppError::ReportNotFound {
                name: slug.to_string(),
            })
    }

    /// Whether the author filter changes this report
    pub fn uses_author_filter(&self) -> bool {
        matches!(
            self,
            ReportKind::TimeSeries | ReportKind::CategoryDistribution | ReportKind::Metadata
        )
    }
}

fn no_papers(title: String, author: &str) -> Panel {
    Panel::Empty(EmptyPanel {
        title,
        message: format!("No papers found for author: {}", author),
    })
}

fn year_points(rows: &[YearCount]) -> Vec<Point> {
    rows.iter()
        .map(|row| Point {
            x: row.year,
            y: row.count as f64,
        })
        .collect()
}

/// Builds panels from an injected store
#[derive(Clone)]
pub struct ReportService {
    store: Arc<dyn ReportStore>,
}

impl ReportService {
    pub fn new(store: Arc<dyn ReportStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ReportStore> {
        &self.store
    }

    /// Build any report; trend reports ignore `filter`
    pub async fn build(&self, kind: ReportKind, filter: &AuthorFilter) -> Result<Panel> {
        let filter_label = if kind.uses_author_filter() {
            filter.label()
        } else {
            "none"
        };
        let timer = ReportTimer::start(kind.slug(), filter_label);

        let result = match kind {
            ReportKind::TimeSeries => self.time_series(filter).await,
            ReportKind::CategoryDistribution => self.category_distribution(filter).await,
            ReportKind::Metadata => self.metadata(filter).await,
            ReportKind::AllTimeCategories => self.all_time_categories().await,
            ReportKind::AbstractLength => self.abstract_length().await,
            ReportKind::KeywordTrends => self.keyword_trends().await,
            ReportKind::MulticategoryShare => self.multicategory_share().await,
        };

        match &result {
            Ok(panel) => {
                tracing::debug!(
                    report = kind.slug(),
                    filter = filter_label,
                    points = panel.data_len(),
                    empty = panel.is_empty(),
                    "Report built"
                );
                timer.finish(panel.data_len(), panel.is_empty());
            }
            Err(e) => {
                tracing::error!(report = kind.slug(), error = %e, "Report failed");
                timer.fail(e);
            }
        }

        result
    }

    /// Papers per year, for the filtered author or overall
    pub async fn time_series(&self, filter: &AuthorFilter) -> Result<Panel> {
        let rows = self.store.papers_per_year(filter).await?;

        let title = match filter.author() {
            Some(author) => {
                let title = format!("ArXiv Papers per Year by {}", author);
                if rows.is_empty() {
                    return Ok(no_papers(title, author));
                }
                title
            }
            None => "ArXiv Papers per Year".to_string(),
        };

        Ok(Panel::Line(LineChart {
            title,
            x_label: "year".to_string(),
            y_label: "count".to_string(),
            legend_label: None,
            series: vec![Series {
                name: "count".to_string(),
                points: year_points(&rows),
            }],
        }))
    }

    /// Top categories of the papers in view
    pub async fn category_distribution(&self, filter: &AuthorFilter) -> Result<Panel> {
        let (rows, mapping) = futures::try_join!(
            self.store.paper_categories(filter),
            self.store.category_map()
        )?;

        let title = match filter.author() {
            Some(author) => {
                let title = format!("Category Distribution for {}", author);
                if rows.is_empty() {
                    return Ok(no_papers(title, author));
                }
                title
            }
            None => "Category Distribution (Recent Papers)".to_string(),
        };

        let tallied = tally_tokens(rows.iter().map(|row| row.categories.as_deref()));
        let names = CategoryMapEntry::lookup(mapping);

        Ok(Panel::Bar(BarChart {
            title,
            x_label: "Category".to_string(),
            y_label: "Number of Papers".to_string(),
            color_scale: "viridis".to_string(),
            bars: rank_categories(&tallied, &names, TOP_CATEGORIES),
        }))
    }

    /// Paper listing for the filtered author or the recent default
    pub async fn metadata(&self, filter: &AuthorFilter) -> Result<Panel> {
        let rows = self.store.paper_metadata(filter).await?;

        let title = match filter.author() {
            Some(_) if rows.is_empty() => {
                return Ok(Panel::Empty(EmptyPanel {
                    title: String::new(),
                    message: "No results found".to_string(),
                }));
            }
            Some(author) => format!("ArXiv Papers by {}", author),
            None => "ArXiv Papers (Recent)".to_string(),
        };

        Ok(Panel::Table(TablePanel {
            title,
            columns: TablePanel::paper_columns(),
            rows,
            page_size: panel::TABLE_PAGE_SIZE,
        }))
    }

    /// Most popular categories over the whole archive
    pub async fn all_time_categories(&self) -> Result<Panel> {
        let (counts, mapping) = futures::try_join!(
            self.store.category_counts_all_time(),
            self.store.category_map()
        )?;

        let codes: Vec<CodeCount> = counts
            .into_iter()
            .map(|row| CodeCount {
                code: row.category_code,
                count: row.count,
            })
            .collect();
        let names = CategoryMapEntry::lookup(mapping);

        Ok(Panel::Bar(BarChart {
            title: "Most Popular ArXiv Categories (All-Time)".to_string(),
            x_label: "Category".to_string(),
            y_label: "Total Papers".to_string(),
            color_scale: "plasma".to_string(),
            bars: rank_categories(&codes, &names, TOP_CATEGORIES),
        }))
    }

    /// Average and median abstract word counts per year
    pub async fn abstract_length(&self) -> Result<Panel> {
        let rows = self.store.abstract_length_by_year().await?;
        let long = relabel(melt(&rows, &["avg_length", "median_length"]), METRIC_LABELS);

        Ok(Panel::Line(LineChart {
            title: "Abstract Length Trends Over Time".to_string(),
            x_label: "Year".to_string(),
            y_label: "Word Count".to_string(),
            legend_label: Some("Metric".to_string()),
            series: into_series(long),
        }))
    }

    /// Per-year counts of the four keyword topics on one chart
    pub async fn keyword_trends(&self) -> Result<Panel> {
        let store = &self.store;
        let fetches = KeywordTopic::ALL.map(|topic| labelled(topic, store.keyword_trend(topic)));
        let trends = try_join_all(fetches).await?;

        let series = trends
            .into_iter()
            .map(|(topic, rows)| Series {
                name: topic.label().to_string(),
                points: year_points(&rows),
            })
            .collect();

        Ok(Panel::Line(LineChart {
            title: "LLM, Deep Learning, Machine Learning, and Reinforcement Learning Trends Over Time"
                .to_string(),
            x_label: "Year".to_string(),
            y_label: "Number of Papers".to_string(),
            legend_label: Some("Category".to_string()),
            series,
        }))
    }

    /// Share of multi-category papers per year
    pub async fn multicategory_share(&self) -> Result<Panel> {
        let rows = self.store.multicategory_share_by_year().await?;

        Ok(Panel::Line(LineChart {
            title: "% of papers with more than one category per year".to_string(),
            x_label: "Year".to_string(),
            y_label: "% of Papers".to_string(),
            legend_label: None,
            series: vec![Series {
                name: "share".to_string(),
                points: rows
                    .iter()
                    .map(|row| Point {
                        x: row.year,
                        y: row.share,
                    })
                    .collect(),
            }],
        }))
    }
}

async fn labelled<F>(topic: KeywordTopic, fetch: F) -> Result<(KeywordTopic, Vec<YearCount>)>
where
    F: Future<Output = Result<Vec<YearCount>>>,
{
    Ok((topic, fetch.await?))
}
