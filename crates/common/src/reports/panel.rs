//! Chart-ready and table-ready panel payloads

use serde::{Deserialize, Serialize};

use super::categories::CategoryTotal;
use crate::db::models::PaperRecord;

/// Rows per page in the metadata table
pub const TABLE_PAGE_SIZE: usize = 15;

/// One dashboard panel, tagged by `kind` in JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Panel {
    Line(LineChart),
    Bar(BarChart),
    Table(TablePanel),
    /// No rows matched; rendered as an annotated placeholder
    Empty(EmptyPanel),
}

impl Panel {
    pub fn is_empty(&self) -> bool {
        matches!(self, Panel::Empty(_))
    }

    pub fn title(&self) -> &str {
        match self {
            Panel::Line(chart) => &chart.title,
            Panel::Bar(chart) => &chart.title,
            Panel::Table(table) => &table.title,
            Panel::Empty(empty) => &empty.title,
        }
    }

    /// Data points, bars or rows carried by the panel
    pub fn data_len(&self) -> usize {
        match self {
            Panel::Line(chart) => chart.series.iter().map(|s| s.points.len()).sum(),
            Panel::Bar(chart) => chart.bars.len(),
            Panel::Table(table) => table.rows.len(),
            Panel::Empty(_) => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Legend title for multi-series charts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend_label: Option<String>,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Plotly continuous colour scale name
    pub color_scale: String,
    pub bars: Vec<CategoryTotal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableColumn {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablePanel {
    pub title: String,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<PaperRecord>,
    pub page_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmptyPanel {
    pub title: String,
    pub message: String,
}

impl TablePanel {
    /// Columns of the paper metadata listing, in display order
    pub fn paper_columns() -> Vec<TableColumn> {
        PaperRecord::COLUMNS
            .iter()
            .map(|name| TableColumn {
                name: name.to_string(),
                id: name.to_string(),
            })
            .collect()
    }
}
