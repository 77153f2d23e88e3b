//! Query definitions
//!
//! Each report maps to exactly one statement per [`AuthorFilter`] variant.
//! SQL text is fixed; user input only ever travels as a bound value.
//! Column casts pin the Rust row types regardless of how the upstream
//! views declare their numeric columns.

use sea_orm::{DbBackend, Statement};

use crate::reports::{trends::KeywordTopic, AuthorFilter};
use crate::METADATA_ROW_LIMIT;

/// Earliest year shown in the abstract length trend
pub const ABSTRACT_TREND_START: i32 = 1989;

/// Earliest year shown in the multicategory share trend
pub const MULTICATEGORY_TREND_START: i32 = 1991;

/// Earliest year shown in the keyword trends
pub const KEYWORD_TREND_START: i32 = 2010;

fn filtered(sql: &str, filter: &AuthorFilter) -> Option<Statement> {
    filter
        .like_pattern()
        .map(|pattern| Statement::from_sql_and_values(DbBackend::Postgres, sql, [pattern.into()]))
}

fn fixed(sql: impl Into<String>) -> Statement {
    Statement::from_string(DbBackend::Postgres, sql)
}

/// Papers per year
pub fn papers_per_year(filter: &AuthorFilter) -> Statement {
    filtered(
        r#"
        SELECT year::INT AS year, SUM(paper_count)::BIGINT AS count
        FROM author_counts
        WHERE author ILIKE $1
        GROUP BY year
        ORDER BY year
        "#,
        filter,
    )
    .unwrap_or_else(|| {
        fixed(
            r#"
            SELECT year::INT AS year, count::BIGINT AS count
            FROM homepage
            ORDER BY year
            "#,
        )
    })
}

/// Category fields of the papers in view
pub fn paper_categories(filter: &AuthorFilter) -> Statement {
    filtered(
        r#"
        SELECT categories
        FROM papers2
        WHERE authors_raw ILIKE $1
        "#,
        filter,
    )
    .unwrap_or_else(|| {
        fixed(
            r#"
            SELECT categories
            FROM recent
            "#,
        )
    })
}

/// Paper metadata listing, newest first when filtered
pub fn paper_metadata(filter: &AuthorFilter) -> Statement {
    filtered(
        &format!(
            r#"
            SELECT
                id,
                title,
                authors_raw AS authors,
                categories,
                submitted_year::INT AS year,
                comments
            FROM papers2
            WHERE authors_raw ILIKE $1
            ORDER BY submitted_year DESC
            LIMIT {}
            "#,
            METADATA_ROW_LIMIT
        ),
        filter,
    )
    .unwrap_or_else(|| {
        fixed(
            r#"
            SELECT id, title, authors, categories, year::INT AS year, comments
            FROM default_table
            "#,
        )
    })
}

pub fn category_map() -> Statement {
    fixed(
        r#"
        SELECT category_code, category_name
        FROM category_map
        "#,
    )
}

pub fn category_counts_all_time() -> Statement {
    fixed(
        r#"
        SELECT category_code, count::BIGINT AS count
        FROM category_counts_alltime
        ORDER BY count DESC
        "#,
    )
}

pub fn abstract_length_by_year() -> Statement {
    fixed(format!(
        r#"
        SELECT
            year::INT AS year,
            avg_length::FLOAT8 AS avg_length,
            median_length::FLOAT8 AS median_length
        FROM abstract_length_by_year
        WHERE year >= {}
        ORDER BY year
        "#,
        ABSTRACT_TREND_START
    ))
}

pub fn multicategory_share_by_year() -> Statement {
    fixed(format!(
        r#"
        SELECT year::INT AS year, share::FLOAT8 AS share
        FROM multicategory_by_year
        WHERE year >= {}
        ORDER BY year
        "#,
        MULTICATEGORY_TREND_START
    ))
}

/// Per-year count for one keyword topic; the table name comes from the enum
pub fn keyword_trend(topic: KeywordTopic) -> Statement {
    fixed(format!(
        r#"
        SELECT year::INT AS year, count::BIGINT AS count
        FROM {}
        WHERE year >= {}
        ORDER BY year
        "#,
        topic.table(),
        KEYWORD_TREND_START
    ))
}
