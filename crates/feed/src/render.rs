//! Console report for a parsed feed

use std::fmt::Write;

use chrono::SecondsFormat;

use crate::atom::{Entry, Feed, Text};

const RULE_WIDTH: usize = 80;
const MISSING: &str = "N/A";

fn or_missing(field: &Option<Text>) -> &str {
    field
        .as_ref()
        .map(Text::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(MISSING)
}

/// Feed header followed by one framed block per entry
pub fn render_feed(feed: &Feed) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_feed(&mut out, feed);
    out
}

fn write_feed(out: &mut String, feed: &Feed) -> std::fmt::Result {
    writeln!(out, "Feed title: {}", or_missing(&feed.title))?;
    writeln!(out, "Feed last updated: {}", or_missing(&feed.updated))?;
    writeln!(out, "Total results for this query: {}", or_missing(&feed.total_results))?;
    writeln!(out, "Items per page: {}", or_missing(&feed.items_per_page))?;
    writeln!(out, "Start index: {}", or_missing(&feed.start_index))?;
    writeln!(out)?;

    for entry in &feed.entries {
        write_entry(out, entry)?;
    }
    Ok(())
}

fn write_entry(out: &mut String, entry: &Entry) -> std::fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);

    writeln!(out, "{}", rule)?;
    writeln!(out, "e-print metadata")?;
    writeln!(out, "arXiv ID: {}", entry.arxiv_id())?;
    match entry.published {
        Some(published) => writeln!(
            out,
            "Published: {}",
            published.to_rfc3339_opts(SecondsFormat::Secs, true)
        )?,
        None => writeln!(out, "Published: {}", MISSING)?,
    }
    writeln!(out, "Title: {}", entry.title.trim())?;
    writeln!(out)?;

    let authors = entry.author_names();
    if !authors.is_empty() {
        writeln!(out, "Authors: {}", authors.join(", "))?;
    }

    let affiliations = entry.affiliations();
    if !affiliations.is_empty() {
        writeln!(out, "Affiliation: {}", affiliations.join("; "))?;
    }

    for href in entry.pdf_links() {
        writeln!(out, "PDF link: {}", href)?;
    }

    writeln!(
        out,
        "Journal reference: {}",
        entry.journal_ref().unwrap_or("No journal ref found")
    )?;
    writeln!(out, "Comments: {}", entry.comment().unwrap_or("No comment found"))?;

    let categories = entry.category_terms();
    if let Some(primary) = categories.first() {
        writeln!(out, "Primary category: {}", primary)?;
        writeln!(out, "All categories: {}", categories.join(", "))?;
    }

    writeln!(out)?;
    writeln!(out, "Abstract:")?;
    writeln!(out, "{}", entry.summary.trim())?;
    writeln!(out, "{}", rule)?;
    writeln!(out)
}
