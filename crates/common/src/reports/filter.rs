//! Author filter selection
//!
//! Every filter-dependent report picks its query through [`AuthorFilter`].

use serde::Serialize;

/// Which view a report reads from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "author", rename_all = "snake_case")]
pub enum AuthorFilter {
    /// Rows whose author field contains the substring, case-insensitively
    Filtered(String),
    /// The precomputed default/recent view
    Default,
}

impl AuthorFilter {
    /// Build a filter from raw user input. Absent, empty and
    /// whitespace-only input all select the default view.
    pub fn from_input(input: Option<&str>) -> Self {
        match input.map(str::trim) {
            Some(author) if !author.is_empty() => AuthorFilter::Filtered(author.to_string()),
            _ => AuthorFilter::Default,
        }
    }

    pub fn author(&self) -> Option<&str> {
        match self {
            AuthorFilter::Filtered(author) => Some(author),
            AuthorFilter::Default => None,
        }
    }

    pub fn is_filtered(&self) -> bool {
        matches!(self, AuthorFilter::Filtered(_))
    }

    /// Bound value for an `ILIKE $1` substring match
    pub fn like_pattern(&self) -> Option<String> {
        self.author().map(|author| format!("%{}%", escape_like(author)))
    }

    /// Metric label
    pub fn label(&self) -> &'static str {
        match self {
            AuthorFilter::Filtered(_) => "filtered",
            AuthorFilter::Default => "default",
        }
    }
}

/// Escape LIKE metacharacters so user input matches literally
/// (Postgres uses backslash as the default LIKE escape).
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_and_blank_input_use_default() {
        assert_eq!(AuthorFilter::from_input(None), AuthorFilter::Default);
        assert_eq!(AuthorFilter::from_input(Some("")), AuthorFilter::Default);
        assert_eq!(AuthorFilter::from_input(Some("   \t")), AuthorFilter::Default);
    }

    #[test]
    fn test_input_is_trimmed() {
        let filter = AuthorFilter::from_input(Some("  Noah A. Smith "));
        assert_eq!(filter, AuthorFilter::Filtered("Noah A. Smith".to_string()));
        assert_eq!(filter.author(), Some("Noah A. Smith"));
        assert!(filter.is_filtered());
    }

    #[test]
    fn test_like_pattern_wraps_substring() {
        let filter = AuthorFilter::from_input(Some("Noah A. Smith"));
        assert_eq!(filter.like_pattern().as_deref(), Some("%Noah A. Smith%"));
        assert_eq!(AuthorFilter::Default.like_pattern(), None);
    }

    #[test]
    fn test_like_metacharacters_escaped() {
        assert_eq!(escape_like("100%_done\\"), "100\\%\\_done\\\\");
        let filter = AuthorFilter::from_input(Some("O'Neil_"));
        assert_eq!(filter.like_pattern().as_deref(), Some("%O'Neil\\_%"));
    }

    #[test]
    fn test_labels() {
        assert_eq!(AuthorFilter::Default.label(), "default");
        assert_eq!(AuthorFilter::Filtered("x".into()).label(), "filtered");
    }
}
