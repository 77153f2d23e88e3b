//! Atom document model for arXiv query responses
//!
//! arXiv repeats its namespace declarations on extension elements, so any
//! element that may carry attributes is read through [`Text`]. Prefixed
//! names are also aliased by local name.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::Result;

/// Text content of an element, attributes ignored
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Text {
    #[serde(rename = "$text", default)]
    pub value: String,
}

impl Text {
    pub fn as_str(&self) -> &str {
        self.value.trim()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Feed {
    #[serde(default)]
    pub title: Option<Text>,

    #[serde(default)]
    pub updated: Option<Text>,

    #[serde(default, rename = "opensearch:totalResults", alias = "totalResults")]
    pub total_results: Option<Text>,

    #[serde(default, rename = "opensearch:itemsPerPage", alias = "itemsPerPage")]
    pub items_per_page: Option<Text>,

    #[serde(default, rename = "opensearch:startIndex", alias = "startIndex")]
    pub start_index: Option<Text>,

    #[serde(default, rename = "entry")]
    pub entries: Vec<Entry>,
}

impl Feed {
    pub fn parse(xml: &str) -> Result<Self> {
        Ok(quick_xml::de::from_str(xml)?)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub published: Option<DateTime<Utc>>,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub summary: String,

    #[serde(default, rename = "author")]
    pub authors: Vec<Author>,

    #[serde(default, rename = "link")]
    pub links: Vec<Link>,

    #[serde(default, rename = "arxiv:comment", alias = "comment")]
    pub comment: Option<Text>,

    #[serde(default, rename = "arxiv:journal_ref", alias = "journal_ref")]
    pub journal_ref: Option<Text>,

    #[serde(default, rename = "category")]
    pub categories: Vec<Category>,
}

impl Entry {
    /// Identifier after `/abs/`, or the whole id when there is none
    pub fn arxiv_id(&self) -> &str {
        let id = self.id.trim();
        id.rsplit_once("/abs/").map(|(_, tail)| tail).unwrap_or(id)
    }

    pub fn author_names(&self) -> Vec<&str> {
        self.authors.iter().map(|a| a.name.trim()).collect()
    }

    /// Distinct author affiliations in order of appearance
    pub fn affiliations(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for affiliation in self.authors.iter().flat_map(|a| a.affiliations.iter()) {
            let value = affiliation.as_str();
            if !value.is_empty() && !seen.contains(&value) {
                seen.push(value);
            }
        }
        seen
    }

    pub fn pdf_links(&self) -> impl Iterator<Item = &str> {
        self.links
            .iter()
            .filter(|link| link.title.as_deref() == Some("pdf"))
            .map(|link| link.href.as_str())
    }

    pub fn category_terms(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.term.as_str()).collect()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_ref().map(Text::as_str).filter(|s| !s.is_empty())
    }

    pub fn journal_ref(&self) -> Option<&str> {
        self.journal_ref.as_ref().map(Text::as_str).filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub name: String,

    #[serde(default, rename = "arxiv:affiliation", alias = "affiliation")]
    pub affiliations: Vec<Text>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Link {
    #[serde(rename = "@href", default)]
    pub href: String,

    #[serde(rename = "@title", default)]
    pub title: Option<String>,

    #[serde(rename = "@rel", default)]
    pub rel: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Category {
    #[serde(rename = "@term", default)]
    pub term: String,
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_parse_feed_header() {
        let feed = Feed::parse(SAMPLE_FEED).unwrap();

        assert!(feed.title.unwrap().as_str().starts_with("ArXiv Query: search_query=all:llm&id_list="));
        assert_eq!(feed.updated.unwrap().as_str(), "2025-10-11T00:00:00-04:00");
        assert_eq!(feed.total_results.unwrap().as_str(), "46108");
        assert_eq!(feed.items_per_page.unwrap().as_str(), "1");
        assert_eq!(feed.start_index.unwrap().as_str(), "0");
        assert_eq!(feed.entries.len(), 1);
    }

    #[test]
    fn test_parse_entry() {
        let feed = Feed::parse(SAMPLE_FEED).unwrap();
        let entry = &feed.entries[0];

        assert_eq!(entry.arxiv_id(), "2412.18022v1");
        assert_eq!(entry.author_names(), vec!["Kyoungmin Kim", "Anastasia Ailamaki"]);
        assert_eq!(entry.pdf_links().collect::<Vec<_>>(), vec!["http://arxiv.org/pdf/2412.18022v1"]);
        assert_eq!(entry.category_terms(), vec!["cs.DB", "cs.AI"]);
        assert!(entry.comment().is_none());
        assert!(entry.journal_ref().is_none());
        assert!(entry.affiliations().is_empty());
        assert_eq!(
            entry.published.unwrap().to_rfc3339(),
            "2024-12-23T22:34:40+00:00"
        );
    }

    #[test]
    fn test_parse_arxiv_extensions() {
        let feed = Feed::parse(ANNOTATED_ENTRY_FEED).unwrap();
        let entry = &feed.entries[0];

        assert_eq!(entry.arxiv_id(), "hep-th/9901001v2");
        assert_eq!(entry.comment(), Some("12 pages, 3 figures"));
        assert_eq!(entry.journal_ref(), Some("Phys. Lett. B 450 (1999) 1"));
        assert_eq!(entry.affiliations(), vec!["Analytical Engines Ltd"]);
        assert_eq!(entry.pdf_links().count(), 0);
        assert!(feed.title.is_none());
        assert!(feed.total_results.is_none());
    }

    #[test]
    fn test_empty_feed_has_no_entries() {
        let feed = Feed::parse(r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>Empty</title></feed>"#).unwrap();
        assert!(feed.entries.is_empty());
        assert_eq!(feed.title.unwrap().as_str(), "Empty");
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(Feed::parse("<feed><entry><id>unterminated").is_err());
    }

    #[test]
    fn test_arxiv_id_without_abs_path() {
        let entry = Entry {
            id: "2401.00001".into(),
            ..Default::default()
        };
        assert_eq!(entry.arxiv_id(), "2401.00001");
    }
}
