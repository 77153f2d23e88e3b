//! arXiv Dash feed snapshot
//!
//! One request against the arXiv Atom API, parsed and printed as a console
//! report. Independent of the dashboard and its database.

pub mod atom;
pub mod client;
pub mod error;
pub mod render;

pub use atom::{Entry, Feed};
pub use client::{FeedClient, FeedQuery};
pub use error::{FeedError, Result};
pub use render::render_feed;

/// Public arXiv query endpoint
pub const DEFAULT_API_URL: &str = "http://export.arxiv.org/api/query";
