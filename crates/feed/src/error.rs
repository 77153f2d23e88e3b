//! Feed fetch errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FeedError>;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed endpoint returned {status}")]
    Status { status: reqwest::StatusCode },

    #[error("Malformed Atom document: {0}")]
    Parse(#[from] quick_xml::DeError),
}
