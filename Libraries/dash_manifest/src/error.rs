//! Errors raised while fetching or parsing a manifest.
//! Sparse or unclassifiable content is never an error: it ends up as a sentinel
//! value or a [`crate::summary::Diagnostic`] instead.

use quick_xml::events::attributes::AttrError;
use thiserror::Error;

/// Failure to retrieve the raw manifest text.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to parse url {input:?}: {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("invalid url scheme: {0}")]
    InvalidScheme(String),

    #[error("got non-200 status code: {0}")]
    NonSuccessStatus(u16),

    #[error("got unexpected content type: {0}")]
    UnacceptableContentType(String),

    #[error("got empty response body")]
    EmptyBody,

    #[error("manifest is too large: {size} bytes (limit is {limit} bytes)")]
    TooLarge { size: u64, limit: u64 },

    #[error("request failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("manifest is not valid UTF-8")]
    InvalidEncoding,
}

impl FetchError {
    /// True when the request gave up because the configured timeout elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::NetworkError(e) if e.is_timeout())
    }
}

/// The manifest text is not a well-formed MPD document.
#[derive(Debug, Error)]
pub enum MalformedDocument {
    #[error("XML error at byte {position}: {source}")]
    Xml {
        position: u64,
        source: quick_xml::Error,
    },

    #[error(transparent)]
    Attribute(#[from] AttrError),

    #[error("document has no root element")]
    Empty,

    #[error("unexpected root element <{0}>, expected <MPD>")]
    UnexpectedRoot(String),

    #[error("document has more than one root element")]
    MultipleRoots,

    #[error("invalid value {value:?} for attribute `{attribute}` on <{element}>")]
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },

    #[error("document ended before <{0}> was closed")]
    Truncated(&'static str),
}

/// Any fatal failure of a full fetch-parse-extract run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to fetch manifest: {0}")]
    Fetch(#[from] FetchError),

    #[error("failed to parse manifest: {0}")]
    Parse(#[from] MalformedDocument),
}

impl Error {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Fetch(e) if e.is_timeout())
    }
}
