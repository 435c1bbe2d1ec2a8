//! Stream summary extracted from a parsed manifest.
//!
//! The summary has a fixed shape: every stream entry always carries all of its fields,
//! and [`UNKNOWN`] stands in for anything the manifest does not say.

pub mod classifier;
pub mod extract;
pub mod traversal;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use classifier::{classify, MediaKind};
pub use traversal::extract_summary;

/// Placeholder for a field that could not be determined.
pub const UNKNOWN: &str = "unknown";

/// Audio and video streams of a manifest, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestSummary {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub videos: Vec<VideoStream>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audios: Vec<AudioStream>,
}

impl ManifestSummary {
    pub fn is_empty(&self) -> bool {
        self.videos.is_empty() && self.audios.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoStream {
    pub codec: String,
    pub bitrate: String,
    /// "<width>x<height>"
    pub resolution: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioStream {
    pub codec: String,
    pub bitrate: String,
    /// Channel count for most codecs, a hexadecimal channel mask for Dolby.
    pub channels: String,
    pub language: String,
}

/// Why an adaptation set was left out of the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingContentType,
    MissingMimeType,
    MissingContentTypeAndMimeType,
    UnsupportedType {
        content_type: String,
        mime_type: String,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingContentType => write!(f, "contentType is missing"),
            SkipReason::MissingMimeType => write!(f, "mimeType is missing"),
            SkipReason::MissingContentTypeAndMimeType => {
                write!(f, "contentType and mimeType are missing")
            }
            SkipReason::UnsupportedType {
                content_type,
                mime_type,
            } => write!(
                f,
                "unsupported contentType {:?} with mimeType {:?}",
                content_type, mime_type
            ),
        }
    }
}

/// A non-fatal anomaly found while walking the manifest.
/// Positions are zero-based indices in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub period: usize,
    /// The period's `id` attribute, when it has one.
    pub period_id: Option<String>,
    pub adaptation_set: usize,
    /// The adaptation set's `id` attribute, when it has one.
    pub id: Option<String>,
    pub reason: SkipReason,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Period {}", self.period)?;
        if let Some(id) = &self.period_id {
            write!(f, " (id {:?})", id)?;
        }
        write!(f, " AdaptationSet {}", self.adaptation_set)?;
        if let Some(id) = &self.id {
            write!(f, " (id {:?})", id)?;
        }
        write!(f, ": {}, skipping", self.reason)
    }
}

/// Result of walking a manifest: the summary plus everything that was skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub summary: ManifestSummary,
    pub diagnostics: Vec<Diagnostic>,
}
