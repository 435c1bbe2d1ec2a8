//! Summarizes the audio and video streams advertised by a DASH MPD manifest.
//!
//! The pipeline has three steps:
//! - [`fetcher::fetch`] retrieves the manifest text from an http(s) URL or a local file,
//! - [`mpd::parse_mpd`] turns it into a typed [`mpd::Mpd`] tree,
//! - [`summary::extract_summary`] walks the tree and builds a [`summary::ManifestSummary`].
//!
//! Only the first two steps can fail. Extraction always succeeds and reports
//! skipped adaptation sets as [`summary::Diagnostic`]s.

pub mod error;
pub mod fetcher;
pub mod mpd;
pub mod summary;

pub use error::{Error, FetchError, MalformedDocument};
pub use fetcher::{fetch, FetchOptions, Source};
pub use mpd::{parse_mpd, Mpd};
pub use summary::{
    extract_summary, AudioStream, Diagnostic, Extraction, ManifestSummary, VideoStream, UNKNOWN,
};

/// Parses manifest text and summarizes it.
pub fn analyze_str(xml: &str) -> Result<Extraction, MalformedDocument> {
    let mpd = parse_mpd(xml)?;
    Ok(extract_summary(&mpd))
}

/// Fetches, parses and summarizes the manifest at `source`.
pub async fn analyze(source: &Source, options: &FetchOptions) -> Result<Extraction, Error> {
    let xml = fetch(source, options).await?;
    Ok(analyze_str(&xml)?)
}
