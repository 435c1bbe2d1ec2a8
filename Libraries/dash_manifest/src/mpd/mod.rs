//! DASH manifest data structures (MPD and related types).
//! Only the parts needed to describe the available audio and video streams are kept:
//! periods, adaptation sets, representations and their channel descriptors.
//! Every attribute is optional because real-world manifests routinely leave them out.

pub mod parser;

use std::str::FromStr;

pub use parser::parse_mpd;
pub use crate::error::MalformedDocument;

/// A `schemeIdUri`/`value` descriptor element, e.g. `AudioChannelConfiguration`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptor {
    pub scheme_id_uri: Option<String>,
    /// Raw descriptor value. For channel configurations this is either a plain
    /// channel count ("2") or a hexadecimal channel mask ("F801").
    pub value: Option<String>,
}

/// A single encoded variant within an adaptation set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Representation {
    /// An RFC6381 codec string, e.g. "avc1.42C00D".
    pub codecs: Option<String>,
    /// Average bandwidth in bits per second (bps).
    pub bandwidth: Option<u64>,
    pub width: Option<u64>,
    pub height: Option<u64>,
    pub audio_channel_configuration: Option<Descriptor>,
}

/// An adaptation set groups interchangeable representations of the same content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdaptationSet {
    pub id: Option<String>,
    /// Content type of the adaptation set (e.g., "audio" or "video").
    pub content_type: Option<String>,
    /// MIME type of the media (e.g., "video/mp4").
    pub mime_type: Option<String>,
    /// Codec string shared by all representations of the set.
    pub codecs: Option<String>,
    /// Content language, in RFC 5646 format.
    pub lang: Option<String>,
    /// All `AudioChannelConfiguration` descriptors declared on the set, in document order.
    pub audio_channel_configurations: Vec<Descriptor>,
    /// All representations available in this adaptation set, in document order.
    pub representations: Vec<Representation>,
}

/// A time segment of the presentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Period {
    pub id: Option<String>,
    pub adaptation_sets: Vec<AdaptationSet>,
}

/// Root of a parsed MPD document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mpd {
    pub periods: Vec<Period>,
}

impl FromStr for Mpd {
    type Err = MalformedDocument;

    fn from_str(xml: &str) -> Result<Self, Self::Err> {
        parse_mpd(xml)
    }
}
