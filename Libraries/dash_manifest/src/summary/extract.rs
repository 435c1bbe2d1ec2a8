//! Field extractors. Each one is total: anything absent, empty or zero becomes [`UNKNOWN`].

use crate::mpd::Descriptor;
use crate::summary::UNKNOWN;

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn non_zero(value: Option<u64>) -> Option<u64> {
    value.filter(|v| *v != 0)
}

/// The adaptation set's codec string wins since it is shared by all of its
/// representations; the representation's own value is the fallback.
pub fn codec(adaptation_set_codecs: Option<&str>, representation_codecs: Option<&str>) -> String {
    non_empty(adaptation_set_codecs)
        .or_else(|| non_empty(representation_codecs))
        .unwrap_or(UNKNOWN)
        .to_string()
}

pub fn bitrate(bandwidth: Option<u64>) -> String {
    match non_zero(bandwidth) {
        Some(bandwidth) => bandwidth.to_string(),
        None => UNKNOWN.to_string(),
    }
}

/// Reports `<width>x<height>` only when both dimensions are known.
pub fn resolution(width: Option<u64>, height: Option<u64>) -> String {
    match (non_zero(width), non_zero(height)) {
        (Some(width), Some(height)) => format!("{}x{}", width, height),
        _ => UNKNOWN.to_string(),
    }
}

/// Joins the adaptation set's channel descriptors, falling back to the
/// representation's own configuration when the set declares none.
pub fn channels(adaptation_set_descriptors: &[Descriptor], configuration: Option<&Descriptor>) -> String {
    let values: Vec<&str> = adaptation_set_descriptors
        .iter()
        .filter_map(|descriptor| non_empty(descriptor.value.as_deref()))
        .collect();

    if !values.is_empty() {
        return values.join(",");
    }

    non_empty(configuration.and_then(|c| c.value.as_deref()))
        .unwrap_or(UNKNOWN)
        .to_string()
}

pub fn language(lang: Option<&str>) -> String {
    non_empty(lang).unwrap_or(UNKNOWN).to_string()
}
