use crate::mpd::AdaptationSet;
use crate::summary::SkipReason;

const AUDIO_CONTENT_TYPE: &str = "audio";
const VIDEO_CONTENT_TYPE: &str = "video";
const AUDIO_MIME_TYPE: &str = "audio/mp4";
const VIDEO_MIME_TYPE: &str = "video/mp4";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Audio,
    Unclassified(SkipReason),
}

/// Decides whether an adaptation set carries video, audio, or neither.
///
/// Both `contentType` and `mimeType` have to match: subtitle and metadata
/// tracks sometimes claim the "video" content type with a different MIME type.
pub fn classify(set: &AdaptationSet) -> MediaKind {
    let (content_type, mime_type) = match (set.content_type.as_deref(), set.mime_type.as_deref()) {
        (Some(content_type), Some(mime_type)) => (content_type, mime_type),
        (None, Some(_)) => return MediaKind::Unclassified(SkipReason::MissingContentType),
        (Some(_), None) => return MediaKind::Unclassified(SkipReason::MissingMimeType),
        (None, None) => {
            return MediaKind::Unclassified(SkipReason::MissingContentTypeAndMimeType)
        }
    };

    match (content_type, mime_type) {
        (VIDEO_CONTENT_TYPE, VIDEO_MIME_TYPE) => MediaKind::Video,
        (AUDIO_CONTENT_TYPE, AUDIO_MIME_TYPE) => MediaKind::Audio,
        _ => MediaKind::Unclassified(SkipReason::UnsupportedType {
            content_type: content_type.to_string(),
            mime_type: mime_type.to_string(),
        }),
    }
}
