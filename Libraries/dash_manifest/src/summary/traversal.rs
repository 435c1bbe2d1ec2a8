use crate::mpd::{AdaptationSet, Mpd};
use crate::summary::classifier::{classify, MediaKind};
use crate::summary::{extract, AudioStream, Diagnostic, Extraction, VideoStream};

/// Walks every period and adaptation set of the manifest and summarizes its streams.
///
/// One entry is produced per representation, in document order. Periods are
/// flattened into the same two lists. Adaptation sets that are neither audio
/// nor video are skipped and reported as diagnostics; this never fails.
pub fn extract_summary(mpd: &Mpd) -> Extraction {
    let mut extraction = Extraction::default();

    for (period_index, period) in mpd.periods.iter().enumerate() {
        for (set_index, set) in period.adaptation_sets.iter().enumerate() {
            match classify(set) {
                MediaKind::Video => extraction.summary.videos.extend(video_streams(set)),
                MediaKind::Audio => extraction.summary.audios.extend(audio_streams(set)),
                MediaKind::Unclassified(reason) => extraction.diagnostics.push(Diagnostic {
                    period: period_index,
                    period_id: period.id.clone(),
                    adaptation_set: set_index,
                    id: set.id.clone(),
                    reason,
                }),
            }
        }
    }

    extraction
}

fn video_streams(set: &AdaptationSet) -> impl Iterator<Item = VideoStream> + '_ {
    set.representations.iter().map(move |rep| VideoStream {
        codec: extract::codec(set.codecs.as_deref(), rep.codecs.as_deref()),
        bitrate: extract::bitrate(rep.bandwidth),
        resolution: extract::resolution(rep.width, rep.height),
    })
}

fn audio_streams(set: &AdaptationSet) -> impl Iterator<Item = AudioStream> + '_ {
    set.representations.iter().map(move |rep| AudioStream {
        codec: extract::codec(set.codecs.as_deref(), rep.codecs.as_deref()),
        bitrate: extract::bitrate(rep.bandwidth),
        channels: extract::channels(
            &set.audio_channel_configurations,
            rep.audio_channel_configuration.as_ref(),
        ),
        language: extract::language(set.lang.as_deref()),
    })
}
