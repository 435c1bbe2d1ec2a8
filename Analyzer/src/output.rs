use dash_manifest::ManifestSummary;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

const JSON_INDENT: &[u8] = b"    ";

/// Renders the summary as pretty JSON with a four space indent.
pub fn render_json(summary: &ManifestSummary) -> Result<String, serde_json::Error> {
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(JSON_INDENT));
    summary.serialize(&mut serializer)?;
    String::from_utf8(out).map_err(serde::ser::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_manifest::{AudioStream, VideoStream};

    #[test]
    fn renders_with_four_space_indent() {
        let summary = ManifestSummary {
            videos: vec![VideoStream {
                codec: "avc1".into(),
                bitrate: "500000".into(),
                resolution: "640x360".into(),
            }],
            audios: vec![AudioStream {
                codec: "mp4a.40.2".into(),
                bitrate: "128000".into(),
                channels: "2".into(),
                language: "unknown".into(),
            }],
        };

        let expected = r#"{
    "videos": [
        {
            "codec": "avc1",
            "bitrate": "500000",
            "resolution": "640x360"
        }
    ],
    "audios": [
        {
            "codec": "mp4a.40.2",
            "bitrate": "128000",
            "channels": "2",
            "language": "unknown"
        }
    ]
}"#;
        assert_eq!(render_json(&summary).unwrap(), expected);
    }

    #[test]
    fn non_ascii_values_are_kept_intact() {
        let summary = ManifestSummary {
            videos: vec![],
            audios: vec![AudioStream {
                codec: "ec-3".into(),
                bitrate: "256000".into(),
                channels: "F801".into(),
                language: "日本語".into(),
            }],
        };

        let json = render_json(&summary).unwrap();
        assert!(json.contains(r#""language": "日本語""#));
        let parsed: ManifestSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, summary);
    }

    #[test]
    fn empty_summary_renders_as_empty_object() {
        assert_eq!(render_json(&ManifestSummary::default()).unwrap(), "{}");
    }
}
