use serde::Deserialize;

use super::{ParseError, TranscriptAdapter};
use crate::models::{ChannelId, NormalizedFragment, SpeakerRun, Vendor};

#[derive(Debug, Deserialize)]
struct AzureEvent {
    #[serde(rename = "Channel")]
    channel: u64,
    #[serde(rename = "DisplayText")]
    display_text: String,
    #[serde(rename = "SpeakerId", default)]
    speaker_id: Option<String>,
    #[serde(rename = "RecognitionStatus")]
    recognition_status: String,
    #[serde(rename = "Offset", default)]
    offset: Option<u64>,
    #[serde(rename = "Duration", default)]
    duration: Option<u64>,
}

/// Azure conversation-transcription payloads: one flat object per
/// recognized phrase, already segmented by the service
pub struct AzureAdapter;

// Azure reports Offset/Duration in 100ns ticks
const TICKS_PER_SECOND: f64 = 10_000_000.0;

impl TranscriptAdapter for AzureAdapter {
    fn vendor(&self) -> Vendor {
        Vendor::Azure
    }

    fn parse(&self, raw: &str) -> Result<Vec<NormalizedFragment>, ParseError> {
        let event: AzureEvent = serde_json::from_str(raw)?;

        let start = event.offset.map(|o| o as f64 / TICKS_PER_SECOND);
        let end = match (event.offset, event.duration) {
            (Some(o), Some(d)) => Some((o + d) as f64 / TICKS_PER_SECOND),
            _ => None,
        };

        Ok(vec![NormalizedFragment {
            channel: ChannelId::Index(event.channel),
            is_final: event.recognition_status == "Success",
            runs: vec![SpeakerRun {
                speaker_tag: event.speaker_id,
                text: event.display_text,
                start,
                end,
            }],
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_phrase_with_speaker() {
        let json = r#"{
            "Type": "ConversationTranscription",
            "Id": "552502b2ed704e48940207fbe64ff3fe",
            "RecognitionStatus": "Success",
            "DisplayText": "Hello.",
            "Offset": 241100000,
            "Duration": 4400000,
            "Channel": 1,
            "SpeakerId": "Guest-1"
        }"#;

        let fragments = AzureAdapter.parse(json).unwrap();
        assert_eq!(fragments.len(), 1);

        let frag = &fragments[0];
        assert_eq!(frag.channel, ChannelId::Index(1));
        assert!(frag.is_final);
        assert_eq!(frag.runs.len(), 1);
        assert_eq!(frag.runs[0].speaker_tag.as_deref(), Some("Guest-1"));
        assert_eq!(frag.runs[0].text, "Hello.");
        assert_eq!(frag.runs[0].start, Some(24.11));
        assert_eq!(frag.runs[0].end, Some(24.55));
    }

    #[test]
    fn test_no_speaker_id_yields_untagged_run() {
        let json = r#"{"Channel": 0, "DisplayText": "Hi there.", "RecognitionStatus": "Success"}"#;
        let fragments = AzureAdapter.parse(json).unwrap();
        assert!(fragments[0].runs[0].speaker_tag.is_none());
        assert_eq!(fragments[0].runs[0].text, "Hi there.");
    }

    #[test]
    fn test_non_success_status_is_not_final() {
        let json = r#"{"Channel": 0, "DisplayText": "", "RecognitionStatus": "InitialSilenceTimeout"}"#;
        let fragments = AzureAdapter.parse(json).unwrap();
        assert!(!fragments[0].is_final);
    }

    #[test]
    fn test_missing_channel_is_error() {
        let json = r#"{"DisplayText": "Hello.", "RecognitionStatus": "Success"}"#;
        assert!(AzureAdapter.parse(json).is_err());
    }
}
