use serde::Deserialize;

use super::{ParseError, TranscriptAdapter};
use crate::models::{ChannelId, NormalizedFragment, SpeakerRun, Vendor};

#[derive(Debug, Deserialize)]
struct DeepgramEvent {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    channel_index: Vec<u64>,
    #[serde(default)]
    is_final: bool,
    #[serde(default)]
    channel: Option<DeepgramChannel>,
}

#[derive(Debug, Deserialize)]
struct DeepgramChannel {
    #[serde(default)]
    alternatives: Vec<DeepgramAlternative>,
}

#[derive(Debug, Deserialize)]
struct DeepgramAlternative {
    #[serde(default)]
    transcript: String,
    #[serde(default)]
    words: Vec<DeepgramWord>,
}

#[derive(Debug, Deserialize)]
struct DeepgramWord {
    word: String,
    #[serde(default)]
    start: Option<f64>,
    #[serde(default)]
    end: Option<f64>,
    /// Numeric diarized speaker, absent when diarization is off
    #[serde(default)]
    speaker: Option<u64>,
}

/// Deepgram live payloads: a single-channel `Results` message whose
/// first alternative carries diarized `words`
pub struct DeepgramAdapter;

impl TranscriptAdapter for DeepgramAdapter {
    fn vendor(&self) -> Vendor {
        Vendor::Deepgram
    }

    fn parse(&self, raw: &str) -> Result<Vec<NormalizedFragment>, ParseError> {
        let event: DeepgramEvent = serde_json::from_str(raw)?;

        // Metadata, UtteranceEnd etc. carry no transcript; not an error
        if event.event_type != "Results" {
            return Ok(vec![]);
        }

        let channel = event
            .channel_index
            .first()
            .copied()
            .ok_or(ParseError::MissingField("channel_index"))?;

        let runs = event
            .channel
            .as_ref()
            .and_then(|c| c.alternatives.first())
            .map(runs_from_alternative)
            .unwrap_or_default();

        Ok(vec![NormalizedFragment {
            channel: ChannelId::Index(channel),
            is_final: event.is_final,
            runs,
        }])
    }
}

fn runs_from_alternative(alt: &DeepgramAlternative) -> Vec<SpeakerRun> {
    let diarized = alt.words.iter().any(|w| w.speaker.is_some());

    if !diarized {
        if alt.transcript.is_empty() {
            return vec![];
        }
        return vec![SpeakerRun::untagged(alt.transcript.clone())];
    }

    let mut runs: Vec<SpeakerRun> = Vec::new();

    for word in &alt.words {
        // Only a word tagged with a different speaker opens a new run;
        // untagged words continue the current one
        let boundary = match (word.speaker, runs.last()) {
            (Some(s), Some(run)) => run.speaker_tag.as_deref() != Some(s.to_string().as_str()),
            (_, None) => true,
            (None, Some(_)) => false,
        };

        if boundary {
            runs.push(SpeakerRun {
                speaker_tag: word.speaker.map(|s| s.to_string()),
                text: String::new(),
                start: word.start,
                end: word.end,
            });
        }

        let run = runs.last_mut().unwrap();
        if !run.text.is_empty() {
            run.text.push(' ');
        }
        run.text.push_str(&word.word);
        if run.start.is_none() {
            run.start = word.start;
        }
        if word.end.is_some() {
            run.end = word.end;
        }
    }

    runs
}
