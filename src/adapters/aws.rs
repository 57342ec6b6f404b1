use serde::Deserialize;

use super::{ParseError, TranscriptAdapter};
use crate::models::{ChannelId, NormalizedFragment, SpeakerRun, Vendor};

/// One element of the AWS payload array: a per-channel recognition result
#[derive(Debug, Deserialize)]
struct AwsResult {
    channel_id: ChannelId,
    is_final: bool,
    #[serde(default)]
    alternatives: Vec<AwsAlternative>,
}

#[derive(Debug, Deserialize)]
struct AwsAlternative {
    #[serde(default)]
    transcript: Option<String>,
    #[serde(default)]
    items: Vec<AwsItem>,
}

/// An item is either a spoken word (`pronunciation`) or an attached
/// punctuation mark; only pronunciations carry a speaker label
#[derive(Debug, Deserialize)]
struct AwsItem {
    #[serde(rename = "type", default)]
    item_type: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    speaker_label: Option<String>,
    #[serde(default)]
    start_time: Option<f64>,
    #[serde(default)]
    end_time: Option<f64>,
}

/// AWS Transcribe payloads: a JSON array of channel results, each with
/// alternatives whose `items` carry per-word diarization labels
pub struct AwsAdapter;

impl TranscriptAdapter for AwsAdapter {
    fn vendor(&self) -> Vendor {
        Vendor::Aws
    }

    fn parse(&self, raw: &str) -> Result<Vec<NormalizedFragment>, ParseError> {
        let results: Vec<AwsResult> = serde_json::from_str(raw)?;
        Ok(results.into_iter().map(normalize_result).collect())
    }
}

fn normalize_result(result: AwsResult) -> NormalizedFragment {
    let runs = match result.alternatives.first() {
        Some(alt) => runs_from_alternative(alt),
        None => vec![],
    };

    NormalizedFragment {
        channel: result.channel_id,
        is_final: result.is_final,
        runs,
    }
}

fn runs_from_alternative(alt: &AwsAlternative) -> Vec<SpeakerRun> {
    let diarized = alt.items.iter().any(|i| i.speaker_label.is_some());

    if !diarized {
        // Diarization off: the whole transcript is one untagged run
        return match &alt.transcript {
            Some(text) => vec![SpeakerRun::untagged(text.clone())],
            None => vec![],
        };
    }

    let mut runs: Vec<SpeakerRun> = Vec::new();

    for item in &alt.items {
        let Some(content) = item.content.as_deref() else {
            continue;
        };

        match item.item_type.as_deref() {
            Some("pronunciation") => {
                // A new run opens only when the item carries a label that
                // differs from the current run's; unlabeled items inherit
                let boundary = match (&item.speaker_label, runs.last()) {
                    (Some(label), Some(run)) => run.speaker_tag.as_deref() != Some(label.as_str()),
                    (_, None) => true,
                    (None, Some(_)) => false,
                };

                if boundary {
                    runs.push(SpeakerRun {
                        speaker_tag: item.speaker_label.clone(),
                        text: String::new(),
                        start: item.start_time,
                        end: item.end_time,
                    });
                }

                let run = runs.last_mut().unwrap();
                if !run.text.is_empty() {
                    run.text.push(' ');
                }
                run.text.push_str(content);
                if run.start.is_none() {
                    run.start = item.start_time;
                }
                if item.end_time.is_some() {
                    run.end = item.end_time;
                }
            }
            Some("punctuation") => {
                // Punctuation attaches to the current run, never opens one
                if let Some(run) = runs.last_mut() {
                    run.text.push_str(content);
                }
            }
            _ => {}
        }
    }

    runs
}
