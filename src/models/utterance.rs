use serde::{Deserialize, Serialize};

use super::{CallId, Party, Vendor};

/// Final pipeline output: one speaker-attributed, trimmed text segment.
///
/// Utterances for a call are emitted in the order their source runs
/// appeared; downstream consumers treat the stream as time-ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedUtterance {
    /// Generated UUID, unique per emitted utterance
    pub utterance_id: String,
    pub call_id: CallId,
    pub vendor: Vendor,
    /// The call party the source channel belongs to
    pub speaker: Party,
    /// Diarized sub-speaker tag within the channel, when present
    pub speaker_tag: Option<String>,
    pub text: String,
    pub is_final: bool,
    /// Start of the utterance in seconds, when word timings were supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
}
