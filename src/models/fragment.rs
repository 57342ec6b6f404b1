use serde::{Deserialize, Serialize};

/// Vendor-raw channel identifier, before it is mapped to a call party.
///
/// AWS labels channels as strings ("ch_0"), Deepgram and Azure use
/// numeric indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChannelId {
    Index(u64),
    Label(String),
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelId::Index(i) => write!(f, "{}", i),
            ChannelId::Label(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for ChannelId {
    fn from(i: u64) -> Self {
        ChannelId::Index(i)
    }
}

impl From<&str> for ChannelId {
    fn from(s: &str) -> Self {
        ChannelId::Label(s.to_string())
    }
}

/// A maximal contiguous span of tokens sharing one diarized speaker tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerRun {
    /// Diarized speaker tag, `None` when the vendor did no diarization
    #[serde(default)]
    pub speaker_tag: Option<String>,
    /// Concatenated text of the run, untrimmed at this stage
    pub text: String,
    /// Start of the run in seconds, when the vendor supplied word timings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    /// End of the run in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
}

impl SpeakerRun {
    pub fn untagged(text: impl Into<String>) -> Self {
        Self {
            speaker_tag: None,
            text: text.into(),
            start: None,
            end: None,
        }
    }
}

/// Adapter output: one vendor channel result, normalized but not yet
/// resolved against the call registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFragment {
    pub channel: ChannelId,
    pub is_final: bool,
    /// Runs in source order; the segmenter emits one utterance per run
    pub runs: Vec<SpeakerRun>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_id_display() {
        assert_eq!(ChannelId::Index(0).to_string(), "0");
        assert_eq!(ChannelId::Label("ch_1".into()).to_string(), "ch_1");
    }

    #[test]
    fn test_channel_id_equality() {
        assert_eq!(ChannelId::from(1), ChannelId::Index(1));
        assert_ne!(ChannelId::from("ch_0"), ChannelId::Index(0));
    }
}
