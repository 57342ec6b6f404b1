use serde::{Deserialize, Serialize};

/// Unique identifier for one phone call, assigned by the event source
pub type CallId = String;

/// One party on a call (caller or callee)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Display name, e.g. "John Doe"
    pub name: String,
    /// Dialable number or extension, e.g. "1002"
    pub number: String,
}

impl Party {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
        }
    }
}

/// Metadata for one active call, owned by the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    pub id: CallId,
    pub caller: Party,
    pub callee: Party,
}

/// Which transcription backend produced a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    Aws,
    Deepgram,
    Azure,
}

impl std::fmt::Display for Vendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Vendor::Aws => write!(f, "aws"),
            Vendor::Deepgram => write!(f, "deepgram"),
            Vendor::Azure => write!(f, "azure"),
        }
    }
}
