use serde::{Deserialize, Serialize};

use super::{CallId, Party, Vendor};

/// Discriminated event delivered by the collaborating event-socket layer.
///
/// The transcription payload stays opaque here; the matching vendor
/// adapter parses it inside the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CallEvent {
    CallStart {
        call_id: CallId,
        caller: Party,
        callee: Party,
    },
    CallEnd {
        call_id: CallId,
    },
    Transcription {
        call_id: CallId,
        vendor: Vendor,
        /// Raw vendor JSON, exactly as received
        payload: String,
    },
}

impl CallEvent {
    pub fn call_id(&self) -> &str {
        match self {
            CallEvent::CallStart { call_id, .. }
            | CallEvent::CallEnd { call_id }
            | CallEvent::Transcription { call_id, .. } => call_id,
        }
    }
}
