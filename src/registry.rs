use std::collections::HashMap;

use crate::models::{CallId, CallRecord, Party};

/// Owned map of active calls, keyed by call id.
///
/// The pipeline holds one registry per instance; lifecycle events are
/// its only mutators, so a lookup can never observe a half-applied
/// start or end.
#[derive(Debug, Default)]
pub struct CallRegistry {
    calls: HashMap<CallId, CallRecord>,
}

impl CallRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a call. A duplicate start replaces the existing record.
    pub fn start(&mut self, call_id: impl Into<CallId>, caller: Party, callee: Party) {
        let id = call_id.into();
        self.calls.insert(
            id.clone(),
            CallRecord {
                id,
                caller,
                callee,
            },
        );
    }

    /// Remove a call. No-op when the id was never started.
    pub fn end(&mut self, call_id: &str) {
        self.calls.remove(call_id);
    }

    /// Pure read; unknown ids are a normal miss, not an error
    pub fn lookup(&self, call_id: &str) -> Option<&CallRecord> {
        self.calls.get(call_id)
    }

    pub fn active_count(&self) -> usize {
        self.calls.len()
    }
}
