use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::CallEvent;

/// Read a recorded event stream: one JSON `CallEvent` per line
pub fn read_event_file(path: &Path) -> Result<Vec<CallEvent>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open event file: {:?}", path))?;
    read_event_lines(std::io::BufReader::new(file))
}

/// Parse newline-delimited events from any reader; blank lines skipped
pub fn read_event_lines(reader: impl BufRead) -> Result<Vec<CallEvent>> {
    let mut events = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", number + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let event: CallEvent = serde_json::from_str(&line)
            .with_context(|| format!("Invalid event on line {}", number + 1))?;
        events.push(event);
    }

    Ok(events)
}
