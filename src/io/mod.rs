pub mod input;
pub mod output;

pub use input::{read_event_file, read_event_lines};
pub use output::render_utterance;
