pub mod adapters;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod registry;
pub mod resolver;
pub mod segmenter;

pub use adapters::{ParseError, TranscriptAdapter, adapter_for};
pub use io::{read_event_file, read_event_lines, render_utterance};
pub use models::{
    CallEvent, CallId, CallRecord, ChannelId, NormalizedFragment, Party, ResolvedUtterance,
    SpeakerRun, Vendor,
};
pub use pipeline::{StreamError, TranscriptPipeline};
pub use registry::CallRegistry;
pub use resolver::{ChannelRole, channel_role, resolve};
pub use segmenter::segment;
