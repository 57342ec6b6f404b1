pub mod call;
pub mod event;
pub mod fragment;
pub mod utterance;

pub use call::*;
pub use event::*;
pub use fragment::*;
pub use utterance::*;
