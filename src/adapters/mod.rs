pub mod aws;
pub mod azure;
pub mod deepgram;

pub use aws::AwsAdapter;
pub use azure::AzureAdapter;
pub use deepgram::DeepgramAdapter;

use crate::models::{NormalizedFragment, Vendor};

/// Failure to parse one vendor payload.
///
/// Always local to the fragment: the caller reports it and moves on,
/// other calls and later fragments are unaffected.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing field: {0}")]
    MissingField(&'static str),
}

/// Shared parsing capability over the three vendor payload shapes.
///
/// `parse` returns a list because a single AWS event reports one result
/// per channel, and a Deepgram event of an unhandled type normalizes to
/// an empty list rather than an error.
pub trait TranscriptAdapter {
    fn vendor(&self) -> Vendor;

    fn parse(&self, raw: &str) -> Result<Vec<NormalizedFragment>, ParseError>;
}

/// Select the adapter for a vendor tag, once at the pipeline boundary
pub fn adapter_for(vendor: Vendor) -> &'static dyn TranscriptAdapter {
    match vendor {
        Vendor::Aws => &AwsAdapter,
        Vendor::Deepgram => &DeepgramAdapter,
        Vendor::Azure => &AzureAdapter,
    }
}
