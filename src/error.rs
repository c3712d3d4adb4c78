use thiserror::Error;

/// Per-page failure. `Parse` means the page no longer looks the way the
/// spider expects, which requires a code fix rather than a retry.
#[derive(Debug, Error)]
pub enum SpiderError {
    #[error("page structure not recognized: {0}")]
    Parse(String),
    #[error("request failed: {0}")]
    Fetch(#[from] reqwest_middleware::Error),
    #[error("response could not be read: {0}")]
    Read(#[from] reqwest::Error),
}

/// A timestamp field that matched none of the formats the source uses.
#[derive(Debug, Error)]
#[error("unparseable date text: {text:?}")]
pub struct DateParseError {
    pub text: String,
}
