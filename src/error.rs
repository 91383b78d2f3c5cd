use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Oracle error: {0}")]
    Oracle(String),

    #[error("Invalid content: {0}")]
    InvalidContent(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Stable machine-checkable tag for the error kind.
    ///
    /// Surfaced to callers instead of raw oracle/network text.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Http(_) => "http",
            Error::Json(_) => "json",
            Error::Api { .. } => "api",
            Error::RateLimited => "rate_limited",
            Error::Oracle(_) => "oracle",
            Error::InvalidContent(_) => "invalid_content",
            Error::Config(_) => "config",
        }
    }
}
