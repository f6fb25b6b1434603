//! Error types for gallery generation

use thiserror::Error;

/// Result type alias for gallery operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fetching records or producing the page
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or missing configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Transport-level failure talking to the image source
    #[error("Failed to fetch images: {0}")]
    FetchError(String),

    /// The search API answered with a non-success status
    #[error("Search API returned {status}: {message}")]
    ApiError { status: u16, message: String },

    /// A response or fixture could not be decoded
    #[error("Failed to decode records: {0}")]
    DecodeError(String),

    /// Failed to produce the page
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Filesystem error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::DecodeError(err.to_string())
    }
}

#[cfg(feature = "cloudinary")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::FetchError(err.to_string())
    }
}
