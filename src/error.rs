//! Unified error type for the imgvariants library.
//!
//! Only the outer layers (configuration loading, input checking, client
//! construction) can fail. Size probes and the enrichment pipeline absorb
//! their failures into [`ProbeOutcome`](crate::probe::ProbeOutcome) instead.

/// Errors raised outside the probe/enrichment core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration could not be parsed or is unusable.
    #[error("Config error: {0}")]
    Config(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The base identifier cannot be probed (empty, or not http/https).
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {source}")]
    Http {
        /// The underlying reqwest error.
        #[from]
        source: reqwest::Error,
    },
}

impl Error {
    /// Convenience constructor for [`Error::Config`].
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
