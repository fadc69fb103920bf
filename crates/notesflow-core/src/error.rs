//! Error types for notesflow-core

use thiserror::Error;

/// Result type alias using notesflow-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in notesflow-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure talking to the notes API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The notes API answered with a non-2xx status
    #[error("API Error: {status} {reason}")]
    Api { status: u16, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error means the remote side could not be reached or
    /// refused the request.
    #[must_use]
    pub const fn is_connectivity(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Api { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_renders_status_and_reason() {
        let error = Error::Api {
            status: 503,
            reason: "Service Unavailable".to_string(),
        };
        assert_eq!(error.to_string(), "API Error: 503 Service Unavailable");
        assert!(error.is_connectivity());
    }

    #[test]
    fn invalid_input_is_not_connectivity() {
        assert!(!Error::InvalidInput("bad".to_string()).is_connectivity());
    }
}
