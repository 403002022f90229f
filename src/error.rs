//! Error types for hazard-dl
//!
//! A single crate-wide error enum. API failures carry the response body so
//! callers can see what the server said; a failed batch aborts the whole run
//! rather than producing a partial table.

use thiserror::Error;

/// Result type alias for hazard-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for hazard-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "base_url")
        key: Option<String>,
    },

    /// Invalid input data (mismatched coordinate lists, malformed location CSV, etc.)
    #[error("invalid input: {0}")]
    Input(String),

    /// Access token could not be obtained
    #[error("authentication error: {0}")]
    Auth(String),

    /// The API returned a non-success status code
    #[error("API request failed with status {status}: {body}")]
    Api {
        /// HTTP status code returned by the server
        status: u16,
        /// Raw response body, usually a JSON error description
        body: String,
    },

    /// Response header field set changed between batches of a single run
    #[error("response header fields changed between batches: expected {expected:?}, got {got:?}")]
    HeaderMismatch {
        /// Header field names seen in the first batch
        expected: Vec<String>,
        /// Header field names seen in the offending batch
        got: Vec<String>,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV read or write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_status_and_body() {
        let err = Error::Api {
            status: 500,
            body: "{\"detail\": \"internal error\"}".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("internal error"));
    }

    #[test]
    fn header_mismatch_names_both_field_sets() {
        let err = Error::HeaderMismatch {
            expected: vec!["product".into(), "simulation_years".into()],
            got: vec!["product".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("simulation_years"));
        assert!(msg.contains("changed between batches"));
    }

    #[test]
    fn io_error_converts_via_from() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
