//! Error types for the Wordwise core library
//!
//! This module defines the error handling system for Wordwise, using
//! thiserror for ergonomic error definitions and anyhow for opaque sources.
//!
//! Malformed fields inside an upstream entry are never reported through
//! these types; the transformer skips them. Only whole-document conditions
//! (no entries, unreadable body, transport failures) surface as errors.

use thiserror::Error;

/// Main error type for Wordwise operations
#[derive(Error, Debug)]
pub enum Error {
    /// The upstream dictionary returned no entries for the word
    #[error("Word not found: {word}")]
    NotFound {
        word: String,
        /// Spelling suggestions offered by upstream, if any
        suggestions: Vec<String>,
    },

    /// Upstream body could not be interpreted as an entry list
    #[error("Malformed upstream response: {message}")]
    MalformedResponse {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// HTTP/Network related errors
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Upstream answered but its body could not be read
    #[error("Failed to read upstream response: {message}")]
    ResponseRead {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// HTTP request building errors
    #[error("HTTP request error: {message}")]
    HttpRequest {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Validation errors for inputs
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic internal error with context
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a lookup-miss error without suggestions
    pub fn not_found(word: impl Into<String>) -> Self {
        Error::NotFound {
            word: word.into(),
            suggestions: Vec::new(),
        }
    }

    /// Create a malformed-response error
    pub fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedResponse {
            message: message.into(),
            source: None,
        }
    }

    /// Whether this error is a lookup miss rather than a failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = Error::not_found("blorft");
        assert_eq!(err.to_string(), "Word not found: blorft");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_malformed_is_not_a_miss() {
        let err = Error::malformed("expected an array");
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("expected an array"));
    }

    #[test]
    fn test_json_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json { .. }));
    }
}
