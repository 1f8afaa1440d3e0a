//! Upstream HTTP error classification
//!
//! Turns failed dictionary API calls into a uniform [`HttpError`] whose
//! classification drives the retry policy.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Longest slice of a non-JSON error body kept in messages
const MAX_BODY_EXCERPT: usize = 200;

/// Classification of HTTP errors for retry logic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorClassification {
    /// Client errors (4xx) - should not retry
    ClientError,
    /// Server errors (5xx) - should retry
    ServerError,
    /// Network errors - should retry
    NetworkError,
    /// Rate limiting - should retry with backoff
    RateLimitError,
    /// Rejected API key - should not retry
    AuthenticationError,
    /// Unknown errors - default to no retry
    Unknown,
}

impl ErrorClassification {
    /// Check if this error type should be retried
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorClassification::ServerError
                | ErrorClassification::NetworkError
                | ErrorClassification::RateLimitError
        )
    }

    /// Classify an HTTP status code
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            401 | 403 => ErrorClassification::AuthenticationError,
            429 => ErrorClassification::RateLimitError,
            400..=499 => ErrorClassification::ClientError,
            500..=599 => ErrorClassification::ServerError,
            _ => ErrorClassification::Unknown,
        }
    }
}

/// Normalized HTTP error representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpError {
    /// HTTP status code if available
    pub status_code: Option<u16>,
    /// Error classification for retry logic
    pub classification: ErrorClassification,
    /// Human-readable error message
    pub message: String,
    /// Retry-After header value if present, in seconds
    pub retry_after: Option<u64>,
}

impl HttpError {
    /// Create from a non-success reqwest Response
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();

        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok());

        let body = response.text().await.unwrap_or_default();

        Self {
            status_code: Some(status.as_u16()),
            classification: ErrorClassification::from_status(status),
            message: Self::extract_message(status, &body),
            retry_after,
        }
    }

    /// Create from a network/request error
    pub fn from_request_error(error: reqwest::Error) -> Self {
        let classification = if error.is_timeout() || error.is_connect() {
            ErrorClassification::NetworkError
        } else {
            ErrorClassification::Unknown
        };

        Self {
            status_code: None,
            classification,
            // reqwest includes the URL, which carries the API key
            message: error.without_url().to_string(),
            retry_after: None,
        }
    }

    /// Pull a readable message out of an error body
    ///
    /// The dictionary API answers most failures with plain text (for example
    /// an invalid key notice), occasionally with `{"error": ...}` JSON.
    fn extract_message(status: StatusCode, body: &str) -> String {
        if let Ok(json) = serde_json::from_str::<Value>(body) {
            let message = json
                .get("error")
                .and_then(|e| e.as_str().or_else(|| e.get("message").and_then(Value::as_str)))
                .or_else(|| json.get("message").and_then(Value::as_str));
            if let Some(message) = message {
                return message.to_string();
            }
        }

        let trimmed = body.trim();
        if trimmed.is_empty() {
            return status
                .canonical_reason()
                .unwrap_or("Unknown status")
                .to_string();
        }

        trimmed.chars().take(MAX_BODY_EXCERPT).collect()
    }

    /// Check if this error should trigger a retry
    pub fn should_retry(&self) -> bool {
        self.classification.is_retryable()
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HTTP Error [{}]: {} (classification: {:?})",
            self.status_code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            self.message,
            self.classification
        )
    }
}

impl std::error::Error for HttpError {}

impl From<HttpError> for crate::Error {
    fn from(http_error: HttpError) -> Self {
        crate::Error::Http {
            message: http_error.message.clone(),
            status_code: http_error.status_code,
            source: Some(anyhow::Error::new(http_error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(ErrorClassification::ServerError.is_retryable());
        assert!(ErrorClassification::NetworkError.is_retryable());
        assert!(ErrorClassification::RateLimitError.is_retryable());
        assert!(!ErrorClassification::ClientError.is_retryable());
        assert!(!ErrorClassification::AuthenticationError.is_retryable());
        assert!(!ErrorClassification::Unknown.is_retryable());
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(
            ErrorClassification::from_status(StatusCode::FORBIDDEN),
            ErrorClassification::AuthenticationError
        );
        assert_eq!(
            ErrorClassification::from_status(StatusCode::TOO_MANY_REQUESTS),
            ErrorClassification::RateLimitError
        );
        assert_eq!(
            ErrorClassification::from_status(StatusCode::NOT_FOUND),
            ErrorClassification::ClientError
        );
        assert_eq!(
            ErrorClassification::from_status(StatusCode::BAD_GATEWAY),
            ErrorClassification::ServerError
        );
    }

    #[test]
    fn test_plain_text_body_message() {
        let message = HttpError::extract_message(
            StatusCode::FORBIDDEN,
            "Invalid API key. Not subscribed for this reference.\n",
        );
        assert_eq!(message, "Invalid API key. Not subscribed for this reference.");
    }

    #[test]
    fn test_json_body_message() {
        let message = HttpError::extract_message(
            StatusCode::BAD_REQUEST,
            r#"{"error": {"message": "bad word"}}"#,
        );
        assert_eq!(message, "bad word");

        let message = HttpError::extract_message(StatusCode::BAD_REQUEST, r#"{"error": "nope"}"#);
        assert_eq!(message, "nope");
    }

    #[test]
    fn test_empty_body_uses_reason() {
        let message = HttpError::extract_message(StatusCode::SERVICE_UNAVAILABLE, "  ");
        assert_eq!(message, "Service Unavailable");
    }

    #[test]
    fn test_conversion_keeps_status() {
        let error = HttpError {
            status_code: Some(503),
            classification: ErrorClassification::ServerError,
            message: "down".to_string(),
            retry_after: None,
        };

        match crate::Error::from(error) {
            crate::Error::Http { status_code, message, .. } => {
                assert_eq!(status_code, Some(503));
                assert_eq!(message, "down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
