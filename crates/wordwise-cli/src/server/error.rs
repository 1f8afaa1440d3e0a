//! Request failures and their HTTP responses
//!
//! Bodies are short plain-text messages; the underlying cause is only
//! logged.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

/// A failed API request
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Missing '{0}' parameter")]
    MissingParameter(&'static str),

    #[error("Word not found")]
    WordNotFound,

    #[error("Error fetching data from API")]
    UpstreamFetch,

    #[error("Error reading API response")]
    UpstreamRead,

    #[error("Error parsing API response")]
    UpstreamParse,

    #[error("Error saving word")]
    SaveFailed,

    #[error("Error reading saved words file")]
    ReadSavedFailed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameter(_) => StatusCode::BAD_REQUEST,
            Self::WordNotFound => StatusCode::NOT_FOUND,
            Self::UpstreamFetch
            | Self::UpstreamRead
            | Self::UpstreamParse
            | Self::SaveFailed
            | Self::ReadSavedFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Classify a failed lookup
    pub fn from_lookup(err: &wordwise_core::Error) -> Self {
        use wordwise_core::Error as Core;

        let api_error = match err {
            Core::NotFound { .. } => Self::WordNotFound,
            Core::ResponseRead { .. } => Self::UpstreamRead,
            Core::MalformedResponse { .. } | Core::Json { .. } => Self::UpstreamParse,
            _ => Self::UpstreamFetch,
        };

        if api_error == Self::WordNotFound {
            warn!(error = %err, "Lookup miss");
        } else {
            error!(error = %err, "Lookup failed");
        }
        api_error
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ApiError::MissingParameter("text").to_string(),
            "Missing 'text' parameter"
        );
        assert_eq!(ApiError::WordNotFound.to_string(), "Word not found");
        assert_eq!(ApiError::SaveFailed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_lookup_classification() {
        use wordwise_core::Error as Core;

        assert_eq!(
            ApiError::from_lookup(&Core::not_found("cat")),
            ApiError::WordNotFound
        );
        assert_eq!(
            ApiError::from_lookup(&Core::malformed("not json")),
            ApiError::UpstreamParse
        );
        assert_eq!(
            ApiError::from_lookup(&Core::ResponseRead {
                message: "eof".to_string(),
                source: None,
            }),
            ApiError::UpstreamRead
        );
        assert_eq!(
            ApiError::from_lookup(&Core::Http {
                message: "503".to_string(),
                status_code: Some(503),
                source: None,
            }),
            ApiError::UpstreamFetch
        );
    }
}
