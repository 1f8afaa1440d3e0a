//! HTTP client for the upstream dictionary API
//!
//! This module provides:
//! - Lookup URL construction from explicit configuration
//! - Error classification of failed upstream calls
//! - Retry logic with exponential backoff
//! - Interpretation of the upstream body as an entry list

pub mod client;
pub mod error;
pub mod retry;

pub use client::{parse_entries, DictionaryClient, DictionaryConfig, DEFAULT_BASE_URL};
pub use error::{ErrorClassification, HttpError};
pub use retry::{RetryDecision, RetryPolicy};

// Re-export commonly used types
pub use reqwest::StatusCode;
