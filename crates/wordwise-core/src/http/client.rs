//! Merriam-Webster collegiate API client
//!
//! Builds lookup URLs from explicit configuration, executes them with the
//! retry policy, and turns the response body into an entry list.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::dictionary::Dictionary;
use crate::http::{retry::execute_with_retry, HttpError, RetryPolicy};
use crate::{Error, Result};

/// Default collegiate dictionary endpoint; the word is appended as a path segment
pub const DEFAULT_BASE_URL: &str = "https://dictionaryapi.com/api/v3/references/collegiate/json";

/// Configuration for the dictionary client
#[derive(Debug, Clone)]
pub struct DictionaryConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Endpoint the word is appended to
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Retry policy for failed requests
    pub retry_policy: RetryPolicy,
}

impl DictionaryConfig {
    /// Configuration with default endpoint, timeout and retries
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            retry_policy: RetryPolicy::default(),
        }
    }

    /// Override the endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Override the retry policy
    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }
}

/// HTTP client for the upstream dictionary
#[derive(Debug, Clone)]
pub struct DictionaryClient {
    client: ReqwestClient,
    base_url: Url,
    config: DictionaryConfig,
}

impl DictionaryClient {
    /// Create a client, validating the configuration
    pub fn new(config: DictionaryConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::Configuration {
                message: "dictionary API key is not set".to_string(),
                source: None,
            });
        }

        let base_url = Url::parse(&config.base_url).map_err(|e| Error::Configuration {
            message: format!("invalid dictionary base URL '{}': {}", config.base_url, e),
            source: Some(e.into()),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Configuration {
                message: format!("dictionary base URL '{}' cannot take a path", config.base_url),
                source: None,
            });
        }

        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::HttpRequest {
                message: format!("Failed to create HTTP client: {}", e),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// URL for looking up `word`, with the word percent-encoded as a path segment
    pub fn lookup_url(&self, word: &str) -> Url {
        self.build_url(word, &self.config.api_key)
    }

    /// Same as [`lookup_url`](Self::lookup_url) with the key masked
    pub fn redacted_lookup_url(&self, word: &str) -> Url {
        self.build_url(word, "***")
    }

    fn build_url(&self, word: &str, key: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(word);
        }
        url.query_pairs_mut().append_pair("key", key);
        url
    }

    /// Fetch the raw response body for `word`
    async fn fetch_body(&self, word: &str) -> Result<String> {
        let url = self.lookup_url(word);
        debug!(url = %self.redacted_lookup_url(word), "Requesting upstream entries");
        let client = &self.client;

        let response = execute_with_retry(
            || {
                let request = client.get(url.clone());
                async move {
                    let response = request
                        .send()
                        .await
                        .map_err(HttpError::from_request_error)?;

                    if !response.status().is_success() {
                        return Err(HttpError::from_response(response).await);
                    }

                    Ok(response)
                }
            },
            self.config.retry_policy.clone(),
        )
        .await?;

        response.text().await.map_err(|e| Error::ResponseRead {
            message: e.without_url().to_string(),
            source: None,
        })
    }
}

#[async_trait]
impl Dictionary for DictionaryClient {
    #[instrument(skip(self))]
    async fn fetch_entries(&self, word: &str) -> Result<Vec<Value>> {
        let body = self.fetch_body(word).await?;
        debug!(bytes = body.len(), "Received upstream response");
        parse_entries(word, &body)
    }
}

/// Interpret an upstream body as an entry list
///
/// The API answers unknown words with a JSON array of spelling suggestions
/// instead of entries; that case and the empty array are lookup misses.
pub fn parse_entries(word: &str, body: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(body).map_err(|e| Error::MalformedResponse {
        message: format!("response body is not JSON: {}", e),
        source: Some(e.into()),
    })?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(Error::malformed(format!(
                "expected a JSON array of entries, got {}",
                json_kind(&other)
            )))
        }
    };

    if items.is_empty() {
        return Err(Error::not_found(word));
    }

    if items.iter().all(Value::is_string) {
        let suggestions = items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();
        return Err(Error::NotFound {
            word: word.to_string(),
            suggestions,
        });
    }

    Ok(items)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
