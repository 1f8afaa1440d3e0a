//! Retry logic with exponential backoff for upstream requests

use std::time::Duration;
use backoff::{backoff::Backoff, ExponentialBackoff};
use tracing::{error, warn};

use crate::http::error::HttpError;

/// Retry policy configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts after the first request
    pub max_attempts: u32,
    /// Base delay for exponential backoff (in milliseconds)
    pub base_delay_ms: u64,
    /// Maximum delay between retries (in milliseconds)
    pub max_delay_ms: u64,
    /// Whether to randomize delays
    pub jitter: bool,
    /// Multiplier for exponential backoff
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 250,
            max_delay_ms: 5_000,
            jitter: true,
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with a custom attempt budget
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Default::default()
        }
    }

    /// A policy that never retries
    pub fn none() -> Self {
        Self::new(0)
    }

    /// Set the base delay
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay_ms = delay.as_millis() as u64;
        self
    }

    /// Enable or disable jitter
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    fn create_backoff(&self) -> ExponentialBackoff {
        let mut backoff = ExponentialBackoff {
            initial_interval: Duration::from_millis(self.base_delay_ms),
            current_interval: Duration::from_millis(self.base_delay_ms),
            max_interval: Duration::from_millis(self.max_delay_ms),
            multiplier: self.multiplier,
            // attempts are bounded by max_attempts instead
            max_elapsed_time: None,
            ..Default::default()
        };

        if !self.jitter {
            backoff.randomization_factor = 0.0;
        }

        backoff
    }
}

/// Decision on whether to retry a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry the request after the specified delay
    Retry { delay: Duration },
    /// Do not retry the request
    NoRetry,
}

/// Tracks attempts for a single logical request
#[derive(Debug)]
pub struct RetryHandler {
    policy: RetryPolicy,
    attempts: u32,
    backoff: ExponentialBackoff,
}

impl RetryHandler {
    pub fn new(policy: RetryPolicy) -> Self {
        let backoff = policy.create_backoff();
        Self {
            policy,
            attempts: 0,
            backoff,
        }
    }

    /// Decide whether the failed request should run again
    pub fn should_retry(&mut self, error: &HttpError) -> RetryDecision {
        if self.attempts >= self.policy.max_attempts || !error.should_retry() {
            return RetryDecision::NoRetry;
        }

        self.attempts += 1;

        let delay = match error.retry_after {
            Some(secs) => Duration::from_secs(secs).min(Duration::from_millis(self.policy.max_delay_ms)),
            None => self
                .backoff
                .next_backoff()
                .unwrap_or(Duration::from_millis(self.policy.max_delay_ms)),
        };

        RetryDecision::Retry { delay }
    }

    /// Retries performed so far
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

/// Run `request_fn` until it succeeds or the policy gives up
pub async fn execute_with_retry<F, Fut, T>(
    mut request_fn: F,
    policy: RetryPolicy,
) -> Result<T, HttpError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, HttpError>>,
{
    let mut handler = RetryHandler::new(policy);

    loop {
        match request_fn().await {
            Ok(value) => return Ok(value),
            Err(err) => match handler.should_retry(&err) {
                RetryDecision::Retry { delay } => {
                    warn!(
                        attempt = handler.attempts(),
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Upstream request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                RetryDecision::NoRetry => {
                    error!(
                        retries = handler.attempts(),
                        error = %err,
                        "Upstream request failed, giving up"
                    );
                    return Err(err);
                }
            },
        }
    }
}
