//! Logging utilities for the Wordwise CLI and server
//!
//! This module provides:
//! - Structured logging setup (compact, full, JSON)
//! - Request ID generation for server requests
//! - Sensitive data redaction (the upstream URL carries the API key)
//! - Performance timing spans

use crate::config;
use crate::error::{Error, Result};
use is_terminal::IsTerminal;
use tracing::{field, Span};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Logging configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Log level filter
    pub level: String,
    /// Output format: compact, full, json
    pub format: LogFormat,
    /// Enable console output
    pub console: bool,
    /// Include thread IDs
    pub thread_ids: bool,
    /// Include file and line numbers
    pub source_location: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact format for production
    Compact,
    /// Full format with all details
    Full,
    /// JSON structured format
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "compact" => Some(Self::Compact),
            "full" => Some(Self::Full),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            console: true,
            thread_ids: false,
            source_location: false,
        }
    }
}

impl LoggingConfig {
    /// Create logging config from verbosity level
    pub fn from_verbosity(verbosity: u8) -> Self {
        let mut config = Self::default();

        match verbosity {
            0 => {
                config.level = "warn".to_string();
            }
            1 => {
                config.level = "info".to_string();
            }
            2 => {
                config.level = "debug".to_string();
                config.source_location = true;
            }
            _ => {
                config.level = "trace".to_string();
                config.format = LogFormat::Full;
                config.source_location = true;
                config.thread_ids = true;
            }
        }

        config
    }

    /// Apply the `[logging]` section of the config file
    ///
    /// A configured level only replaces the quiet default; `-v` flags win.
    pub fn merge_with_file(&mut self, file: &config::LoggingConfig, verbosity: u8) {
        if verbosity == 0 {
            if let Some(level) = &file.level {
                self.level = level.clone();
            }
        }
        if let Some(format) = LogFormat::parse(&file.format) {
            if self.format == LogFormat::Compact {
                self.format = format;
            }
        }
    }

    /// Apply environment overrides
    pub fn merge_with_env(&mut self) {
        self.merge_with(|name| std::env::var(name).ok());
    }

    fn merge_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // RUST_LOG takes precedence
        if let Some(rust_log) = lookup("RUST_LOG") {
            self.level = rust_log;
        }

        if let Some(format) = lookup("WORDWISE_LOG_FORMAT") {
            match LogFormat::parse(&format) {
                Some(format) => self.format = format,
                None => eprintln!("Invalid log format: {}, using default", format),
            }
        }
    }
}

/// Initialize the global logging system; logs go to stderr
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_new(&config.level)
        .map_err(|e| Error::config(format!("Invalid log filter '{}': {}", config.level, e)))?;
    let ansi = config.console && std::io::stderr().is_terminal();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(config.thread_ids)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    // Each format is a distinct subscriber type
    let result = match config.format {
        LogFormat::Compact => tracing::subscriber::set_global_default(
            builder.with_ansi(ansi).compact().finish(),
        ),
        LogFormat::Json => {
            tracing::subscriber::set_global_default(builder.with_ansi(false).json().finish())
        }
        LogFormat::Full => {
            tracing::subscriber::set_global_default(builder.with_ansi(ansi).finish())
        }
    };
    result.map_err(|e| Error::config(format!("Failed to initialize logging: {}", e)))?;

    tracing::debug!(config = ?config, "Logging system initialized");
    Ok(())
}

/// Generate a unique request ID
pub fn generate_request_id() -> String {
    format!("req_{}", Uuid::new_v4().simple())
}

/// Create a span for a timed operation
pub fn create_operation_span(operation: &str, details: Option<&str>) -> Span {
    tracing::info_span!(
        "operation",
        operation = operation,
        details = details.unwrap_or(""),
        duration_ms = field::Empty,
    )
}

/// Sensitive data redaction utilities
pub mod redaction {
    use regex::Regex;
    use std::sync::OnceLock;

    static QUERY_KEY_REGEX: OnceLock<Regex> = OnceLock::new();
    static API_KEY_REGEX: OnceLock<Regex> = OnceLock::new();

    fn query_key_regex() -> &'static Regex {
        QUERY_KEY_REGEX.get_or_init(|| {
            Regex::new(r"(?i)([?&](?:api_?)?key=)[^&#\s]+").expect("static regex")
        })
    }

    fn api_key_regex() -> &'static Regex {
        API_KEY_REGEX.get_or_init(|| {
            Regex::new(r#"(?i)(api[_-]?key)(\s*[=:]\s*)['"]?[^\s'",]+['"]?"#).expect("static regex")
        })
    }

    /// Redact credentials from a string
    pub fn redact_sensitive(input: &str) -> String {
        let result = query_key_regex().replace_all(input, "${1}***");
        api_key_regex()
            .replace_all(&result, "${1}${2}***")
            .into_owned()
    }

    /// Redact credentials from JSON values
    pub fn redact_json_value(value: &mut serde_json::Value) {
        match value {
            serde_json::Value::Object(map) => {
                for (key, val) in map.iter_mut() {
                    if is_sensitive_key(key) && !val.is_null() {
                        *val = serde_json::Value::String("***".to_string());
                    } else {
                        redact_json_value(val);
                    }
                }
            }
            serde_json::Value::Array(arr) => {
                for item in arr.iter_mut() {
                    redact_json_value(item);
                }
            }
            serde_json::Value::String(s) => {
                *s = redact_sensitive(s);
            }
            _ => {}
        }
    }

    fn is_sensitive_key(key: &str) -> bool {
        let key_lower = key.to_lowercase();
        key_lower == "key"
            || key_lower.contains("api_key")
            || key_lower.contains("apikey")
            || key_lower.contains("token")
            || key_lower.contains("secret")
    }
}

/// Performance timing utilities
pub mod timing {
    use std::time::Instant;
    use tracing::Span;

    /// A timer that logs its duration when dropped
    pub struct Timer {
        start: Instant,
        span: Span,
        operation: String,
    }

    impl Timer {
        pub fn new(operation: &str) -> Self {
            Self {
                start: Instant::now(),
                span: super::create_operation_span(operation, None),
                operation: operation.to_string(),
            }
        }

        pub fn with_details(operation: &str, details: &str) -> Self {
            Self {
                start: Instant::now(),
                span: super::create_operation_span(operation, Some(details)),
                operation: operation.to_string(),
            }
        }

        /// Get elapsed time without finishing the timer
        pub fn elapsed(&self) -> std::time::Duration {
            self.start.elapsed()
        }
    }

    impl Drop for Timer {
        fn drop(&mut self) {
            let duration = self.start.elapsed();
            self.span.record("duration_ms", duration.as_millis() as u64);

            tracing::debug!(
                operation = %self.operation,
                duration_ms = duration.as_millis() as u64,
                "Operation completed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_url_key_is_redacted() {
        let url = "https://dictionaryapi.com/api/v3/references/collegiate/json/cat?key=abc-123-secret";
        let redacted = redaction::redact_sensitive(url);

        assert_eq!(
            redacted,
            "https://dictionaryapi.com/api/v3/references/collegiate/json/cat?key=***"
        );
    }

    #[test]
    fn test_key_in_the_middle_of_a_query() {
        let redacted = redaction::redact_sensitive("/x?a=1&key=s3cr3t&b=2");
        assert_eq!(redacted, "/x?a=1&key=***&b=2");
    }

    #[test]
    fn test_api_key_assignments_are_redacted() {
        let redacted = redaction::redact_sensitive("api_key = \"sk-1234567890\" other=1");
        assert!(!redacted.contains("sk-1234567890"));
        assert!(redacted.contains("other=1"));
    }

    #[test]
    fn test_plain_text_is_untouched() {
        let text = "a keyboard is not a key";
        assert_eq!(redaction::redact_sensitive(text), text);
    }

    #[test]
    fn test_json_redaction() {
        let mut value = serde_json::json!({
            "upstream": {"api_key": "abc", "base_url": "https://x.test/?key=abc"},
            "server": {"port": 8080},
            "key": null
        });

        redaction::redact_json_value(&mut value);

        assert_eq!(value["upstream"]["api_key"], "***");
        assert_eq!(value["upstream"]["base_url"], "https://x.test/?key=***");
        assert_eq!(value["server"]["port"], 8080);
        assert!(value["key"].is_null());
    }

    #[test]
    fn test_logging_config_from_verbosity() {
        let config = LoggingConfig::from_verbosity(0);
        assert_eq!(config.level, "warn");
        assert!(!config.source_location);

        let config = LoggingConfig::from_verbosity(2);
        assert_eq!(config.level, "debug");
        assert!(config.source_location);

        let config = LoggingConfig::from_verbosity(3);
        assert_eq!(config.level, "trace");
        assert_eq!(config.format, LogFormat::Full);
        assert!(config.thread_ids);
    }

    #[test]
    fn test_file_level_only_applies_without_flags() {
        let file = config::LoggingConfig {
            level: Some("info".to_string()),
            format: "json".to_string(),
        };

        let mut quiet = LoggingConfig::from_verbosity(0);
        quiet.merge_with_file(&file, 0);
        assert_eq!(quiet.level, "info");
        assert_eq!(quiet.format, LogFormat::Json);

        let mut verbose = LoggingConfig::from_verbosity(2);
        verbose.merge_with_file(&file, 2);
        assert_eq!(verbose.level, "debug");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = LoggingConfig::default();
        config.merge_with(|name| match name {
            "RUST_LOG" => Some("wordwise_core=trace".to_string()),
            "WORDWISE_LOG_FORMAT" => Some("JSON".to_string()),
            _ => None,
        });

        assert_eq!(config.level, "wordwise_core=trace");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_request_ids_are_unique() {
        let a = generate_request_id();
        let b = generate_request_id();
        assert!(a.starts_with("req_"));
        assert_ne!(a, b);
    }
}
