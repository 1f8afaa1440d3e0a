//! Dictionary source abstraction
//!
//! The server and CLI only need "give me the raw entries for a word"; the
//! upstream HTTP client implements this, and tests substitute canned data.

use async_trait::async_trait;
use serde_json::Value;

use crate::transform::transform;
use crate::types::NormalizedWord;
use crate::Result;

/// A source of raw upstream entries
#[async_trait]
pub trait Dictionary: Send + Sync {
    /// Fetch the raw entry list for `word`
    ///
    /// Implementations return [`crate::Error::NotFound`] when the source
    /// knows the word does not exist.
    async fn fetch_entries(&self, word: &str) -> Result<Vec<Value>>;

    /// Fetch and normalize `word`
    async fn lookup(&self, word: &str) -> Result<NormalizedWord> {
        let entries = self.fetch_entries(word).await?;
        transform(word, &entries)
    }
}

/// A fixed word-to-entries table, useful for offline use and tests
#[derive(Debug, Clone, Default)]
pub struct StaticDictionary {
    entries: std::collections::HashMap<String, Vec<Value>>,
}

impl StaticDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the raw entries returned for `word`
    pub fn with_word(mut self, word: impl Into<String>, entries: Vec<Value>) -> Self {
        self.entries.insert(word.into(), entries);
        self
    }
}

#[async_trait]
impl Dictionary for StaticDictionary {
    async fn fetch_entries(&self, word: &str) -> Result<Vec<Value>> {
        Ok(self.entries.get(word).cloned().unwrap_or_default())
    }
}
