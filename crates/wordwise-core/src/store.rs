//! Saved-word persistence
//!
//! Saved words live in a single JSON array on disk. Every append reads the
//! whole file, pushes the new record and writes the whole file back; the
//! cycle runs under an async mutex so concurrent saves cannot drop records.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use crate::types::SavedWord;
use crate::{Error, Result};

/// Narrow append-only store for saved words
#[async_trait]
pub trait SavedWordStore: Send + Sync {
    /// Append a record after all existing ones
    async fn append(&self, record: SavedWord) -> Result<()>;

    /// Every record in insertion order
    async fn list_all(&self) -> Result<Vec<SavedWord>>;
}

/// Store backed by one JSON file
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file; a missing or blank file holds no records
    async fn read_records(&self) -> Result<Vec<SavedWord>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| Error::Json {
            message: format!("saved words file {} is not valid: {}", self.path.display(), e),
            source: e,
        })
    }

    /// Replace the file contents via a sibling temp file and rename
    async fn write_records(&self, records: &[SavedWord]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut body = serde_json::to_vec_pretty(records)?;
        body.push(b'\n');

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl SavedWordStore for JsonFileStore {
    #[instrument(skip(self, record), fields(word = %record.word))]
    async fn append(&self, record: SavedWord) -> Result<()> {
        let _guard = self.lock.lock().await;

        let mut records = self.read_records().await?;
        records.push(record);
        self.write_records(&records).await?;

        debug!(total = records.len(), "Saved word appended");
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<SavedWord>> {
        let _guard = self.lock.lock().await;
        self.read_records().await
    }
}
