//! Saved command handler

use crate::cli::SavedArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use tracing::instrument;
use wordwise_core::{JsonFileStore, SavedWordStore};

/// Handle the saved command
#[instrument(skip_all)]
pub async fn handle_saved(args: SavedArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let path = args
        .saved_words
        .unwrap_or_else(|| config.storage.saved_words_file.clone());
    let store = JsonFileStore::new(path);

    let words = store.list_all().await?;
    output.saved_words(&words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::output::test_support::Captured;
    use tempfile::TempDir;
    use wordwise_core::SavedWord;

    #[tokio::test]
    async fn test_lists_saved_words_as_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("saved_words.json");
        let store = JsonFileStore::new(&path);
        store
            .append(SavedWord::new("cat", vec!["a pet".to_string()], vec![]))
            .await
            .unwrap();

        let captured = Captured::default();
        let mut output =
            OutputWriter::with_writer(OutputFormat::Json, false, false, Box::new(captured.clone()));
        let args = SavedArgs {
            saved_words: Some(path),
        };
        handle_saved(args, &Config::default(), &mut output).await.unwrap();

        let value: serde_json::Value = serde_json::from_str(captured.text().trim()).unwrap();
        assert_eq!(value[0]["word"], "cat");
        assert_eq!(value[0]["meanings"][0], "a pet");
    }

    #[tokio::test]
    async fn test_missing_file_lists_nothing() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.storage.saved_words_file = dir.path().join("absent.json");

        let captured = Captured::default();
        let mut output =
            OutputWriter::with_writer(OutputFormat::Human, false, false, Box::new(captured.clone()));
        handle_saved(SavedArgs::default(), &config, &mut output).await.unwrap();

        assert_eq!(captured.text(), "No saved words\n");
    }
}
