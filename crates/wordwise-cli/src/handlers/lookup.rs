//! Lookup command handler

use crate::cli::LookupArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use std::path::Path;
use tracing::{debug, info, instrument};
use wordwise_core::{Dictionary, DictionaryClient, LookupRequest, NormalizedWord};

/// Handle the lookup command
#[instrument(skip(args, config, output), fields(word = %args.word))]
pub async fn handle_lookup(args: LookupArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let request = LookupRequest::new(args.word)?;
    let client = DictionaryClient::new(config.dictionary_config(args.api_key.as_deref())?)?;

    let word = lookup(&client, &request, output).await?;
    output.word(&word)?;

    if let Some(path) = args.output_file {
        write_record(&word, &path)?;
        output.success(&format!("Saved to {}", path.display()))?;
    }
    Ok(())
}

/// Run a lookup with a spinner on interactive terminals
async fn lookup(
    dictionary: &dyn Dictionary,
    request: &LookupRequest,
    output: &OutputWriter,
) -> Result<NormalizedWord> {
    let timer = Timer::with_details("lookup", &request.word);
    let spinner = output.spinner(&format!("Looking up '{}'...", request.word));

    let result = dictionary.lookup(&request.word).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let word = result?;

    info!(
        definitions = word.definitions.len(),
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "Lookup finished"
    );
    Ok(word)
}

/// Write the record as YAML or pretty JSON, by file extension
fn write_record(word: &NormalizedWord, path: &Path) -> Result<()> {
    let content = match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::to_string(word)?,
        _ => serde_json::to_string_pretty(word)?,
    };
    debug!(path = %path.display(), bytes = content.len(), "Writing record");
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::error::Error;
    use crate::output::test_support::Captured;
    use serde_json::json;
    use tempfile::TempDir;
    use wordwise_core::StaticDictionary;

    fn dictionary() -> StaticDictionary {
        StaticDictionary::new().with_word(
            "cat",
            vec![json!({
                "hwi": {"prs": [{"mw": "ˈkat"}]},
                "fl": "noun",
                "def": [{"sseq": [[["sense", {"dt": [["text", "{bc}a small mammal {sx|feline||}"]]}]]]}]
            })],
        )
    }

    fn writer() -> OutputWriter {
        OutputWriter::with_writer(OutputFormat::Json, false, true, Box::new(Captured::default()))
    }

    #[tokio::test]
    async fn test_lookup_normalizes() {
        let request = LookupRequest::new("cat").unwrap();
        let word = lookup(&dictionary(), &request, &writer()).await.unwrap();

        assert_eq!(word.definitions[0].part_of_speech, "noun");
        assert_eq!(word.definitions[0].senses, vec!["a small mammal"]);
    }

    #[tokio::test]
    async fn test_lookup_miss_is_a_core_not_found() {
        let request = LookupRequest::new("dog").unwrap();
        let err = lookup(&dictionary(), &request, &writer()).await.unwrap_err();

        assert!(matches!(err, Error::Core(ref e) if e.is_not_found()));
        assert_eq!(err.exit_code(), 4);
    }

    #[tokio::test]
    async fn test_empty_word_is_rejected() {
        let args = LookupArgs {
            word: String::new(),
            api_key: Some("k".to_string()),
            output_file: None,
        };
        let err = handle_lookup(args, &Config::default(), &mut writer())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Core(wordwise_core::Error::Validation { .. })));
    }

    #[test]
    fn test_write_record_by_extension() {
        let dir = TempDir::new().unwrap();
        let word = NormalizedWord::new("cat");

        let json_path = dir.path().join("cat.json");
        write_record(&word, &json_path).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(value["text"], "cat");
        assert_eq!(value["definitions"], json!([]));

        let yaml_path = dir.path().join("cat.yaml");
        write_record(&word, &yaml_path).unwrap();
        assert!(std::fs::read_to_string(&yaml_path).unwrap().contains("text: cat"));
    }
}
