//! Core types and data structures for Wordwise
//!
//! This module defines the normalized word record returned to clients and
//! the saved-word record persisted by the store.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Format used for `savedDate`
pub const SAVED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A word lookup request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRequest {
    /// The query word, passed upstream as-is
    pub word: String,
}

impl LookupRequest {
    /// Create a request, rejecting empty words
    pub fn new(word: impl Into<String>) -> crate::Result<Self> {
        let word = word.into();
        if word.is_empty() {
            return Err(crate::Error::Validation {
                field: "word".to_string(),
                message: "word must not be empty".to_string(),
            });
        }
        Ok(Self { word })
    }
}

/// Flattened dictionary record built from upstream entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedWord {
    /// The requested word, echoed verbatim
    pub text: String,

    /// Written pronunciations in encounter order
    pub pronunciations: Vec<String>,

    /// Last IPA pronunciation encountered
    pub ipa_pronunciation: String,

    /// Audio clip identifiers in encounter order
    pub audio_pronunciations: Vec<String>,

    /// Definitions grouped by part of speech
    pub definitions: Vec<Definition>,

    /// Run-on phrases with their own senses
    pub idioms: Vec<Idiom>,
}

impl NormalizedWord {
    /// Start an empty record for a word
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// All definition senses in order, flattened across parts of speech
    pub fn all_senses(&self) -> impl Iterator<Item = &str> {
        self.definitions
            .iter()
            .flat_map(|d| d.senses.iter().map(String::as_str))
    }
}

/// One part-of-speech block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    pub part_of_speech: String,
    pub senses: Vec<String>,
}

/// An idiomatic phrase derived from the headword
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idiom {
    pub phrase: String,
    pub senses: Vec<String>,
}

/// A word saved by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedWord {
    pub word: String,

    #[serde(default)]
    pub meanings: Vec<String>,

    #[serde(default)]
    pub pronunciations: Vec<String>,

    /// Local time formatted with [`SAVED_DATE_FORMAT`]
    #[serde(default)]
    pub saved_date: String,
}

impl SavedWord {
    /// Create a record stamped with the current local time
    pub fn new(
        word: impl Into<String>,
        meanings: Vec<String>,
        pronunciations: Vec<String>,
    ) -> Self {
        Self::saved_at(word, meanings, pronunciations, Local::now())
    }

    /// Create a record stamped with an explicit time
    pub fn saved_at(
        word: impl Into<String>,
        meanings: Vec<String>,
        pronunciations: Vec<String>,
        at: DateTime<Local>,
    ) -> Self {
        Self {
            word: word.into(),
            meanings,
            pronunciations,
            saved_date: at.format(SAVED_DATE_FORMAT).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_normalized_word_field_names() {
        let mut word = NormalizedWord::new("cat");
        word.ipa_pronunciation = "kæt".to_string();
        word.definitions.push(Definition {
            part_of_speech: "noun".to_string(),
            senses: vec!["a feline".to_string()],
        });

        let value = serde_json::to_value(&word).unwrap();
        assert_eq!(
            value,
            json!({
                "text": "cat",
                "pronunciations": [],
                "ipaPronunciation": "kæt",
                "audioPronunciations": [],
                "definitions": [{"partOfSpeech": "noun", "senses": ["a feline"]}],
                "idioms": []
            })
        );
    }

    #[test]
    fn test_saved_word_date_format() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let saved = SavedWord::saved_at("cat", vec![], vec!["kat".to_string()], at);

        assert_eq!(saved.saved_date, "2024-03-09 07:05:01");
        let value = serde_json::to_value(&saved).unwrap();
        assert_eq!(value["savedDate"], "2024-03-09 07:05:01");
        assert_eq!(value["pronunciations"], json!(["kat"]));
    }

    #[test]
    fn test_saved_word_tolerates_missing_lists() {
        let saved: SavedWord = serde_json::from_value(json!({"word": "cat"})).unwrap();
        assert!(saved.meanings.is_empty());
        assert!(saved.saved_date.is_empty());
    }

    #[test]
    fn test_lookup_request_rejects_empty_word() {
        assert!(LookupRequest::new("").is_err());
        assert_eq!(LookupRequest::new("cat").unwrap().word, "cat");
    }

    #[test]
    fn test_all_senses_flattens_in_order() {
        let mut word = NormalizedWord::new("run");
        word.definitions.push(Definition {
            part_of_speech: "verb".to_string(),
            senses: vec!["to go fast".to_string()],
        });
        word.definitions.push(Definition {
            part_of_speech: "noun".to_string(),
            senses: vec!["an act of running".to_string()],
        });

        let senses: Vec<_> = word.all_senses().collect();
        assert_eq!(senses, vec!["to go fast", "an act of running"]);
    }
}
