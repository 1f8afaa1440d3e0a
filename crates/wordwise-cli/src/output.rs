//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable), with dedicated human
//! layouts for normalized words and saved-word lists.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;
use serde::Serialize;
use std::io::{self, Write};
use std::time::Duration;
use wordwise_core::{NormalizedWord, SavedWord};

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a normalized dictionary record
    fn format_word(&self, word: &NormalizedWord, use_color: bool) -> Result<String>;

    /// Format a list of saved words
    fn format_saved_words(&self, words: &[SavedWord], use_color: bool) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            // No dedicated layout; pretty JSON reads fine
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_word(&self, word: &NormalizedWord, use_color: bool) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_word_human(word, use_color)),
            _ => self.format(word),
        }
    }

    fn format_saved_words(&self, words: &[SavedWord], use_color: bool) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_saved_words_human(words, use_color)),
            _ => self.format(&words),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write + Send>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, progress: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: progress && !quiet && io::stdout().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    #[allow(dead_code)]
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write + Send>,
    ) -> Self {
        Self {
            format,
            use_color,
            show_progress: false,
            quiet,
            writer,
        }
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write a normalized word
    pub fn word(&mut self, word: &NormalizedWord) -> Result<()> {
        let formatted = self.format.format_word(word, self.use_color)?;
        self.finish_document(&formatted)
    }

    /// Write a list of saved words
    pub fn saved_words(&mut self, words: &[SavedWord]) -> Result<()> {
        let formatted = self.format.format_saved_words(words, self.use_color)?;
        self.finish_document(&formatted)
    }

    fn finish_document(&mut self, formatted: &str) -> Result<()> {
        if formatted.ends_with('\n') {
            self.write(formatted)
        } else {
            self.writeln(formatted)
        }
    }

    /// Create a spinner for indeterminate progress
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(default_spinner_style());
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }
}

/// Helper function to create a spinner style
pub fn default_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn heading(text: &str, use_color: bool) -> String {
    if use_color {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

/// Format a normalized word for human reading
fn format_word_human(word: &NormalizedWord, use_color: bool) -> String {
    let mut output = String::new();

    output.push_str(&heading(&word.text, use_color));
    if !word.pronunciations.is_empty() {
        output.push_str(&format!("  \\{}\\", word.pronunciations.join("\\, \\")));
    }
    if !word.ipa_pronunciation.is_empty() {
        output.push_str(&format!("  /{}/", word.ipa_pronunciation));
    }
    output.push('\n');

    for definition in &word.definitions {
        output.push('\n');
        let label = if definition.part_of_speech.is_empty() {
            "(unlabeled)"
        } else {
            definition.part_of_speech.as_str()
        };
        if use_color {
            output.push_str(&label.italic().cyan().to_string());
        } else {
            output.push_str(label);
        }
        output.push('\n');
        for (i, sense) in definition.senses.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, sense));
        }
    }

    if !word.idioms.is_empty() {
        output.push('\n');
        output.push_str(&heading("Idioms", use_color));
        output.push('\n');
        for idiom in &word.idioms {
            output.push_str(&format!("  {}\n", idiom.phrase));
            for sense in &idiom.senses {
                output.push_str(&format!("    - {}\n", sense));
            }
        }
    }

    if !word.audio_pronunciations.is_empty() {
        output.push('\n');
        output.push_str(&format!("Audio: {}\n", word.audio_pronunciations.join(", ")));
    }

    output
}

/// Format saved words for human reading
fn format_saved_words_human(words: &[SavedWord], use_color: bool) -> String {
    if words.is_empty() {
        return "No saved words\n".to_string();
    }

    let mut output = String::new();
    for saved in words {
        let date = if use_color {
            saved.saved_date.dimmed().to_string()
        } else {
            saved.saved_date.clone()
        };
        output.push_str(&format!("{}  {}\n", heading(&saved.word, use_color), date));
        if !saved.pronunciations.is_empty() {
            output.push_str(&format!("  \\{}\\\n", saved.pronunciations.join("\\, \\")));
        }
        for meaning in &saved.meanings {
            output.push_str(&format!("  - {}\n", meaning));
        }
    }
    output
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    /// Writer that keeps everything written to it
    #[derive(Clone, Default)]
    pub(crate) struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        pub(crate) fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::Captured;
    use super::*;
    use wordwise_core::{Definition, Idiom};

    fn writer(format: OutputFormat) -> (OutputWriter, Captured) {
        let captured = Captured::default();
        let writer = OutputWriter::with_writer(format, false, false, Box::new(captured.clone()));
        (writer, captured)
    }

    fn cat() -> NormalizedWord {
        NormalizedWord {
            text: "cat".to_string(),
            pronunciations: vec!["ˈkat".to_string()],
            ipa_pronunciation: "kæt".to_string(),
            audio_pronunciations: vec!["cat00001".to_string()],
            definitions: vec![Definition {
                part_of_speech: "noun".to_string(),
                senses: vec!["a small domesticated mammal".to_string(), "a person".to_string()],
            }],
            idioms: vec![Idiom {
                phrase: "let the cat out of the bag".to_string(),
                senses: vec!["to reveal a secret".to_string()],
            }],
        }
    }

    #[test]
    fn test_human_word_layout() {
        let (mut out, captured) = writer(OutputFormat::Human);
        out.word(&cat()).unwrap();

        let text = captured.text();
        assert!(text.starts_with("cat  \\ˈkat\\  /kæt/\n"));
        assert!(text.contains("noun\n  1. a small domesticated mammal\n  2. a person\n"));
        assert!(text.contains("Idioms\n  let the cat out of the bag\n    - to reveal a secret\n"));
        assert!(text.contains("Audio: cat00001"));
    }

    #[test]
    fn test_json_word_uses_wire_names() {
        let (mut out, captured) = writer(OutputFormat::Json);
        out.word(&cat()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&captured.text()).unwrap();
        assert_eq!(value["ipaPronunciation"], "kæt");
        assert_eq!(value["definitions"][0]["partOfSpeech"], "noun");
    }

    #[test]
    fn test_yaml_saved_words() {
        let (mut out, captured) = writer(OutputFormat::Yaml);
        let words = vec![SavedWord {
            word: "cat".to_string(),
            meanings: vec!["a pet".to_string()],
            pronunciations: vec![],
            saved_date: "2024-01-02 03:04:05".to_string(),
        }];
        out.saved_words(&words).unwrap();

        let text = captured.text();
        assert!(text.contains("word: cat"));
        assert!(text.contains("savedDate:"));
        assert!(text.contains("2024-01-02 03:04:05"));
    }

    #[test]
    fn test_human_empty_saved_words() {
        let (mut out, captured) = writer(OutputFormat::Human);
        out.saved_words(&[]).unwrap();
        assert_eq!(captured.text(), "No saved words\n");
    }

    #[test]
    fn test_messages_are_suppressed_for_machine_formats() {
        let (mut out, captured) = writer(OutputFormat::Json);
        out.info("hello").unwrap();
        out.success("done").unwrap();
        out.warning("careful").unwrap();
        assert!(captured.text().is_empty());
    }

    #[test]
    fn test_quiet_keeps_warnings() {
        let captured = Captured::default();
        let mut out =
            OutputWriter::with_writer(OutputFormat::Human, false, true, Box::new(captured.clone()));
        out.info("hidden").unwrap();
        out.warning("shown").unwrap();
        assert_eq!(captured.text(), "WARNING: shown\n");
    }
}
