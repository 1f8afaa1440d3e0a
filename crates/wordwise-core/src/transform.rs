//! Response transformation for upstream dictionary entries
//!
//! Flattens the collegiate API's nested entry list into a [`NormalizedWord`].
//! Field names follow the upstream schema:
//!
//! - `hwi.prs[]` headword pronunciations (`mw`, `ipa`, `sound.audio`)
//! - `fl` functional label (part of speech)
//! - `def[].sseq[][][]` sense sequences, each sense record carrying `dt`
//! - `dros[]` defined run-ons with a `drp` phrase and their own `def`
//!
//! Every step goes through [`Node`], so a malformed branch is skipped
//! rather than reported.

use serde_json::Value;
use tracing::debug;

use crate::entry::Node;
use crate::markup::clean;
use crate::types::{Definition, Idiom, NormalizedWord};
use crate::{Error, Result};

/// Transform raw upstream entries into a normalized word record
///
/// Fails with [`Error::NotFound`] only when `entries` is empty.
pub fn transform(word: &str, entries: &[Value]) -> Result<NormalizedWord> {
    if entries.is_empty() {
        return Err(Error::not_found(word));
    }

    let mut normalized = NormalizedWord::new(word);

    for entry in entries.iter().map(Node::new) {
        collect_pronunciations(entry, &mut normalized);

        if let Some(definition) = extract_definition(entry) {
            normalized.definitions.push(definition);
        }

        normalized.idioms.extend(extract_idioms(entry));
    }

    debug!(
        word = %word,
        entries = entries.len(),
        definitions = normalized.definitions.len(),
        idioms = normalized.idioms.len(),
        "Transformed upstream entries"
    );

    Ok(normalized)
}

/// Walk `hwi.prs[]` and record written, IPA and audio forms
fn collect_pronunciations(entry: Node<'_>, normalized: &mut NormalizedWord) {
    for pr in entry.field("hwi").field("prs").items() {
        if let Some(mw) = pr.field("mw").as_str() {
            normalized.pronunciations.push(mw.to_string());
        }
        if let Some(ipa) = pr.field("ipa").as_str() {
            normalized.ipa_pronunciation = ipa.to_string();
        }
        if let Some(audio) = pr.field("sound").field("audio").as_str() {
            normalized.audio_pronunciations.push(audio.to_string());
        }
    }
}

/// Build the part-of-speech definition for an entry, if it has any senses
fn extract_definition(entry: Node<'_>) -> Option<Definition> {
    let part_of_speech = entry.field("fl").as_str()?;
    let senses = collect_senses(entry.field("def"));

    if senses.is_empty() {
        return None;
    }

    Some(Definition {
        part_of_speech: part_of_speech.to_string(),
        senses,
    })
}

/// Build idioms from the entry's defined run-on phrases
fn extract_idioms(entry: Node<'_>) -> Vec<Idiom> {
    entry
        .field("dros")
        .items()
        .filter_map(|dro| {
            let phrase = dro.field("drp").as_str()?;
            let senses = collect_senses(dro.field("def"));

            if senses.is_empty() {
                return None;
            }

            Some(Idiom {
                phrase: clean(phrase),
                senses,
            })
        })
        .collect()
}

/// Cleaned sense strings from a `def` block list
///
/// `def[] -> sseq[] -> sense group[] -> sense record[]`, where the record
/// of interest is an object carrying `dt`. In upstream data the innermost
/// level is a `["sense", {...}]` pair, so the tag string is simply skipped
/// by the object check.
pub fn collect_senses(def: Node<'_>) -> Vec<String> {
    let mut senses = Vec::new();

    for block in def.items() {
        for sequence in block.field("sseq").items() {
            for group in sequence.items() {
                for record in group.items().filter(Node::is_object) {
                    push_defining_text(record.field("dt"), &mut senses);
                }
            }
        }
    }

    senses
}

/// Append cleaned text from `dt` fragments shaped `[tag, text, ...]`
fn push_defining_text(dt: Node<'_>, senses: &mut Vec<String>) {
    for fragment in dt.items() {
        if fragment.len() < 2 {
            continue;
        }
        if let Some(text) = fragment.index(1).as_str() {
            let cleaned = clean(text);
            if !cleaned.is_empty() {
                senses.push(cleaned);
            }
        }
    }
}
