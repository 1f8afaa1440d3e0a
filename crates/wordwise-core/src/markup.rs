//! Inline markup removal for upstream defining text
//!
//! Merriam-Webster defining text carries formatting tokens such as `{bc}`
//! (bold colon separator) and cross-reference tokens such as
//! `{sx|fleet|fleet:1|}`. This module strips the handful of tokens the
//! collegiate API is known to emit and leaves anything else verbatim.

use regex::Regex;
use std::sync::OnceLock;

static SX_REGEX: OnceLock<Regex> = OnceLock::new();
static DXT_REGEX: OnceLock<Regex> = OnceLock::new();
static ENUMERATOR_REGEX: OnceLock<Regex> = OnceLock::new();

/// Literal tokens removed without touching the surrounding text
const LITERAL_TOKENS: [&str; 3] = ["{bc}", "{dx_def}", "{/dx_def}"];

fn sx_regex() -> &'static Regex {
    // payload, then up to two trailing fields which may be empty
    SX_REGEX.get_or_init(|| {
        Regex::new(r"\{sx\|[^|}]+(?:\|[^|}]*){0,2}\}").expect("sx pattern is valid")
    })
}

fn dxt_regex() -> &'static Regex {
    DXT_REGEX.get_or_init(|| Regex::new(r"\{dxt\|[^}]+\}").expect("dxt pattern is valid"))
}

fn enumerator_regex() -> &'static Regex {
    ENUMERATOR_REGEX.get_or_init(|| Regex::new(r"^\d+\.\s*").expect("enumerator pattern is valid"))
}

/// Remove recognized markup tokens from a defining-text fragment
///
/// Passes run in a fixed order: `{sx|...}` cross-references, the literal
/// `{bc}`, `{dx_def}` and `{/dx_def}` tokens, `{dxt|...}` cross-references,
/// a leading `N.` enumerator, then surrounding whitespace.
///
/// # Examples
///
/// ```
/// use wordwise_core::markup::clean;
///
/// assert_eq!(clean("{bc}a small domesticated carnivore"), "a small domesticated carnivore");
/// assert_eq!(clean("{sx|feline||}"), "");
/// assert_eq!(clean("2. {it}kept{/it}"), "{it}kept{/it}");
/// ```
pub fn clean(text: &str) -> String {
    let mut cleaned = sx_regex().replace_all(text, "").into_owned();

    for token in LITERAL_TOKENS {
        if cleaned.contains(token) {
            cleaned = cleaned.replace(token, "");
        }
    }

    cleaned = dxt_regex().replace_all(&cleaned, "").into_owned();
    cleaned = enumerator_regex().replace(&cleaned, "").into_owned();

    cleaned.trim().to_string()
}
