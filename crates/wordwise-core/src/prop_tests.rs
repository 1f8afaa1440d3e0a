//! Property-based tests for the markup cleaner and transformer
//!
//! Inputs are assembled from the token forms upstream actually emits, so
//! every generated fragment is well-formed defining text.

use proptest::prelude::*;
use serde_json::{json, Value};

use crate::markup::clean;
use crate::transform::transform;

/// One piece of defining text: a known token or a run of plain words
fn segment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("{bc}".to_string()),
        Just("{dx_def}".to_string()),
        Just("{/dx_def}".to_string()),
        Just("{it}".to_string()),
        Just("{/it}".to_string()),
        "[a-z]{1,8}".prop_map(|w| format!("{{sx|{}||}}", w)),
        ("[a-z]{1,8}", "[a-z:0-9]{0,6}").prop_map(|(w, r)| format!("{{sx|{}|{}|}}", w, r)),
        "[a-z]{1,8}".prop_map(|w| format!("{{dxt|{}||}}", w)),
        "[a-z]{1,8}( [a-z]{1,8}){0,3}",
        Just(" ".to_string()),
    ]
}

fn fragment_strategy() -> impl Strategy<Value = String> {
    (
        proptest::option::of(1u32..30),
        proptest::collection::vec(segment_strategy(), 0..8),
    )
        .prop_map(|(enumerator, segments)| {
            let body = segments.concat();
            match enumerator {
                Some(n) => format!("{}. {}", n, body.trim_start()),
                None => body.trim_start().to_string(),
            }
        })
}

fn entry_strategy() -> impl Strategy<Value = Value> {
    (
        proptest::collection::vec("[a-zˈæə]{1,6}", 0..3),
        proptest::option::of("(noun|verb|adjective)"),
        proptest::collection::vec(fragment_strategy(), 0..4),
    )
        .prop_map(|(prs, fl, texts)| {
            let prs: Vec<Value> = prs.into_iter().map(|mw| json!({"mw": mw})).collect();
            let senses: Vec<Value> = texts
                .into_iter()
                .map(|t| json!([["sense", {"dt": [["text", t]]}]]))
                .collect();
            json!({
                "hwi": {"prs": prs},
                "fl": fl,
                "def": [{"sseq": senses}]
            })
        })
}

proptest! {
    #[test]
    fn prop_clean_is_idempotent(fragment in fragment_strategy()) {
        let once = clean(&fragment);
        prop_assert_eq!(clean(&once), once);
    }

    #[test]
    fn prop_clean_removes_known_tokens(fragment in fragment_strategy()) {
        let cleaned = clean(&fragment);
        for token in ["{bc}", "{dx_def}", "{/dx_def}", "{sx|", "{dxt|"] {
            prop_assert!(!cleaned.contains(token), "{:?} left {}", fragment, token);
        }
        prop_assert_eq!(cleaned.trim(), cleaned.as_str());
    }

    #[test]
    fn prop_no_empty_definitions(entries in proptest::collection::vec(entry_strategy(), 1..5)) {
        let word = transform("w", &entries).unwrap();
        for definition in &word.definitions {
            prop_assert!(!definition.senses.is_empty());
            prop_assert!(definition.senses.iter().all(|s| !s.is_empty()));
        }
    }

    #[test]
    fn prop_pronunciations_keep_entry_order(entries in proptest::collection::vec(entry_strategy(), 1..5)) {
        let expected: Vec<String> = entries
            .iter()
            .flat_map(|e| e["hwi"]["prs"].as_array().cloned().unwrap_or_default())
            .filter_map(|p| p["mw"].as_str().map(str::to_string))
            .collect();

        let word = transform("w", &entries).unwrap();
        prop_assert_eq!(word.pronunciations, expected);
    }
}
