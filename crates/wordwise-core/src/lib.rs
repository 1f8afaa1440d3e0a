//! Wordwise Core - dictionary lookup normalization
//!
//! This crate turns Merriam-Webster collegiate API responses into a small,
//! predictable JSON record and keeps a flat-file list of saved words.
//!
//! # Main Components
//!
//! - **Markup Cleaner**: strips inline formatting tokens from defining text
//! - **Entry Navigation**: total accessors over the untyped upstream document
//! - **Response Transformer**: flattens entries into a [`NormalizedWord`]
//! - **Upstream Client**: builds lookup URLs and fetches entries with retries
//! - **Saved-Word Store**: append-only JSON file persistence
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use wordwise_core::{transform, Result};
//!
//! fn example() -> Result<()> {
//!     let entries = vec![json!({
//!         "hwi": {"prs": [{"mw": "ˈkat"}]},
//!         "fl": "noun",
//!         "def": [{"sseq": [[["sense", {"dt": [["text", "{bc}a small carnivorous mammal"]]}]]]}]
//!     })];
//!
//!     let word = transform("cat", &entries)?;
//!     assert_eq!(word.pronunciations, vec!["ˈkat"]);
//!     assert_eq!(word.definitions[0].senses, vec!["a small carnivorous mammal"]);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod dictionary;
pub mod entry;
pub mod error;
pub mod http;
pub mod markup;
pub mod store;
pub mod transform;
pub mod types;

#[cfg(test)]
mod prop_tests;

// Re-export main types for convenience
pub use dictionary::{Dictionary, StaticDictionary};
pub use entry::Node;
pub use error::{Error, Result};
pub use http::{DictionaryClient, DictionaryConfig, RetryPolicy};
pub use markup::clean;
pub use store::{JsonFileStore, SavedWordStore};
pub use transform::transform;
pub use types::{Definition, Idiom, LookupRequest, NormalizedWord, SavedWord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
