//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod config;
mod lookup;
mod saved;
mod serve;

pub use completions::handle_completions;
pub use config::handle_config;
pub use lookup::handle_lookup;
pub use saved::handle_saved;
pub use serve::handle_serve;
