//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod adapt;
mod completions;
mod restore;
mod utils;

pub use adapt::handle_adapt;
pub use completions::handle_completions;
pub use restore::handle_restore;
