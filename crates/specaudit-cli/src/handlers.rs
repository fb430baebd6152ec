//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod schema;
mod validate;

pub use completions::handle_completions;
pub use schema::{handle_schema, handle_types};
pub use validate::handle_validate;
