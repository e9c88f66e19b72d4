//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the reelmaker binary.

mod commands;
mod run;
mod storyboard;

pub use commands::{Cli, Commands, DEFAULT_IDEA};
pub use run::run_pipeline;
pub use storyboard::run_storyboard;
