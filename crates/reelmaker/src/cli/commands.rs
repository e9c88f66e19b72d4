//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Idea used when none is given on the command line.
pub const DEFAULT_IDEA: &str = "A woman sits at her window watching a heavy rainstorm, finding peaceful joy in the cozy warmth of her dry indoor space.";

/// Reelmaker - turn a one-line story idea into a twelve-scene video reel
#[derive(Parser, Debug)]
#[command(name = "reelmaker")]
#[command(about = "Turn a one-line story idea into a twelve-scene video reel", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file used in place of ./reelmaker.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interpret an idea into a storyboard plan
    Storyboard {
        /// Story idea
        #[arg(long)]
        idea: Option<String>,

        /// Write the plan JSON to this file
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Generate every scene and merge the reel
    Run {
        /// Story idea
        #[arg(long)]
        idea: Option<String>,

        /// Use a saved plan instead of interpreting the idea
        #[arg(long, conflicts_with = "idea")]
        plan: Option<PathBuf>,
    },
}
