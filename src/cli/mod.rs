//! This module defines the command-line interface (CLI) for fcd.
//! It uses the `clap` crate to parse arguments and subcommands.

use clap::{Parser, Subcommand};

use crate::config::Settings;
use crate::shell::Shell;

/// fcd: jump to directories matching an approximate path-like pattern.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path-like pattern to search for, e.g. "proj/web".
    pub pattern: Option<String>,

    /// Show every candidate instead of pruning to the most likely one
    #[arg(short = 'a', long = "all")]
    pub show_all: bool,

    /// Always jump to the highest-ranked candidate without asking
    #[arg(short, long)]
    pub first: bool,

    /// Minimum score a candidate must reach during segmented search
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Turn on verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prints the shell integration script for the given shell.
    Init {
        /// The shell to generate a script for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Folds command-line flags into the loaded settings; flags win.
    pub fn apply(&self, settings: &mut Settings) {
        if self.show_all {
            settings.show_all_matches = true;
        }
        if self.first {
            settings.always_first_match = true;
        }
        if let Some(threshold) = self.threshold {
            settings.score_threshold = threshold;
        }
    }
}
