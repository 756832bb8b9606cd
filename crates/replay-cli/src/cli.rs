//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Phase-segmented statistics for parsed RTS replays.
///
/// Reads decoded matches as JSON and reports economy, command and
/// control-group statistics for every player over the whole match and its
/// early, mid and late phases.
#[derive(Debug, Parser)]
#[command(name = "replay-stats", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze decoded matches and print one record per player.
    Analyze {
        /// Decoded match JSON files.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print one record per line instead of a JSON array.
        #[arg(long)]
        json_lines: bool,
    },

    /// Show the phase windows of a match duration.
    Windows {
        /// Match duration in real seconds.
        seconds: f64,
    },

    /// Print the active ability catalog as JSON.
    Catalog,
}
