//! CLI definitions for Cadence.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Cadence CLI.
#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Resolve job specifications into canonical job descriptors")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (defaults to ./cadence.toml, then ~/.cadence/config.toml)
    #[arg(short, long, env = "CADENCE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Build every job descriptor and print them as JSON (default)
    Build {
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Print a one-line schedule summary per job
    Check,

    /// Validate the scheduler defaults
    Validate,
}
