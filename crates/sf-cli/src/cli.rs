//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};

/// Songflow - load song metadata and activity logs into a star schema
#[derive(Parser, Debug)]
#[command(name = "sf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override warehouse database path
    #[arg(short, long, global = true)]
    pub target: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the batch load: song metadata first, then activity logs
    Run(RunArgs),

    /// Print row counts for every warehouse table
    Stats,
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Load only the song-metadata roots
    #[arg(long)]
    pub songs_only: bool,

    /// Load only the activity-log roots
    #[arg(long, conflicts_with = "songs_only")]
    pub logs_only: bool,
}
