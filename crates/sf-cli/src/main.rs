//! Songflow CLI - batch ETL for music-streaming activity data

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod loader;

use cli::Cli;
use commands::{run, stats};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.global.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match &cli.command {
        cli::Commands::Run(args) => run::execute(args, &cli.global),
        cli::Commands::Stats => stats::execute(&cli.global),
    }
}
