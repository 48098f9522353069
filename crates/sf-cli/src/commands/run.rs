//! Run command implementation

use anyhow::{Context, Result};
use sf_core::Config;
use sf_db::DuckDbWarehouse;
use std::path::Path;

use crate::cli::{GlobalArgs, RunArgs};
use crate::loader::{FileKind, LoadSummary, Loader};

/// Load the project config, honoring the `--config` override.
fn load_config(global: &GlobalArgs) -> Result<Config> {
    match &global.config {
        Some(path) => Config::from_file(Path::new(path)),
        None => Config::load(Path::new(&global.project_dir)),
    }
    .context("Failed to load project config")
}

/// Execute the run command: song roots first, then log roots, so the
/// song/artist catalog is in place before songplay lookups run.
pub fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    let project_dir = Path::new(&global.project_dir);
    let config = load_config(global)?;

    let db_path = global.target.as_ref().unwrap_or(&config.database.path);
    if db_path != ":memory:" {
        if let Some(parent) = Path::new(db_path).parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    let warehouse = DuckDbWarehouse::new(db_path)
        .with_context(|| format!("Failed to open warehouse at {db_path}"))?;

    if global.verbose {
        eprintln!(
            "[verbose] project '{}', warehouse {}, extension .{}",
            config.name, db_path, config.data_extension
        );
    }

    let loader = Loader::new(&warehouse);
    let mut summary = LoadSummary::default();

    if !args.logs_only {
        for root in config.song_paths_absolute(project_dir) {
            summary.merge(loader.run(&root, FileKind::Songs, &config.data_extension)?);
        }
    }
    if !args.songs_only {
        for root in config.log_paths_absolute(project_dir) {
            summary.merge(loader.run(&root, FileKind::Logs, &config.data_extension)?);
        }
    }

    println!(
        "\nLoaded {} files ({} rows) into {}",
        summary.files, summary.rows, db_path
    );
    Ok(())
}
