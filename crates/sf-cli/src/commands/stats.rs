//! Stats command implementation

use anyhow::{Context, Result};
use sf_core::Config;
use sf_db::duckdb::TABLES;
use sf_db::DuckDbWarehouse;
use std::path::Path;

use crate::cli::GlobalArgs;

/// Print row counts for every warehouse table.
pub fn execute(global: &GlobalArgs) -> Result<()> {
    let config = match &global.config {
        Some(path) => Config::from_file(Path::new(path)),
        None => Config::load(Path::new(&global.project_dir)),
    }
    .context("Failed to load project config")?;

    let db_path = global.target.as_ref().unwrap_or(&config.database.path);
    let warehouse = DuckDbWarehouse::new(db_path)
        .with_context(|| format!("Failed to open warehouse at {db_path}"))?;

    println!("Warehouse: {db_path}\n");
    for table in TABLES {
        let count = warehouse.count(table)?;
        println!("{:<12} {:>10}", table.trim_matches('"'), count);
    }
    Ok(())
}
