//! The batch loader: walks one data root and loads every file it finds.
//!
//! One logical transaction per file. A file is parsed, transformed, and
//! all of its rows inserted inside a single begin/commit pair, so a
//! failure mid-file rolls back that file completely while everything
//! committed for prior files stays. Any error aborts the run: a malformed
//! source file is a data-integrity problem, not something to skip past.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use sf_core::{discover_files, read_log_file, read_song_file, transform_log, transform_song};
use sf_db::Warehouse;
use std::path::Path;

/// Which transform variant a data root holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Song-metadata files: one song + artist per file.
    Songs,
    /// Activity-log files: time, user, and songplay rows.
    Logs,
}

/// What one `Loader::run` call accomplished.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoadSummary {
    pub files: usize,
    pub rows: usize,
}

impl LoadSummary {
    pub fn merge(&mut self, other: LoadSummary) {
        self.files += other.files;
        self.rows += other.rows;
    }
}

/// Sequential per-file batch loader over an injected statement catalog.
pub struct Loader<'a, W: Warehouse> {
    warehouse: &'a W,
}

impl<'a, W: Warehouse> Loader<'a, W> {
    pub fn new(warehouse: &'a W) -> Self {
        Self { warehouse }
    }

    /// Load every data file under `root` with the transform for `kind`.
    pub fn run(&self, root: &Path, kind: FileKind, extension: &str) -> Result<LoadSummary> {
        let files = discover_files(root, extension)
            .with_context(|| format!("Failed to discover files in {}", root.display()))?;
        let total = files.len();
        println!("{} files found in {}", total, root.display());

        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut summary = LoadSummary::default();
        for (i, file) in files.iter().enumerate() {
            pb.set_message(file.display().to_string());

            self.warehouse
                .begin()
                .context("Failed to open per-file transaction")?;
            let rows = match self.load_file(file, kind) {
                Ok(rows) => rows,
                Err(e) => {
                    if let Err(rb) = self.warehouse.rollback() {
                        log::warn!("Rollback after failed file also failed: {rb}");
                    }
                    pb.abandon_with_message("Aborted");
                    return Err(e.context(format!("Failed to load {}", file.display())));
                }
            };
            self.warehouse
                .commit()
                .with_context(|| format!("Failed to commit {}", file.display()))?;

            summary.files += 1;
            summary.rows += rows;
            pb.println(format!("{}/{} files processed.", i + 1, total));
            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(summary)
    }

    /// Parse, transform, and insert one file. Returns the row count.
    ///
    /// Insert ordering matters for the logs variant: time and user
    /// dimensions land before the songplay facts that reference them.
    fn load_file(&self, path: &Path, kind: FileKind) -> Result<usize> {
        match kind {
            FileKind::Songs => {
                let doc = read_song_file(path)?;
                let (song, artist) = transform_song(&doc);
                self.warehouse.insert_song(&song)?;
                self.warehouse.insert_artist(&artist)?;
                Ok(2)
            }
            FileKind::Logs => {
                let events = read_log_file(path)?;
                let tables = transform_log(&events, self.warehouse)?;
                for row in &tables.time_rows {
                    self.warehouse.insert_time(row)?;
                }
                for row in &tables.user_rows {
                    self.warehouse.insert_user(row)?;
                }
                for row in &tables.songplay_rows {
                    self.warehouse.insert_songplay(row)?;
                }
                Ok(tables.row_count())
            }
        }
    }
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;
