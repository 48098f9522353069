//! Recursive data-file discovery.

use crate::error::CoreResult;
use std::path::{Path, PathBuf};

/// Find every file under `root` whose extension matches `extension`.
///
/// Paths are returned absolute and sorted lexicographically so progress
/// reporting is stable across runs. A missing root is not an error: the
/// batch simply has nothing to load from it.
pub fn discover_files(root: &Path, extension: &str) -> CoreResult<Vec<PathBuf>> {
    if !root.exists() {
        log::warn!("Data directory not found: {} (skipping)", root.display());
        return Ok(Vec::new());
    }

    let root = root.canonicalize()?;
    let mut files = Vec::new();
    walk(&root, extension, &mut files)?;
    files.sort();
    Ok(files)
}

fn walk(dir: &Path, extension: &str, files: &mut Vec<PathBuf>) -> CoreResult<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk(&path, extension, files)?;
        } else if path.extension().is_some_and(|e| e == extension) {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "discover_test.rs"]
mod tests;
