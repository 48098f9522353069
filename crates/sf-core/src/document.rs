//! Raw document types parsed from the line-delimited JSON source files.
//!
//! Parsing happens in two steps so malformed JSON and missing fields fail
//! differently: a line that is not JSON at all is a [`CoreError::ParseError`],
//! while valid JSON that lacks a field the target schema requires is a
//! [`CoreError::SchemaMismatch`].

use crate::error::{CoreError, CoreResult};
use crate::serde_helpers::opt_string_or_number;
use serde::Deserialize;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One song-metadata record, as found in the song_data files.
///
/// Field names match the source JSON (snake_case). The artist location and
/// coordinates are genuinely nullable in the source data.
#[derive(Debug, Clone, Deserialize)]
pub struct SongDocument {
    pub song_id: String,
    pub title: String,
    pub artist_id: String,
    pub year: i32,
    pub duration: f64,
    pub artist_name: String,
    #[serde(default)]
    pub artist_location: Option<String>,
    #[serde(default)]
    pub artist_latitude: Option<f64>,
    #[serde(default)]
    pub artist_longitude: Option<f64>,
}

/// One activity-log event, as found in the log_data files.
///
/// Only `page` and `ts` are guaranteed on every event; the remaining fields
/// are absent (or null) on non-NextSong page views, so they parse as
/// `Option` and are validated later, after the NextSong filter.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEvent {
    pub page: String,
    /// Epoch milliseconds.
    pub ts: i64,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub session_id: Option<i64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub song: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    /// Track length in seconds.
    #[serde(default)]
    pub length: Option<f64>,
}

/// Parse all non-empty lines of a JSONL file into `T`.
fn read_jsonl<T: serde::de::DeserializeOwned>(path: &Path) -> CoreResult<Vec<T>> {
    let file = std::fs::File::open(path).map_err(|e| CoreError::IoWithPath {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut records = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let value: serde_json::Value =
            serde_json::from_str(&line).map_err(|e| CoreError::ParseError {
                path: path.display().to_string(),
                line: idx + 1,
                message: e.to_string(),
            })?;

        let record = serde_json::from_value(value).map_err(|e| CoreError::SchemaMismatch {
            context: format!("{} (line {})", path.display(), idx + 1),
            message: e.to_string(),
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Read a song-metadata file.
///
/// The source files hold exactly one record each; when a file carries more
/// than one line, only the first record is used, matching the single-song
/// contract of the song transform.
pub fn read_song_file(path: &Path) -> CoreResult<SongDocument> {
    let mut docs: Vec<SongDocument> = read_jsonl(path)?;
    if docs.is_empty() {
        return Err(CoreError::SchemaMismatch {
            context: path.display().to_string(),
            message: "song file contains no records".to_string(),
        });
    }
    Ok(docs.swap_remove(0))
}

/// Read the full set of events from an activity-log file.
pub fn read_log_file(path: &Path) -> CoreResult<Vec<LogEvent>> {
    read_jsonl(path)
}

#[cfg(test)]
#[path = "document_test.rs"]
mod tests;
