//! sf-core - Core library for Songflow
//!
//! This crate provides the shared row types, configuration parsing, raw
//! document parsing, file discovery, and the two record-transform variants
//! (song metadata and activity logs) used across all Songflow components.

pub mod config;
pub mod discover;
pub mod document;
pub mod error;
pub mod records;
pub(crate) mod serde_helpers;
pub mod transform;

pub use config::{Config, DatabaseConfig};
pub use discover::discover_files;
pub use document::{read_log_file, read_song_file, LogEvent, SongDocument};
pub use error::{CoreError, CoreResult};
pub use records::{ArtistRow, SongArtistIds, SongRow, SongplayRow, TimeRow, UserRow};
pub use transform::{transform_log, transform_song, LogTables, SongplayResolver};
