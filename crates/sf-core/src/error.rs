//! Error types for sf-core

use thiserror::Error;

/// Core error type for Songflow
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: A data file is not valid line-delimited JSON
    #[error("[E004] Invalid JSON in {path} (line {line}): {message}")]
    ParseError {
        path: String,
        line: usize,
        message: String,
    },

    /// E005: A record lacks a field the target schema requires
    #[error("[E005] Schema mismatch in {context}: {message}")]
    SchemaMismatch { context: String, message: String },

    /// E006: Event timestamp outside the representable range
    #[error("[E006] Timestamp out of range: {ts} ms")]
    TimestampOutOfRange { ts: i64 },

    /// E007: The song/artist lookup collaborator failed
    #[error("[E007] Songplay lookup failed: {0}")]
    Resolver(String),

    /// E008: IO error
    #[error("[E008] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E009: IO error with file path context
    #[error("[E009] IO error reading {path}: {source}")]
    IoWithPath {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for [`CoreError`]
pub type CoreResult<T> = Result<T, CoreError>;
