//! Typed rows for the star schema.
//!
//! One struct per warehouse table. Rows are constructed by the transform
//! layer, handed to the persistence layer, and never mutated afterwards.
//! Field-level validation happens at the JSON boundary, so these types
//! carry no `Option` except where the schema itself is nullable.

use chrono::{Datelike, NaiveDateTime, Timelike};

/// One row of the `songs` dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct SongRow {
    pub song_id: String,
    pub title: String,
    pub artist_id: String,
    pub year: i32,
    /// Track length in seconds.
    pub duration: f64,
}

/// One row of the `artists` dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistRow {
    pub artist_id: String,
    pub name: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// One row of the `time` dimension.
///
/// All calendar fields are derived from `start_time` at UTC. `weekday`
/// uses the 0 = Monday convention (`chrono::Weekday::num_days_from_monday`).
#[derive(Debug, Clone, PartialEq)]
pub struct TimeRow {
    pub start_time: NaiveDateTime,
    pub hour: u32,
    pub day: u32,
    /// ISO week number.
    pub week: u32,
    pub month: u32,
    pub year: i32,
    pub weekday: u32,
}

impl TimeRow {
    /// Decompose a UTC timestamp into its calendar parts.
    pub fn from_start_time(start_time: NaiveDateTime) -> Self {
        Self {
            start_time,
            hour: start_time.hour(),
            day: start_time.day(),
            week: start_time.iso_week().week(),
            month: start_time.month(),
            year: start_time.year(),
            weekday: start_time.weekday().num_days_from_monday(),
        }
    }
}

/// One row of the `users` dimension.
///
/// Name and gender are nullable: a play event identifies its user by id
/// and subscription tier, and loads whatever profile fields it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub user_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    /// Subscription tier ("free" or "paid").
    pub level: String,
}

/// One row of the `songplays` fact table.
///
/// `song_id`/`artist_id` stay `None` when the played track is not in the
/// song catalog; a play of an untracked song is a valid event.
#[derive(Debug, Clone, PartialEq)]
pub struct SongplayRow {
    pub start_time: NaiveDateTime,
    pub user_id: String,
    pub level: String,
    pub song_id: Option<String>,
    pub artist_id: Option<String>,
    pub session_id: i64,
    pub location: String,
    pub user_agent: String,
}

/// Result of a song/artist catalog lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct SongArtistIds {
    pub song_id: String,
    pub artist_id: String,
}
