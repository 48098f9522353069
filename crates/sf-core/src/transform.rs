//! The two record-transform variants: song metadata and activity logs.
//!
//! Both variants turn raw parsed documents into typed rows for the star
//! schema. The song variant is a pure projection. The log variant filters
//! to song-play events, decomposes timestamps, deduplicates dimensions
//! within the file, and resolves each play against the song catalog
//! through a [`SongplayResolver`].

use crate::document::{LogEvent, SongDocument};
use crate::error::{CoreError, CoreResult};
use crate::records::{ArtistRow, SongArtistIds, SongRow, SongplayRow, TimeRow, UserRow};
use chrono::{DateTime, NaiveDateTime};
use std::collections::HashSet;

/// `page` value that marks an actual song play; every other page view
/// (Home, Login, ...) carries no play semantics and is dropped.
pub const NEXT_SONG_PAGE: &str = "NextSong";

/// Song/artist catalog lookup, keyed on exact (title, artist name,
/// duration) match.
///
/// The warehouse implements this; the transform only depends on the seam.
/// A miss is `Ok(None)` — playing a track the catalog does not know is a
/// valid event, not a failure.
pub trait SongplayResolver {
    fn resolve(
        &self,
        title: &str,
        artist: &str,
        duration: f64,
    ) -> CoreResult<Option<SongArtistIds>>;
}

/// Rows produced from one activity-log file.
#[derive(Debug, Default)]
pub struct LogTables {
    pub time_rows: Vec<TimeRow>,
    pub user_rows: Vec<UserRow>,
    pub songplay_rows: Vec<SongplayRow>,
}

impl LogTables {
    /// Total rows across all three tables.
    pub fn row_count(&self) -> usize {
        self.time_rows.len() + self.user_rows.len() + self.songplay_rows.len()
    }
}

/// Project one song-metadata document into its song and artist rows.
pub fn transform_song(doc: &SongDocument) -> (SongRow, ArtistRow) {
    let song = SongRow {
        song_id: doc.song_id.clone(),
        title: doc.title.clone(),
        artist_id: doc.artist_id.clone(),
        year: doc.year,
        duration: doc.duration,
    };
    let artist = ArtistRow {
        artist_id: doc.artist_id.clone(),
        name: doc.artist_name.clone(),
        location: doc.artist_location.clone(),
        latitude: doc.artist_latitude,
        longitude: doc.artist_longitude,
    };
    (song, artist)
}

/// A NextSong event with every required field verified present.
///
/// Only userId, level, sessionId, location, and userAgent are required on
/// a play event. The user's name and gender load as nulls when absent,
/// and a play without song/artist/length is simply unresolvable: the
/// catalog lookup is skipped and the songplay loads with absent keys.
struct Play<'a> {
    start_time: NaiveDateTime,
    user_id: &'a str,
    first_name: Option<&'a str>,
    last_name: Option<&'a str>,
    gender: Option<&'a str>,
    level: &'a str,
    session_id: i64,
    location: &'a str,
    user_agent: &'a str,
    song: Option<&'a str>,
    artist: Option<&'a str>,
    length: Option<f64>,
}

fn missing(field: &str, event: &LogEvent) -> CoreError {
    CoreError::SchemaMismatch {
        context: format!("NextSong event at ts {}", event.ts),
        message: format!("missing field `{field}`"),
    }
}

fn required<'a>(value: &'a Option<String>, field: &str, event: &LogEvent) -> CoreResult<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| missing(field, event))
}

impl<'a> Play<'a> {
    fn from_event(event: &'a LogEvent) -> CoreResult<Self> {
        let start_time = DateTime::from_timestamp_millis(event.ts)
            .ok_or(CoreError::TimestampOutOfRange { ts: event.ts })?
            .naive_utc();

        Ok(Self {
            start_time,
            user_id: required(&event.user_id, "userId", event)?,
            first_name: event.first_name.as_deref(),
            last_name: event.last_name.as_deref(),
            gender: event.gender.as_deref(),
            level: required(&event.level, "level", event)?,
            session_id: event.session_id.ok_or_else(|| missing("sessionId", event))?,
            location: required(&event.location, "location", event)?,
            user_agent: required(&event.user_agent, "userAgent", event)?,
            song: event.song.as_deref(),
            artist: event.artist.as_deref(),
            length: event.length,
        })
    }

    /// The catalog lookup key, when the event carries one.
    fn lookup_key(&self) -> Option<(&str, &str, f64)> {
        match (self.song, self.artist, self.length) {
            (Some(song), Some(artist), Some(length)) => Some((song, artist, length)),
            _ => None,
        }
    }
}

/// Transform one activity-log file's events into time, user, and songplay
/// rows.
///
/// Dimension dedup is per file, first occurrence wins; the warehouse's
/// idempotent inserts handle duplicates across files. Songplays are not
/// deduplicated: one row per play event, in file order, each resolved
/// against the catalog individually.
pub fn transform_log(
    events: &[LogEvent],
    resolver: &dyn SongplayResolver,
) -> CoreResult<LogTables> {
    let plays = events
        .iter()
        .filter(|e| e.page == NEXT_SONG_PAGE)
        .map(Play::from_event)
        .collect::<CoreResult<Vec<_>>>()?;

    let mut tables = LogTables::default();

    let mut seen_times = HashSet::new();
    for play in &plays {
        if seen_times.insert(play.start_time) {
            tables.time_rows.push(TimeRow::from_start_time(play.start_time));
        }
    }

    let mut seen_users = HashSet::new();
    for play in &plays {
        if seen_users.insert(play.user_id) {
            tables.user_rows.push(UserRow {
                user_id: play.user_id.to_string(),
                first_name: play.first_name.map(str::to_string),
                last_name: play.last_name.map(str::to_string),
                gender: play.gender.map(str::to_string),
                level: play.level.to_string(),
            });
        }
    }

    for play in &plays {
        let ids = match play.lookup_key() {
            Some((song, artist, length)) => resolver.resolve(song, artist, length)?,
            None => None,
        };
        let (song_id, artist_id) = match ids {
            Some(ids) => (Some(ids.song_id), Some(ids.artist_id)),
            None => (None, None),
        };
        tables.songplay_rows.push(SongplayRow {
            start_time: play.start_time,
            user_id: play.user_id.to_string(),
            level: play.level.to_string(),
            song_id,
            artist_id,
            session_id: play.session_id,
            location: play.location.to_string(),
            user_agent: play.user_agent.to_string(),
        });
    }

    Ok(tables)
}

#[cfg(test)]
#[path = "transform_test.rs"]
mod tests;
