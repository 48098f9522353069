//! DuckDB warehouse implementation.
//!
//! Owns a single connection for the whole run. The pipeline is strictly
//! sequential, so no `Mutex` is needed.

use crate::error::{WarehouseError, WarehouseResult};
use crate::migration::run_migrations;
use crate::warehouse::Warehouse;
use duckdb::Connection;
use sf_core::transform::SongplayResolver;
use sf_core::{
    ArtistRow, CoreError, CoreResult, SongArtistIds, SongRow, SongplayRow, TimeRow, UserRow,
};
use std::path::Path;

/// Tables of the star schema, in fact-first order for reporting.
pub const TABLES: &[&str] = &["songplays", "songs", "artists", "users", "\"time\""];

/// DuckDB-backed [`Warehouse`].
pub struct DuckDbWarehouse {
    conn: Connection,
}

impl DuckDbWarehouse {
    /// Open (or create) the warehouse at `path` and run pending migrations.
    pub fn open(path: &Path) -> WarehouseResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| WarehouseError::ConnectionError(format!("{e}: {}", path.display())))?;
        run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Create an in-memory warehouse with all migrations applied.
    ///
    /// Useful for tests that don't need persistence.
    pub fn open_memory() -> WarehouseResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| WarehouseError::ConnectionError(e.to_string()))?;
        run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Open from a path string (handles the `:memory:` special case).
    pub fn new(path: &str) -> WarehouseResult<Self> {
        if path == ":memory:" {
            Self::open_memory()
        } else {
            Self::open(Path::new(path))
        }
    }

    /// Borrow the underlying connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Row count of one table (see [`TABLES`] for valid names).
    pub fn count(&self, table: &str) -> WarehouseResult<usize> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })
            .map_err(|e| WarehouseError::QueryError(format!("count {table}: {e}")))?;
        Ok(count as usize)
    }
}

impl SongplayResolver for DuckDbWarehouse {
    fn resolve(
        &self,
        title: &str,
        artist: &str,
        duration: f64,
    ) -> CoreResult<Option<SongArtistIds>> {
        let result = self.conn.query_row(
            "SELECT s.song_id, s.artist_id
             FROM songs s
             JOIN artists a ON s.artist_id = a.artist_id
             WHERE s.title = ? AND a.name = ? AND s.duration = ?",
            duckdb::params![title, artist, duration],
            |row| {
                Ok(SongArtistIds {
                    song_id: row.get(0)?,
                    artist_id: row.get(1)?,
                })
            },
        );

        match result {
            Ok(ids) => Ok(Some(ids)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(CoreError::Resolver(e.to_string())),
        }
    }
}

impl Warehouse for DuckDbWarehouse {
    fn insert_song(&self, row: &SongRow) -> WarehouseResult<()> {
        self.conn
            .execute(
                "INSERT OR IGNORE INTO songs (song_id, title, artist_id, year, duration)
                 VALUES (?, ?, ?, ?, ?)",
                duckdb::params![row.song_id, row.title, row.artist_id, row.year, row.duration],
            )
            .map_err(|e| WarehouseError::InsertError(format!("songs ({}): {e}", row.song_id)))?;
        Ok(())
    }

    fn insert_artist(&self, row: &ArtistRow) -> WarehouseResult<()> {
        self.conn
            .execute(
                "INSERT OR IGNORE INTO artists (artist_id, name, location, latitude, longitude)
                 VALUES (?, ?, ?, ?, ?)",
                duckdb::params![
                    row.artist_id,
                    row.name,
                    row.location,
                    row.latitude,
                    row.longitude
                ],
            )
            .map_err(|e| {
                WarehouseError::InsertError(format!("artists ({}): {e}", row.artist_id))
            })?;
        Ok(())
    }

    fn insert_time(&self, row: &TimeRow) -> WarehouseResult<()> {
        self.conn
            .execute(
                "INSERT OR IGNORE INTO \"time\" (start_time, hour, day, week, month, year, weekday)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
                duckdb::params![
                    row.start_time,
                    row.hour,
                    row.day,
                    row.week,
                    row.month,
                    row.year,
                    row.weekday
                ],
            )
            .map_err(|e| {
                WarehouseError::InsertError(format!("time ({}): {e}", row.start_time))
            })?;
        Ok(())
    }

    fn insert_user(&self, row: &UserRow) -> WarehouseResult<()> {
        // OR REPLACE: a level change in a later file wins.
        self.conn
            .execute(
                "INSERT OR REPLACE INTO users (user_id, first_name, last_name, gender, level)
                 VALUES (?, ?, ?, ?, ?)",
                duckdb::params![
                    row.user_id,
                    row.first_name,
                    row.last_name,
                    row.gender,
                    row.level
                ],
            )
            .map_err(|e| WarehouseError::InsertError(format!("users ({}): {e}", row.user_id)))?;
        Ok(())
    }

    fn insert_songplay(&self, row: &SongplayRow) -> WarehouseResult<()> {
        self.conn
            .execute(
                "INSERT INTO songplays
                 (start_time, user_id, level, song_id, artist_id, session_id, location, user_agent)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                duckdb::params![
                    row.start_time,
                    row.user_id,
                    row.level,
                    row.song_id,
                    row.artist_id,
                    row.session_id,
                    row.location,
                    row.user_agent
                ],
            )
            .map_err(|e| {
                WarehouseError::InsertError(format!("songplays (session {}): {e}", row.session_id))
            })?;
        Ok(())
    }

    fn begin(&self) -> WarehouseResult<()> {
        self.conn
            .execute_batch("BEGIN TRANSACTION")
            .map_err(|e| WarehouseError::TransactionError(format!("BEGIN failed: {e}")))
    }

    fn commit(&self) -> WarehouseResult<()> {
        self.conn
            .execute_batch("COMMIT")
            .map_err(|e| WarehouseError::TransactionError(format!("COMMIT failed: {e}")))
    }

    fn rollback(&self) -> WarehouseResult<()> {
        self.conn
            .execute_batch("ROLLBACK")
            .map_err(|e| WarehouseError::TransactionError(format!("ROLLBACK failed: {e}")))
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
