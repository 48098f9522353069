//! Tests for the DuckDB warehouse: migrations, idempotent inserts,
//! catalog lookup, and transaction boundaries.

use super::*;
use chrono::DateTime;
use chrono::NaiveDateTime;

// ── Helpers ────────────────────────────────────────────────────────────

fn ts(millis: i64) -> NaiveDateTime {
    DateTime::from_timestamp_millis(millis).unwrap().naive_utc()
}

fn test_song() -> SongRow {
    SongRow {
        song_id: "SOSONG1".to_string(),
        title: "Test Song".to_string(),
        artist_id: "ARTIST1".to_string(),
        year: 2004,
        duration: 210.5,
    }
}

fn test_artist() -> ArtistRow {
    ArtistRow {
        artist_id: "ARTIST1".to_string(),
        name: "Test Artist".to_string(),
        location: None,
        latitude: None,
        longitude: None,
    }
}

fn test_user(level: &str) -> UserRow {
    UserRow {
        user_id: "49".to_string(),
        first_name: Some("Jahiem".to_string()),
        last_name: Some("Miles".to_string()),
        gender: Some("M".to_string()),
        level: level.to_string(),
    }
}

fn test_songplay(song_id: Option<&str>) -> SongplayRow {
    SongplayRow {
        start_time: ts(1541990258796),
        user_id: "49".to_string(),
        level: "free".to_string(),
        song_id: song_id.map(str::to_string),
        artist_id: song_id.map(|_| "ARTIST1".to_string()),
        session_id: 514,
        location: "San Antonio-New Braunfels, TX".to_string(),
        user_agent: "Mozilla/5.0".to_string(),
    }
}

// ── Open & migrations ──────────────────────────────────────────────────

#[test]
fn open_memory_creates_star_schema() {
    let wh = DuckDbWarehouse::open_memory().unwrap();
    for table in TABLES {
        assert_eq!(wh.count(table).unwrap(), 0, "table {table} should exist");
    }
}

#[test]
fn open_file_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("warehouse.duckdb");
    {
        let wh = DuckDbWarehouse::open(&path).unwrap();
        wh.insert_song(&test_song()).unwrap();
    }
    // Reopen: migrations already applied, data preserved.
    let wh = DuckDbWarehouse::open(&path).unwrap();
    assert_eq!(wh.count("songs").unwrap(), 1);
}

#[test]
fn new_handles_memory_special_case() {
    let wh = DuckDbWarehouse::new(":memory:").unwrap();
    assert_eq!(wh.count("songs").unwrap(), 0);
}

// ── Idempotent inserts ─────────────────────────────────────────────────

#[test]
fn duplicate_dimension_inserts_are_ignored() {
    let wh = DuckDbWarehouse::open_memory().unwrap();

    wh.insert_song(&test_song()).unwrap();
    wh.insert_song(&test_song()).unwrap();
    wh.insert_artist(&test_artist()).unwrap();
    wh.insert_artist(&test_artist()).unwrap();

    let time_row = TimeRow::from_start_time(ts(1541990258796));
    wh.insert_time(&time_row).unwrap();
    wh.insert_time(&time_row).unwrap();

    assert_eq!(wh.count("songs").unwrap(), 1);
    assert_eq!(wh.count("artists").unwrap(), 1);
    assert_eq!(wh.count("\"time\"").unwrap(), 1);
}

#[test]
fn user_upsert_replaces_level() {
    let wh = DuckDbWarehouse::open_memory().unwrap();

    wh.insert_user(&test_user("free")).unwrap();
    wh.insert_user(&test_user("paid")).unwrap();

    assert_eq!(wh.count("users").unwrap(), 1);
    let level: String = wh
        .conn()
        .query_row(
            "SELECT level FROM users WHERE user_id = '49'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(level, "paid");
}

#[test]
fn songplays_are_not_deduplicated() {
    let wh = DuckDbWarehouse::open_memory().unwrap();

    wh.insert_songplay(&test_songplay(None)).unwrap();
    wh.insert_songplay(&test_songplay(None)).unwrap();

    assert_eq!(wh.count("songplays").unwrap(), 2);
}

// ── Catalog lookup ─────────────────────────────────────────────────────

#[test]
fn resolve_exact_match_returns_ids() {
    let wh = DuckDbWarehouse::open_memory().unwrap();
    wh.insert_song(&test_song()).unwrap();
    wh.insert_artist(&test_artist()).unwrap();

    let ids = wh.resolve("Test Song", "Test Artist", 210.5).unwrap();
    assert_eq!(
        ids,
        Some(SongArtistIds {
            song_id: "SOSONG1".to_string(),
            artist_id: "ARTIST1".to_string(),
        })
    );
}

#[test]
fn resolve_requires_exact_duration() {
    let wh = DuckDbWarehouse::open_memory().unwrap();
    wh.insert_song(&test_song()).unwrap();
    wh.insert_artist(&test_artist()).unwrap();

    assert_eq!(wh.resolve("Test Song", "Test Artist", 210.6).unwrap(), None);
    assert_eq!(wh.resolve("Test Song", "Other Artist", 210.5).unwrap(), None);
}

#[test]
fn resolve_on_empty_catalog_is_a_miss() {
    let wh = DuckDbWarehouse::open_memory().unwrap();
    assert_eq!(wh.resolve("Test Song", "Test Artist", 210.5).unwrap(), None);
}

// ── Transactions ───────────────────────────────────────────────────────

#[test]
fn committed_transaction_persists_rows() {
    let wh = DuckDbWarehouse::open_memory().unwrap();

    wh.begin().unwrap();
    wh.insert_song(&test_song()).unwrap();
    wh.insert_artist(&test_artist()).unwrap();
    wh.commit().unwrap();

    assert_eq!(wh.count("songs").unwrap(), 1);
    assert_eq!(wh.count("artists").unwrap(), 1);
}

#[test]
fn rolled_back_transaction_leaves_nothing() {
    let wh = DuckDbWarehouse::open_memory().unwrap();

    wh.begin().unwrap();
    wh.insert_song(&test_song()).unwrap();
    wh.rollback().unwrap();

    assert_eq!(wh.count("songs").unwrap(), 0);
}
