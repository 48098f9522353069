//! Warehouse trait definition.

use crate::error::WarehouseResult;
use sf_core::transform::SongplayResolver;
use sf_core::{ArtistRow, SongRow, SongplayRow, TimeRow, UserRow};

/// Statement catalog for the star schema: one method per logical operation.
///
/// Injected into the batch loader so the load logic never touches SQL text
/// or a concrete connection. Every insert must be idempotent under
/// duplicate keys (upsert or ignore-on-conflict); the transform layer is
/// free to emit the same dimension row from many files.
///
/// `SongplayResolver` is a supertrait: the (song title, artist name,
/// duration) lookup used to resolve songplay foreign keys goes through the
/// same catalog.
pub trait Warehouse: SongplayResolver {
    fn insert_song(&self, row: &SongRow) -> WarehouseResult<()>;
    fn insert_artist(&self, row: &ArtistRow) -> WarehouseResult<()>;
    fn insert_time(&self, row: &TimeRow) -> WarehouseResult<()>;
    fn insert_user(&self, row: &UserRow) -> WarehouseResult<()>;
    fn insert_songplay(&self, row: &SongplayRow) -> WarehouseResult<()>;

    /// Open a transaction. The batch loader wraps each source file in one
    /// begin/commit pair so a failed file leaves nothing behind.
    fn begin(&self) -> WarehouseResult<()>;
    fn commit(&self) -> WarehouseResult<()>;
    fn rollback(&self) -> WarehouseResult<()>;
}
