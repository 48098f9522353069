//! Error types for the warehouse layer.

use thiserror::Error;

/// Warehouse operation errors.
#[derive(Error, Debug)]
pub enum WarehouseError {
    /// Failed to open or create the warehouse database (W001).
    #[error("[W001] Warehouse connection failed: {0}")]
    ConnectionError(String),

    /// Schema migration failed (W002).
    #[error("[W002] Warehouse migration failed: {0}")]
    MigrationError(String),

    /// An insert statement failed (W003).
    #[error("[W003] Warehouse insert failed: {0}")]
    InsertError(String),

    /// A lookup query failed (W004).
    #[error("[W004] Warehouse query failed: {0}")]
    QueryError(String),

    /// Transaction management error (W005).
    #[error("[W005] Warehouse transaction failed: {0}")]
    TransactionError(String),
}

/// Result type alias for [`WarehouseError`].
pub type WarehouseResult<T> = Result<T, WarehouseError>;
