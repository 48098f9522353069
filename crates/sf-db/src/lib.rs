//! sf-db - Warehouse layer for Songflow
//!
//! Provides the [`Warehouse`] statement-catalog trait (one method per
//! logical insert/lookup operation) and a DuckDB-backed implementation
//! with embedded schema migrations.

pub mod ddl;
pub mod duckdb;
pub mod error;
pub mod migration;
pub mod warehouse;

pub use duckdb::DuckDbWarehouse;
pub use error::{WarehouseError, WarehouseResult};
pub use warehouse::Warehouse;
