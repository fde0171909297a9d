//! Storage layer
//!
//! SQLite schema management and typed storage errors. The `Store` in
//! `crate::store` is the only consumer.

pub mod error;
pub mod schema;

pub use error::{StoreError, StoreResult};
pub use schema::{init_schema, needs_init, SCHEMA_VERSION};
