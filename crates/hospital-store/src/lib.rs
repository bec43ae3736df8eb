//! Hospital Store - SQLite persistence and seed import
//!
//! Provides:
//! - Connection setup and embedded, checksummed SQL migrations
//! - `SqliteRepo` upserts for every registry entity
//! - Hydration of a full `Store` from the database
//! - YAML seed parsing and idempotent import

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod seed;

pub use errors::Result;
