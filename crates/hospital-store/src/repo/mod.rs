//! Repository layer between the in-memory `Store` and SQLite

pub mod hydration;
pub mod sqlite_repo;

pub use hydration::load_registry;
pub use sqlite_repo::SqliteRepo;

/// Column formats for dates and date-times
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
