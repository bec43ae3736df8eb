//! Migration framework
//!
//! - Ordered SQL files embedded at compile time
//! - `schema_version` ledger with SHA-256 checksums
//! - Idempotent application; edited migrations are rejected

mod checksums;
mod embedded;
mod runner;

pub use checksums::compute_checksum;
pub use embedded::{get_migrations, Migration};
pub use runner::{apply_migrations, applied_migrations};
