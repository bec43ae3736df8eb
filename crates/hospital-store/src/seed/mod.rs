//! YAML seed files (schema version 0)
//!
//! A seed describes hospitals with their departments, rooms, doctors and
//! admitted patients. Import goes through the core registry operations, so a
//! seed obeys the same rules as interactive commands.

pub mod digest;
pub mod format_v0;
pub mod importer;
pub mod parser;

pub use digest::compute_seed_digest;
pub use format_v0::SeedV0;
pub use importer::{import_seed, import_seed_str, SeedImportOutcome};
pub use parser::parse_seed_str;
