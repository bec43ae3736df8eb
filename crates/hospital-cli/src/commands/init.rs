//! Usage: hospital init

use super::{CliResult, Session};
use std::path::Path;

/// The database is created and migrated when the session opens; report it
pub fn execute(session: &Session, db_path: &Path) -> CliResult {
    let applied = hospital_store::migrations::applied_migrations(&session.conn)?;
    println!("✓ Database ready at {}", db_path.display());
    for migration in applied {
        println!("  {}", migration);
    }
    Ok(())
}
