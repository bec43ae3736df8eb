//! Seed import command

use super::{elapsed_ms, with_context};
use hospital_core::types::RequestContext;
use hospital_core::{log_op_end, log_op_error, log_op_start, Clock};
use hospital_store::errors::Result;
use hospital_store::seed::{import_seed, SeedImportOutcome};
use rusqlite::Connection;
use std::path::Path;
use std::time::Instant;

/// Import a YAML seed file; re-importing the same content is a no-op
///
/// # Errors
/// `Io`, `InvalidInput` for a malformed seed, the registry rule violations
/// the seed triggers, `Persistence` on database failure.
pub fn seed_import(
    conn: &mut Connection,
    ctx: &RequestContext,
    path: &Path,
    clock: &dyn Clock,
) -> Result<SeedImportOutcome> {
    const OP: &str = "seed_import";
    log_op_start!(OP, request_id = %ctx.request_id, path = %path.display());
    let start = Instant::now();

    let result = import_seed(path, conn, clock).map_err(|e| {
        log_op_error!(OP, e.clone(), duration_ms = elapsed_ms(start), request_id = %ctx.request_id);
        with_context(e, OP, ctx)
    })?;

    log_op_end!(
        OP,
        duration_ms = elapsed_ms(start),
        request_id = %ctx.request_id,
        imported = result.imported,
        digest = %result.digest
    );
    Ok(result)
}
