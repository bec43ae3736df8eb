pub mod appointment;
pub mod history;
pub mod registry;
pub mod seed;

use hospital_core::errors::ExError;
use hospital_core::types::RequestContext;
use hospital_core::Store;
use hospital_store::errors::{from_rusqlite, Result};
use hospital_store::repo::load_registry;
use rusqlite::{Connection, Transaction};
use std::time::Instant;

/// Load the registry inside a transaction, apply `f`, commit
///
/// Nothing is committed when `f` fails.
pub(crate) fn with_registry<T>(
    conn: &mut Connection,
    f: impl FnOnce(&mut Store, &Transaction<'_>) -> Result<T>,
) -> Result<T> {
    let tx = conn.transaction().map_err(from_rusqlite)?;
    let mut store = load_registry(&tx)?;
    let out = f(&mut store, &tx)?;
    tx.commit().map_err(from_rusqlite)?;
    Ok(out)
}

/// Attach the operation name and correlation ids to an outgoing error
pub(crate) fn with_context(err: ExError, op: &str, ctx: &RequestContext) -> ExError {
    let err = err.with_op(op).with_request_id(ctx.request_id.clone());
    match &ctx.trace_id {
        Some(trace_id) => err.with_trace_id(trace_id.clone()),
        None => err,
    }
}

pub(crate) fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
