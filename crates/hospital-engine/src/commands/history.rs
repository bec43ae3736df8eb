//! Clinical history commands

use super::{elapsed_ms, with_context, with_registry};
use hospital_core::model::HistoryEntryKind;
use hospital_core::ops::history_ops;
use hospital_core::types::RequestContext;
use hospital_core::{log_op_end, log_op_error, log_op_start};
use hospital_store::errors::Result;
use hospital_store::repo::SqliteRepo;
use rusqlite::Connection;
use std::time::Instant;

/// Append a diagnosis, treatment or allergy to a patient's history
///
/// Returns `false` when the text was blank and nothing changed. Entry text
/// is never logged.
///
/// # Errors
/// `NotFound` for an unknown patient.
pub fn history_record(
    conn: &mut Connection,
    ctx: &RequestContext,
    patient_id: &str,
    kind: HistoryEntryKind,
    text: String,
) -> Result<bool> {
    const OP: &str = "history_record";
    log_op_start!(OP, request_id = %ctx.request_id, patient_id, kind = %kind);
    let start = Instant::now();

    let result = with_registry(conn, |store, tx| {
        let recorded = history_ops::record_entry(store, patient_id, kind, text)?;
        if recorded {
            SqliteRepo::persist_history(tx, store.history_of(patient_id)?)?;
        }
        Ok(recorded)
    })
    .map_err(|e| {
        log_op_error!(OP, e.clone(), duration_ms = elapsed_ms(start), request_id = %ctx.request_id);
        with_context(e, OP, ctx)
    })?;

    log_op_end!(OP, duration_ms = elapsed_ms(start), request_id = %ctx.request_id, recorded = result);
    Ok(result)
}
