use super::store::Store;
use crate::errors::Result;
use crate::model::HistoryEntryKind;

/// Append an entry to a patient's clinical history
///
/// Returns `false` when the text is blank and nothing was recorded.
///
/// # Errors
/// * `PatientNotFound`, `HistoryNotFound`
pub fn record_entry(
    store: &mut Store,
    patient_id: &str,
    kind: HistoryEntryKind,
    text: impl Into<String>,
) -> Result<bool> {
    let history = store.history_of_mut(patient_id)?;
    let recorded = history.add_entry(kind, text);
    if recorded {
        tracing::debug!(patient_id, history_id = %history.id, kind = %kind, "history entry recorded");
    }
    Ok(recorded)
}
