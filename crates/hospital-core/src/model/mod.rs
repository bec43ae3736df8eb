pub mod appointment;
pub mod clinical_history;
pub mod department;
pub mod doctor;
pub mod hospital;
pub mod patient;
pub mod person;
pub mod room;
pub mod specialty;

pub use appointment::{Appointment, AppointmentBuilder, AppointmentStatus, Money};
pub use clinical_history::{ClinicalHistory, HistoryEntryKind};
pub use department::Department;
pub use doctor::{Doctor, LicenseNumber};
pub use hospital::Hospital;
pub use patient::Patient;
pub use person::{BloodType, Dni, Person};
pub use room::Room;
pub use specialty::Specialty;

use crate::errors::{HospitalError, Result};

/// Reject empty or whitespace-only text, returning the value unchanged
pub(crate) fn require_text(value: impl Into<String>, field: &'static str) -> Result<String> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(HospitalError::BlankField { field });
    }
    Ok(value)
}

/// Append `id` unless it is already listed
pub(crate) fn push_unique(ids: &mut Vec<String>, id: &str) {
    if !ids.iter().any(|existing| existing == id) {
        ids.push(id.to_string());
    }
}
