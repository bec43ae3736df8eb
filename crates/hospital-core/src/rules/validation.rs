use crate::errors::{HospitalError, Result};
use crate::ops::Store;

use super::invariants;

fn violation(reason: String) -> HospitalError {
    HospitalError::IntegrityViolation { reason }
}

/// Validate the whole registry
///
/// Checks, in order:
///
/// 1. Department ↔ hospital membership
/// 2. Doctor ↔ department membership and specialty agreement
/// 3. Room ↔ department membership
/// 4. Patient ↔ hospital membership
/// 5. One history per patient, with the canonical number
/// 6. Appointment references exist and are listed by patient, doctor and room
/// 7. DNI uniqueness per role and room number uniqueness
///
/// # Errors
/// Returns the first violation as `IntegrityViolation`. Call the
/// `invariants` functions directly for the full list.
pub fn validate_registry(store: &Store) -> Result<()> {
    if let Some((department_id, hospital_id)) =
        invariants::find_department_membership_breaks(store).first()
    {
        return Err(violation(format!(
            "department {department_id} and hospital {hospital_id} disagree on membership"
        )));
    }

    if let Some((doctor_id, department_id)) =
        invariants::find_doctor_membership_breaks(store).first()
    {
        return Err(violation(format!(
            "doctor {doctor_id} and department {department_id} disagree on membership"
        )));
    }

    if let Some((doctor_id, department_id)) = invariants::find_specialty_mismatches(store).first() {
        return Err(violation(format!(
            "doctor {doctor_id} does not share the specialty of department {department_id}"
        )));
    }

    if let Some((room_id, department_id)) = invariants::find_room_membership_breaks(store).first()
    {
        return Err(violation(format!(
            "room {room_id} and department {department_id} disagree on membership"
        )));
    }

    if let Some((patient_id, hospital_id)) =
        invariants::find_patient_membership_breaks(store).first()
    {
        return Err(violation(format!(
            "patient {patient_id} and hospital {hospital_id} disagree on membership"
        )));
    }

    if let Some((patient_id, history_id)) = invariants::find_history_breaks(store).first() {
        return Err(violation(format!(
            "patient {patient_id} and clinical history {history_id} do not match"
        )));
    }

    if let Some((appointment_id, owner_id)) = invariants::find_appointment_breaks(store).first() {
        return Err(violation(format!(
            "appointment {appointment_id} is not consistently linked with {owner_id}"
        )));
    }

    if let Some(key) = invariants::find_duplicate_keys(store).first() {
        return Err(violation(format!("duplicate key {key}")));
    }

    Ok(())
}
