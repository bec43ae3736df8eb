use uuid::Uuid;

use super::store::Store;
use crate::errors::{HospitalError, Result};
use crate::model::{Department, Room, Specialty};

/// Create an unattached department
///
/// # Errors
/// * `BlankField` - name is blank
pub fn create_department(
    store: &mut Store,
    name: impl Into<String>,
    specialty: Specialty,
) -> Result<String> {
    let department = Department::new(Uuid::now_v7().to_string(), name, specialty)?;
    let id = department.id.clone();
    store.insert_department(department);
    tracing::debug!(department_id = %id, specialty = %specialty, "department created");
    Ok(id)
}

/// Assign a doctor to a department
///
/// No-op when the doctor is already listed. A doctor assigned elsewhere
/// leaves the previous department.
///
/// # Errors
/// * `DepartmentNotFound`, `DoctorNotFound`
/// * `SpecialtyMismatch` - the doctor's specialty differs from the department's
pub fn add_doctor(store: &mut Store, department_id: &str, doctor_id: &str) -> Result<()> {
    let department = store.get_department(department_id)?;
    let doctor = store.get_doctor(doctor_id)?;

    if department.doctor_ids().iter().any(|id| id == doctor_id) {
        return Ok(());
    }
    if doctor.specialty != department.specialty {
        return Err(HospitalError::SpecialtyMismatch {
            doctor: doctor.specialty,
            department: department.specialty,
        });
    }

    if let Some(prev_id) = doctor.department_id.clone() {
        if let Ok(prev) = store.get_department_mut(&prev_id) {
            prev.unlink_doctor(doctor_id);
        }
    }

    store.get_department_mut(department_id)?.link_doctor(doctor_id);
    store.get_doctor_mut(doctor_id)?.department_id = Some(department_id.to_string());
    Ok(())
}

/// Create a room inside a department
///
/// # Errors
/// * `DepartmentNotFound`
/// * `BlankField` - number or kind is blank
/// * `DuplicateRoomNumber` - the number is already used by another room
pub fn create_room(
    store: &mut Store,
    department_id: &str,
    number: impl Into<String>,
    kind: impl Into<String>,
) -> Result<String> {
    store.get_department(department_id)?;
    let room = Room::new(
        Uuid::now_v7().to_string(),
        number,
        kind,
        department_id.to_string(),
    )?;
    if store.find_room_by_number(&room.number).is_some() {
        return Err(HospitalError::DuplicateRoomNumber { number: room.number });
    }

    let id = room.id.clone();
    store.insert_room(room);
    store.get_department_mut(department_id)?.link_room(&id);
    tracing::debug!(room_id = %id, department_id, "room created");
    Ok(id)
}
