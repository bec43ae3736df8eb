use uuid::Uuid;

use super::store::Store;
use crate::errors::Result;
use crate::model::Hospital;

/// Create a hospital
///
/// # Errors
/// * `BlankField` - name, address or phone is blank
pub fn create_hospital(
    store: &mut Store,
    name: impl Into<String>,
    address: impl Into<String>,
    phone: impl Into<String>,
) -> Result<String> {
    let hospital = Hospital::new(Uuid::now_v7().to_string(), name, address, phone)?;
    let id = hospital.id.clone();
    store.insert_hospital(hospital);
    tracing::debug!(hospital_id = %id, "hospital created");
    Ok(id)
}

/// Attach a department to a hospital
///
/// No-op when the department already belongs to this hospital. A department
/// attached elsewhere is moved: it leaves the previous hospital's list.
///
/// # Errors
/// * `HospitalNotFound`, `DepartmentNotFound`
pub fn add_department(store: &mut Store, hospital_id: &str, department_id: &str) -> Result<()> {
    store.get_hospital(hospital_id)?;
    let previous = store.get_department(department_id)?.hospital_id.clone();

    if previous.as_deref() == Some(hospital_id) {
        return Ok(());
    }
    if let Some(prev_id) = previous {
        if let Ok(prev) = store.get_hospital_mut(&prev_id) {
            prev.unlink_department(department_id);
        }
    }

    store
        .get_hospital_mut(hospital_id)?
        .link_department(department_id);
    store.get_department_mut(department_id)?.hospital_id = Some(hospital_id.to_string());
    Ok(())
}

/// Admit a patient to a hospital, moving them from any previous hospital
///
/// # Errors
/// * `HospitalNotFound`, `PatientNotFound`
pub fn add_patient(store: &mut Store, hospital_id: &str, patient_id: &str) -> Result<()> {
    store.get_hospital(hospital_id)?;
    let previous = store.get_patient(patient_id)?.hospital_id.clone();

    if previous.as_deref() == Some(hospital_id) {
        return Ok(());
    }
    if let Some(prev_id) = previous {
        if let Ok(prev) = store.get_hospital_mut(&prev_id) {
            prev.unlink_patient(patient_id);
        }
    }

    store.get_hospital_mut(hospital_id)?.link_patient(patient_id);
    store.get_patient_mut(patient_id)?.hospital_id = Some(hospital_id.to_string());
    Ok(())
}
