use std::collections::HashSet;

use crate::model::ClinicalHistory;
use crate::ops::Store;

fn lists(ids: &[String], id: &str) -> bool {
    ids.iter().any(|x| x == id)
}

/// Departments whose hospital link is not mirrored by the hospital's list,
/// and hospital list entries that point back elsewhere
///
/// Returns (department_id, hospital_id) pairs.
pub fn find_department_membership_breaks(store: &Store) -> Vec<(String, String)> {
    let mut breaks = Vec::new();

    for department in store.list_departments() {
        if let Some(ref hospital_id) = department.hospital_id {
            let listed = store
                .get_hospital(hospital_id)
                .map(|h| lists(h.department_ids(), &department.id))
                .unwrap_or(false);
            if !listed {
                breaks.push((department.id.clone(), hospital_id.clone()));
            }
        }
    }

    for hospital in store.list_hospitals() {
        for department_id in hospital.department_ids() {
            let owned = store
                .get_department(department_id)
                .map(|d| d.hospital_id.as_deref() == Some(hospital.id.as_str()))
                .unwrap_or(false);
            if !owned {
                breaks.push((department_id.clone(), hospital.id.clone()));
            }
        }
    }

    breaks
}

/// Same check for doctor ↔ department
///
/// Returns (doctor_id, department_id) pairs.
pub fn find_doctor_membership_breaks(store: &Store) -> Vec<(String, String)> {
    let mut breaks = Vec::new();

    for doctor in store.list_doctors() {
        if let Some(ref department_id) = doctor.department_id {
            let listed = store
                .get_department(department_id)
                .map(|d| lists(d.doctor_ids(), &doctor.id))
                .unwrap_or(false);
            if !listed {
                breaks.push((doctor.id.clone(), department_id.clone()));
            }
        }
    }

    for department in store.list_departments() {
        for doctor_id in department.doctor_ids() {
            let owned = store
                .get_doctor(doctor_id)
                .map(|d| d.department_id.as_deref() == Some(department.id.as_str()))
                .unwrap_or(false);
            if !owned {
                breaks.push((doctor_id.clone(), department.id.clone()));
            }
        }
    }

    breaks
}

/// Doctors listed in a department of another specialty
///
/// Returns (doctor_id, department_id) pairs.
pub fn find_specialty_mismatches(store: &Store) -> Vec<(String, String)> {
    let mut mismatches = Vec::new();

    for department in store.list_departments() {
        for doctor_id in department.doctor_ids() {
            if let Ok(doctor) = store.get_doctor(doctor_id) {
                if doctor.specialty != department.specialty {
                    mismatches.push((doctor_id.clone(), department.id.clone()));
                }
            }
        }
    }

    mismatches
}

/// Rooms whose department is missing or does not list them, and department
/// room lists that point at other rooms
///
/// Returns (room_id, department_id) pairs.
pub fn find_room_membership_breaks(store: &Store) -> Vec<(String, String)> {
    let mut breaks = Vec::new();

    for room in store.list_rooms() {
        let listed = store
            .get_department(&room.department_id)
            .map(|d| lists(d.room_ids(), &room.id))
            .unwrap_or(false);
        if !listed {
            breaks.push((room.id.clone(), room.department_id.clone()));
        }
    }

    for department in store.list_departments() {
        for room_id in department.room_ids() {
            let owned = store
                .get_room(room_id)
                .map(|r| r.department_id == department.id)
                .unwrap_or(false);
            if !owned {
                breaks.push((room_id.clone(), department.id.clone()));
            }
        }
    }

    breaks
}

/// Same check for patient ↔ hospital
///
/// Returns (patient_id, hospital_id) pairs.
pub fn find_patient_membership_breaks(store: &Store) -> Vec<(String, String)> {
    let mut breaks = Vec::new();

    for patient in store.list_patients() {
        if let Some(ref hospital_id) = patient.hospital_id {
            let listed = store
                .get_hospital(hospital_id)
                .map(|h| lists(h.patient_ids(), &patient.id))
                .unwrap_or(false);
            if !listed {
                breaks.push((patient.id.clone(), hospital_id.clone()));
            }
        }
    }

    for hospital in store.list_hospitals() {
        for patient_id in hospital.patient_ids() {
            let owned = store
                .get_patient(patient_id)
                .map(|p| p.hospital_id.as_deref() == Some(hospital.id.as_str()))
                .unwrap_or(false);
            if !owned {
                breaks.push((patient_id.clone(), hospital.id.clone()));
            }
        }
    }

    breaks
}

/// Patients without a matching history, histories without a patient, and
/// histories whose number is not canonical
///
/// Returns (patient_id, history_id) pairs.
pub fn find_history_breaks(store: &Store) -> Vec<(String, String)> {
    let mut breaks = Vec::new();

    for patient in store.list_patients() {
        let ok = store
            .get_history(&patient.history_id)
            .map(|h| {
                h.patient_id == patient.id
                    && h.number == ClinicalHistory::number_for(&patient.person.dni, h.created_at)
            })
            .unwrap_or(false);
        if !ok {
            breaks.push((patient.id.clone(), patient.history_id.clone()));
        }
    }

    for history in store.list_histories() {
        let owned = store
            .get_patient(&history.patient_id)
            .map(|p| p.history_id == history.id)
            .unwrap_or(false);
        if !owned {
            breaks.push((history.patient_id.clone(), history.id.clone()));
        }
    }

    breaks
}

/// Appointments whose patient, doctor or room is missing or does not list
/// them, and appointment lists holding unknown ids
///
/// Returns (appointment_id, owner_id) pairs.
pub fn find_appointment_breaks(store: &Store) -> Vec<(String, String)> {
    let mut breaks = Vec::new();

    for appointment in store.list_appointments() {
        let id = appointment.id.as_str();
        let by_patient = store
            .get_patient(&appointment.patient_id)
            .map(|p| lists(p.appointment_ids(), id))
            .unwrap_or(false);
        if !by_patient {
            breaks.push((id.to_string(), appointment.patient_id.clone()));
        }
        let by_doctor = store
            .get_doctor(&appointment.doctor_id)
            .map(|d| lists(d.appointment_ids(), id))
            .unwrap_or(false);
        if !by_doctor {
            breaks.push((id.to_string(), appointment.doctor_id.clone()));
        }
        let by_room = store
            .get_room(&appointment.room_id)
            .map(|r| lists(r.appointment_ids(), id))
            .unwrap_or(false);
        if !by_room {
            breaks.push((id.to_string(), appointment.room_id.clone()));
        }
    }

    let owners = store
        .list_patients()
        .into_iter()
        .map(|p| (p.id.as_str(), p.appointment_ids()))
        .chain(
            store
                .list_doctors()
                .into_iter()
                .map(|d| (d.id.as_str(), d.appointment_ids())),
        )
        .chain(
            store
                .list_rooms()
                .into_iter()
                .map(|r| (r.id.as_str(), r.appointment_ids())),
        );
    for (owner_id, ids) in owners {
        for appointment_id in ids {
            if store.get_appointment(appointment_id).is_err() {
                breaks.push((appointment_id.clone(), owner_id.to_string()));
            }
        }
    }

    breaks
}

/// DNIs shared by two doctors or two patients, and repeated room numbers
///
/// Returns the duplicated keys.
pub fn find_duplicate_keys(store: &Store) -> Vec<String> {
    let mut duplicates = Vec::new();

    let mut seen = HashSet::new();
    for doctor in store.list_doctors() {
        if !seen.insert(doctor.person.dni.as_str()) {
            duplicates.push(doctor.person.dni.to_string());
        }
    }

    let mut seen = HashSet::new();
    for patient in store.list_patients() {
        if !seen.insert(patient.person.dni.as_str()) {
            duplicates.push(patient.person.dni.to_string());
        }
    }

    let mut seen = HashSet::new();
    for room in store.list_rooms() {
        if !seen.insert(room.number.as_str()) {
            duplicates.push(room.number.clone());
        }
    }

    duplicates
}
