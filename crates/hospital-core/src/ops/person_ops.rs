use uuid::Uuid;

use super::store::Store;
use crate::clock::Clock;
use crate::errors::{HospitalError, Result};
use crate::model::{ClinicalHistory, Doctor, Patient, Person, Specialty};

/// Register a doctor
///
/// # Errors
/// * `InvalidLicense` - license is malformed
/// * `DuplicateDni` - another doctor already has this DNI
pub fn register_doctor(
    store: &mut Store,
    person: Person,
    license: &str,
    specialty: Specialty,
) -> Result<String> {
    if store.find_doctor_by_dni(person.dni.as_str()).is_some() {
        return Err(HospitalError::DuplicateDni {
            role: "doctor",
            dni: person.dni.to_string(),
        });
    }
    let doctor = Doctor::new(Uuid::now_v7().to_string(), person, license, specialty)?;
    let id = doctor.id.clone();
    store.insert_doctor(doctor);
    tracing::debug!(doctor_id = %id, specialty = %specialty, "doctor registered");
    Ok(id)
}

/// Register a patient together with an empty clinical history
///
/// The history is stamped with `clock.now()` and numbered `HC-{dni}-{year}`.
///
/// # Errors
/// * `BlankField` - phone or address is blank
/// * `DuplicateDni` - another patient already has this DNI
pub fn register_patient(
    store: &mut Store,
    person: Person,
    phone: impl Into<String>,
    address: impl Into<String>,
    clock: &dyn Clock,
) -> Result<String> {
    if store.find_patient_by_dni(person.dni.as_str()).is_some() {
        return Err(HospitalError::DuplicateDni {
            role: "patient",
            dni: person.dni.to_string(),
        });
    }

    let patient_id = Uuid::now_v7().to_string();
    let history_id = Uuid::now_v7().to_string();
    let history = ClinicalHistory::new(
        history_id.clone(),
        patient_id.clone(),
        &person.dni,
        clock.now(),
    );
    let patient = Patient::new(patient_id.clone(), person, phone, address, history_id)?;

    store.insert_history(history);
    store.insert_patient(patient);
    tracing::debug!(patient_id = %patient_id, "patient registered");
    Ok(patient_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::model::BloodType;
    use chrono::NaiveDate;

    fn person(dni: &str) -> Person {
        Person::new(
            "Lucía",
            "Pérez",
            dni,
            NaiveDate::from_ymd_opt(1985, 3, 9).unwrap(),
            BloodType::ANegative,
        )
        .unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_register_patient_creates_history() {
        let mut store = Store::new();
        let id = register_patient(&mut store, person("22333444"), "555-1", "Calle 1", &clock())
            .unwrap();

        let history = store.history_of(&id).unwrap();
        assert_eq!(history.number, "HC-22333444-2025");
        assert_eq!(history.patient_id, id);
    }

    #[test]
    fn test_duplicate_patient_dni() {
        let mut store = Store::new();
        register_patient(&mut store, person("22333444"), "1", "A", &clock()).unwrap();
        let err = register_patient(&mut store, person("22333444"), "2", "B", &clock())
            .unwrap_err();
        assert!(matches!(err, HospitalError::DuplicateDni { role: "patient", .. }));
        assert_eq!(store.list_histories().len(), 1);
    }

    #[test]
    fn test_same_dni_may_be_doctor_and_patient() {
        let mut store = Store::new();
        register_patient(&mut store, person("7654321"), "1", "A", &clock()).unwrap();
        register_doctor(&mut store, person("7654321"), "MP-1234", Specialty::Oncology).unwrap();
        let err = register_doctor(&mut store, person("7654321"), "MP-9999", Specialty::Oncology)
            .unwrap_err();
        assert!(matches!(err, HospitalError::DuplicateDni { role: "doctor", .. }));
    }
}
