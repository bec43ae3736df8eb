use std::collections::BTreeMap;

use crate::errors::{HospitalError, Result};
use crate::model::{Appointment, ClinicalHistory, Department, Doctor, Hospital, Patient, Room};

/// In-memory registry arena
///
/// Every entity is keyed by its id. Ids are UUIDv7, so the ordered maps list
/// entities in creation order. Not thread-safe; engine commands hydrate a
/// fresh store per invocation.
#[derive(Debug, Clone, Default)]
pub struct Store {
    pub(crate) hospitals: BTreeMap<String, Hospital>,
    pub(crate) departments: BTreeMap<String, Department>,
    pub(crate) doctors: BTreeMap<String, Doctor>,
    pub(crate) patients: BTreeMap<String, Patient>,
    pub(crate) histories: BTreeMap<String, ClinicalHistory>,
    pub(crate) rooms: BTreeMap<String, Room>,
    pub(crate) appointments: BTreeMap<String, Appointment>,
}

macro_rules! accessors {
    ($field:ident, $ty:ty, $get:ident, $get_mut:ident, $insert:ident, $list:ident, $err:ident, $key:ident) => {
        /// # Errors
        ///
        /// Returns a not-found error naming the id.
        pub fn $get(&self, id: &str) -> Result<&$ty> {
            self.$field
                .get(id)
                .ok_or_else(|| HospitalError::$err { $key: id.to_string() })
        }

        /// # Errors
        ///
        /// Returns a not-found error naming the id.
        pub fn $get_mut(&mut self, id: &str) -> Result<&mut $ty> {
            self.$field
                .get_mut(id)
                .ok_or_else(|| HospitalError::$err { $key: id.to_string() })
        }

        /// Insert or replace by id. Bypasses relationship bookkeeping; used
        /// by hydration and test setup.
        pub fn $insert(&mut self, value: $ty) {
            self.$field.insert(value.id.clone(), value);
        }

        pub fn $list(&self) -> Vec<&$ty> {
            self.$field.values().collect()
        }
    };
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    accessors!(hospitals, Hospital, get_hospital, get_hospital_mut, insert_hospital, list_hospitals, HospitalNotFound, hospital_id);
    accessors!(departments, Department, get_department, get_department_mut, insert_department, list_departments, DepartmentNotFound, department_id);
    accessors!(doctors, Doctor, get_doctor, get_doctor_mut, insert_doctor, list_doctors, DoctorNotFound, doctor_id);
    accessors!(patients, Patient, get_patient, get_patient_mut, insert_patient, list_patients, PatientNotFound, patient_id);
    accessors!(histories, ClinicalHistory, get_history, get_history_mut, insert_history, list_histories, HistoryNotFound, history_id);
    accessors!(rooms, Room, get_room, get_room_mut, insert_room, list_rooms, RoomNotFound, room_id);
    accessors!(appointments, Appointment, get_appointment, get_appointment_mut, insert_appointment, list_appointments, AppointmentNotFound, appointment_id);

    pub fn find_patient_by_dni(&self, dni: &str) -> Option<&Patient> {
        self.patients.values().find(|p| p.person.dni.as_str() == dni)
    }

    pub fn find_doctor_by_dni(&self, dni: &str) -> Option<&Doctor> {
        self.doctors.values().find(|d| d.person.dni.as_str() == dni)
    }

    pub fn find_room_by_number(&self, number: &str) -> Option<&Room> {
        self.rooms.values().find(|r| r.number == number)
    }

    /// Clinical history owned by a patient
    ///
    /// # Errors
    ///
    /// `PatientNotFound` or `HistoryNotFound`.
    pub fn history_of(&self, patient_id: &str) -> Result<&ClinicalHistory> {
        let patient = self.get_patient(patient_id)?;
        self.get_history(&patient.history_id)
    }

    /// Clinical history owned by a patient, mutably
    ///
    /// # Errors
    ///
    /// `PatientNotFound` or `HistoryNotFound`.
    pub fn history_of_mut(&mut self, patient_id: &str) -> Result<&mut ClinicalHistory> {
        let history_id = self.get_patient(patient_id)?.history_id.clone();
        self.get_history_mut(&history_id)
    }

    pub fn is_empty(&self) -> bool {
        self.hospitals.is_empty()
            && self.departments.is_empty()
            && self.doctors.is_empty()
            && self.patients.is_empty()
            && self.rooms.is_empty()
            && self.appointments.is_empty()
    }
}
