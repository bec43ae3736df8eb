//! Upserts for registry entities
//!
//! Every function takes a `&Connection`; pass a `Transaction` (it derefs to
//! one) to group writes. Child rows carry their owner's id; the owner's
//! list order is written into the child's `*_position` column when the owner
//! is persisted, so persist children before owners.

use super::{DATE_FORMAT, DATE_TIME_FORMAT};
use crate::errors::{from_rusqlite, Result};
use hospital_core::model::HistoryEntryKind;
use hospital_core::{
    Appointment, ClinicalHistory, Department, Doctor, Hospital, Patient, Person, Room, Store,
};
use rusqlite::Connection;

pub struct SqliteRepo;

fn history_table(kind: HistoryEntryKind) -> &'static str {
    match kind {
        HistoryEntryKind::Diagnosis => "history_diagnoses",
        HistoryEntryKind::Treatment => "history_treatments",
        HistoryEntryKind::Allergy => "history_allergies",
    }
}

fn birth_date(person: &Person) -> String {
    person.birth_date.format(DATE_FORMAT).to_string()
}

impl SqliteRepo {
    /// Upsert the hospital row and record its department and patient order
    ///
    /// # Errors
    /// `Persistence` on SQLite failure.
    pub fn persist_hospital(conn: &Connection, hospital: &Hospital) -> Result<()> {
        conn.execute(
            "INSERT INTO hospitals (id, name, address, phone)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                address = excluded.address,
                phone = excluded.phone",
            rusqlite::params![hospital.id, hospital.name, hospital.address, hospital.phone],
        )
        .map_err(from_rusqlite)?;
        Self::persist_hospital_order(conn, hospital)
    }

    /// Write list positions for a hospital's departments and patients
    ///
    /// # Errors
    /// `Persistence` on SQLite failure.
    pub fn persist_hospital_order(conn: &Connection, hospital: &Hospital) -> Result<()> {
        for (position, department_id) in hospital.department_ids().iter().enumerate() {
            conn.execute(
                "UPDATE departments SET hospital_position = ?1 WHERE id = ?2",
                rusqlite::params![position as i64, department_id],
            )
            .map_err(from_rusqlite)?;
        }
        for (position, patient_id) in hospital.patient_ids().iter().enumerate() {
            conn.execute(
                "UPDATE patients SET hospital_position = ?1 WHERE id = ?2",
                rusqlite::params![position as i64, patient_id],
            )
            .map_err(from_rusqlite)?;
        }
        Ok(())
    }

    /// Upsert the department row and record its doctor order
    ///
    /// # Errors
    /// `Persistence` on SQLite failure, including a missing hospital row.
    pub fn persist_department(conn: &Connection, department: &Department) -> Result<()> {
        conn.execute(
            "INSERT INTO departments (id, name, specialty, hospital_id)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                specialty = excluded.specialty,
                hospital_id = excluded.hospital_id",
            rusqlite::params![
                department.id,
                department.name,
                department.specialty.as_str(),
                department.hospital_id,
            ],
        )
        .map_err(from_rusqlite)?;
        Self::persist_department_order(conn, department)
    }

    /// # Errors
    /// `Persistence` on SQLite failure.
    pub fn persist_department_order(conn: &Connection, department: &Department) -> Result<()> {
        for (position, doctor_id) in department.doctor_ids().iter().enumerate() {
            conn.execute(
                "UPDATE doctors SET department_position = ?1 WHERE id = ?2",
                rusqlite::params![position as i64, doctor_id],
            )
            .map_err(from_rusqlite)?;
        }
        Ok(())
    }

    /// # Errors
    /// `Persistence` on SQLite failure, including a duplicate room number.
    pub fn persist_room(conn: &Connection, room: &Room) -> Result<()> {
        conn.execute(
            "INSERT INTO rooms (id, number, kind, department_id)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                number = excluded.number,
                kind = excluded.kind,
                department_id = excluded.department_id",
            rusqlite::params![room.id, room.number, room.kind, room.department_id],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// # Errors
    /// `Persistence` on SQLite failure, including a duplicate DNI.
    pub fn persist_doctor(conn: &Connection, doctor: &Doctor) -> Result<()> {
        let person = &doctor.person;
        conn.execute(
            "INSERT INTO doctors (id, first_name, last_name, dni, birth_date, blood_type,
                                  license, specialty, department_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(id) DO UPDATE SET
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                dni = excluded.dni,
                birth_date = excluded.birth_date,
                blood_type = excluded.blood_type,
                license = excluded.license,
                specialty = excluded.specialty,
                department_id = excluded.department_id",
            rusqlite::params![
                doctor.id,
                person.first_name,
                person.last_name,
                person.dni.as_str(),
                birth_date(person),
                person.blood_type.as_str(),
                doctor.license.as_str(),
                doctor.specialty.as_str(),
                doctor.department_id,
            ],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// # Errors
    /// `Persistence` on SQLite failure, including a duplicate DNI.
    pub fn persist_patient(conn: &Connection, patient: &Patient) -> Result<()> {
        let person = &patient.person;
        conn.execute(
            "INSERT INTO patients (id, first_name, last_name, dni, birth_date, blood_type,
                                   phone, address, history_id, hospital_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             ON CONFLICT(id) DO UPDATE SET
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                dni = excluded.dni,
                birth_date = excluded.birth_date,
                blood_type = excluded.blood_type,
                phone = excluded.phone,
                address = excluded.address,
                history_id = excluded.history_id,
                hospital_id = excluded.hospital_id",
            rusqlite::params![
                patient.id,
                person.first_name,
                person.last_name,
                person.dni.as_str(),
                birth_date(person),
                person.blood_type.as_str(),
                patient.phone,
                patient.address,
                patient.history_id,
                patient.hospital_id,
            ],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// Upsert the history row and rewrite its entry lists
    ///
    /// # Errors
    /// `Persistence` on SQLite failure, including a missing patient row.
    pub fn persist_history(conn: &Connection, history: &ClinicalHistory) -> Result<()> {
        conn.execute(
            "INSERT INTO clinical_histories (id, number, patient_id, created_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                number = excluded.number,
                patient_id = excluded.patient_id,
                created_at = excluded.created_at",
            rusqlite::params![
                history.id,
                history.number,
                history.patient_id,
                history.created_at.format(DATE_TIME_FORMAT).to_string(),
            ],
        )
        .map_err(from_rusqlite)?;

        for kind in [
            HistoryEntryKind::Diagnosis,
            HistoryEntryKind::Treatment,
            HistoryEntryKind::Allergy,
        ] {
            let table = history_table(kind);
            conn.execute(
                &format!("DELETE FROM {table} WHERE history_id = ?1"),
                [&history.id],
            )
            .map_err(from_rusqlite)?;
            for (position, text) in history.entries(kind).iter().enumerate() {
                conn.execute(
                    &format!(
                        "INSERT INTO {table} (history_id, position, text) VALUES (?1, ?2, ?3)"
                    ),
                    rusqlite::params![history.id, position as i64, text],
                )
                .map_err(from_rusqlite)?;
            }
        }
        Ok(())
    }

    /// # Errors
    /// `Persistence` on SQLite failure, including missing referenced rows.
    pub fn persist_appointment(conn: &Connection, appointment: &Appointment) -> Result<()> {
        conn.execute(
            "INSERT INTO appointments (id, patient_id, doctor_id, room_id, scheduled_at,
                                       cost_cents, status, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(id) DO UPDATE SET
                scheduled_at = excluded.scheduled_at,
                cost_cents = excluded.cost_cents,
                status = excluded.status,
                notes = excluded.notes",
            rusqlite::params![
                appointment.id,
                appointment.patient_id,
                appointment.doctor_id,
                appointment.room_id,
                appointment
                    .scheduled_at
                    .format(DATE_TIME_FORMAT)
                    .to_string(),
                appointment.cost.cents(),
                appointment.status().as_str(),
                appointment.notes(),
            ],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// Persist every entity of the store, owners last so list order sticks
    ///
    /// # Errors
    /// `Persistence` on the first failing write.
    pub fn persist_store(conn: &Connection, store: &Store) -> Result<()> {
        for hospital in store.list_hospitals() {
            Self::persist_hospital(conn, hospital)?;
        }
        for department in store.list_departments() {
            Self::persist_department(conn, department)?;
        }
        for room in store.list_rooms() {
            Self::persist_room(conn, room)?;
        }
        for doctor in store.list_doctors() {
            Self::persist_doctor(conn, doctor)?;
        }
        for patient in store.list_patients() {
            Self::persist_patient(conn, patient)?;
        }
        for history in store.list_histories() {
            Self::persist_history(conn, history)?;
        }
        for appointment in store.list_appointments() {
            Self::persist_appointment(conn, appointment)?;
        }
        for department in store.list_departments() {
            Self::persist_department_order(conn, department)?;
        }
        for hospital in store.list_hospitals() {
            Self::persist_hospital_order(conn, hospital)?;
        }
        tracing::debug!("registry persisted");
        Ok(())
    }
}
