//! Rebuild a `Store` from the database
//!
//! Rows are read in insertion order (rowid). Owner lists are rebuilt from the
//! children's `*_position` columns, falling back to rowid on ties.

use super::{DATE_FORMAT, DATE_TIME_FORMAT};
use crate::errors::{decode_error, from_rusqlite, Result};
use chrono::{NaiveDate, NaiveDateTime};
use hospital_core::model::HistoryEntryKind;
use hospital_core::{
    Appointment, AppointmentStatus, BloodType, ClinicalHistory, Department, Doctor, Hospital,
    Money, Patient, Person, Room, Specialty, Store,
};
use rusqlite::{Connection, Params, Row};

fn query_rows<T, P, F>(conn: &Connection, sql: &str, params: P, map: F) -> Result<Vec<T>>
where
    P: Params,
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = conn.prepare(sql).map_err(from_rusqlite)?;
    let rows = stmt
        .query_map(params, map)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(rows)
}

fn decode<T, E: std::fmt::Display>(
    table: &str,
    id: &str,
    value: std::result::Result<T, E>,
) -> Result<T> {
    value.map_err(|e| decode_error(table, id, &e.to_string()))
}

fn parse_date(table: &str, id: &str, text: &str) -> Result<NaiveDate> {
    decode(table, id, NaiveDate::parse_from_str(text, DATE_FORMAT))
}

fn parse_date_time(table: &str, id: &str, text: &str) -> Result<NaiveDateTime> {
    decode(table, id, NaiveDateTime::parse_from_str(text, DATE_TIME_FORMAT))
}

struct PersonRow {
    id: String,
    first_name: String,
    last_name: String,
    dni: String,
    birth_date: String,
    blood_type: String,
}

impl PersonRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            dni: row.get(3)?,
            birth_date: row.get(4)?,
            blood_type: row.get(5)?,
        })
    }

    fn into_person(self, table: &str) -> Result<Person> {
        let birth_date = parse_date(table, &self.id, &self.birth_date)?;
        let blood_type: BloodType = decode(table, &self.id, self.blood_type.parse())?;
        decode(
            table,
            &self.id,
            Person::new(self.first_name, self.last_name, &self.dni, birth_date, blood_type),
        )
    }
}

/// Load the whole registry
///
/// # Errors
/// `Persistence` on SQLite failure, `Serialization` when a stored value no
/// longer parses (bad DNI, unknown enum name, malformed date).
pub fn load_registry(conn: &Connection) -> Result<Store> {
    let mut store = Store::new();

    load_hospitals(conn, &mut store)?;
    load_departments(conn, &mut store)?;
    load_rooms(conn, &mut store)?;
    load_doctors(conn, &mut store)?;
    load_patients(conn, &mut store)?;
    load_histories(conn, &mut store)?;
    load_appointments(conn, &mut store)?;
    link_memberships(conn, &mut store)?;

    tracing::debug!(
        hospitals = store.list_hospitals().len(),
        patients = store.list_patients().len(),
        appointments = store.list_appointments().len(),
        "registry hydrated"
    );
    Ok(store)
}

fn load_hospitals(conn: &Connection, store: &mut Store) -> Result<()> {
    let rows = query_rows(
        conn,
        "SELECT id, name, address, phone FROM hospitals ORDER BY rowid",
        [],
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        },
    )?;
    for (id, name, address, phone) in rows {
        let hospital = decode("hospitals", &id, Hospital::new(id.clone(), name, address, phone))?;
        store.insert_hospital(hospital);
    }
    Ok(())
}

fn load_departments(conn: &Connection, store: &mut Store) -> Result<()> {
    let rows = query_rows(
        conn,
        "SELECT id, name, specialty, hospital_id FROM departments ORDER BY rowid",
        [],
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
            ))
        },
    )?;
    for (id, name, specialty, hospital_id) in rows {
        let specialty: Specialty = decode("departments", &id, specialty.parse())?;
        let mut department = decode("departments", &id, Department::new(id.clone(), name, specialty))?;
        department.hospital_id = hospital_id;
        store.insert_department(department);
    }
    Ok(())
}

fn load_rooms(conn: &Connection, store: &mut Store) -> Result<()> {
    let rows = query_rows(
        conn,
        "SELECT id, number, kind, department_id FROM rooms ORDER BY rowid",
        [],
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        },
    )?;
    for (id, number, kind, department_id) in rows {
        let room = decode("rooms", &id, Room::new(id.clone(), number, kind, department_id))?;
        store
            .get_department_mut(&room.department_id)?
            .link_room(&room.id);
        store.insert_room(room);
    }
    Ok(())
}

fn load_doctors(conn: &Connection, store: &mut Store) -> Result<()> {
    let rows = query_rows(
        conn,
        "SELECT id, first_name, last_name, dni, birth_date, blood_type,
                license, specialty, department_id
         FROM doctors ORDER BY rowid",
        [],
        |row| {
            Ok((
                PersonRow::read(row)?,
                row.get::<_, String>(6)?,
                row.get::<_, String>(7)?,
                row.get::<_, Option<String>>(8)?,
            ))
        },
    )?;
    for (person_row, license, specialty, department_id) in rows {
        let id = person_row.id.clone();
        let person = person_row.into_person("doctors")?;
        let specialty: Specialty = decode("doctors", &id, specialty.parse())?;
        let mut doctor = decode(
            "doctors",
            &id,
            Doctor::new(id.clone(), person, &license, specialty),
        )?;
        doctor.department_id = department_id;
        store.insert_doctor(doctor);
    }
    Ok(())
}

fn load_patients(conn: &Connection, store: &mut Store) -> Result<()> {
    let rows = query_rows(
        conn,
        "SELECT id, first_name, last_name, dni, birth_date, blood_type,
                phone, address, history_id, hospital_id
         FROM patients ORDER BY rowid",
        [],
        |row| {
            Ok((
                PersonRow::read(row)?,
                row.get::<_, String>(6)?,
                row.get::<_, String>(7)?,
                row.get::<_, String>(8)?,
                row.get::<_, Option<String>>(9)?,
            ))
        },
    )?;
    for (person_row, phone, address, history_id, hospital_id) in rows {
        let id = person_row.id.clone();
        let person = person_row.into_person("patients")?;
        let mut patient = decode(
            "patients",
            &id,
            Patient::new(id.clone(), person, phone, address, history_id),
        )?;
        patient.hospital_id = hospital_id;
        store.insert_patient(patient);
    }
    Ok(())
}

fn load_histories(conn: &Connection, store: &mut Store) -> Result<()> {
    let rows = query_rows(
        conn,
        "SELECT id, number, patient_id, created_at FROM clinical_histories ORDER BY rowid",
        [],
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        },
    )?;

    for (id, number, patient_id, created_at) in rows {
        let created_at = parse_date_time("clinical_histories", &id, &created_at)?;
        let dni = store
            .get_patient(&patient_id)?
            .person
            .dni
            .clone();
        let mut history = ClinicalHistory::new(id.clone(), patient_id, &dni, created_at);
        history.number = number;

        for (kind, table) in [
            (HistoryEntryKind::Diagnosis, "history_diagnoses"),
            (HistoryEntryKind::Treatment, "history_treatments"),
            (HistoryEntryKind::Allergy, "history_allergies"),
        ] {
            let entries: Vec<String> = query_rows(
                conn,
                &format!("SELECT text FROM {table} WHERE history_id = ?1 ORDER BY position"),
                [&id],
                |row| row.get(0),
            )?;
            for text in entries {
                history.add_entry(kind, text);
            }
        }
        store.insert_history(history);
    }
    Ok(())
}

fn load_appointments(conn: &Connection, store: &mut Store) -> Result<()> {
    let rows = query_rows(
        conn,
        "SELECT id, patient_id, doctor_id, room_id, scheduled_at, cost_cents, status, notes
         FROM appointments ORDER BY rowid",
        [],
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, i64>(5)?,
                row.get::<_, String>(6)?,
                row.get::<_, String>(7)?,
            ))
        },
    )?;

    for (id, patient_id, doctor_id, room_id, scheduled_at, cost_cents, status, notes) in rows {
        let scheduled_at = parse_date_time("appointments", &id, &scheduled_at)?;
        let status: AppointmentStatus = decode("appointments", &id, status.parse())?;
        let appointment = Appointment::builder()
            .id(id.clone())
            .patient(patient_id)
            .doctor(doctor_id)
            .room(room_id)
            .scheduled_at(scheduled_at)
            .cost(Money::from_cents(cost_cents))
            .status(status)
            .notes(notes)
            .build()?;

        store
            .get_patient_mut(&appointment.patient_id)?
            .link_appointment(&id);
        store
            .get_doctor_mut(&appointment.doctor_id)?
            .link_appointment(&id);
        store
            .get_room_mut(&appointment.room_id)?
            .link_appointment(&id);
        store.insert_appointment(appointment);
    }
    Ok(())
}

fn link_memberships(conn: &Connection, store: &mut Store) -> Result<()> {
    let pairs = |sql: &str| {
        query_rows(conn, sql, [], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
    };

    for (department_id, hospital_id) in pairs(
        "SELECT id, hospital_id FROM departments WHERE hospital_id IS NOT NULL
         ORDER BY hospital_position, rowid",
    )? {
        store
            .get_hospital_mut(&hospital_id)?
            .link_department(&department_id);
    }

    for (patient_id, hospital_id) in pairs(
        "SELECT id, hospital_id FROM patients WHERE hospital_id IS NOT NULL
         ORDER BY hospital_position, rowid",
    )? {
        store
            .get_hospital_mut(&hospital_id)?
            .link_patient(&patient_id);
    }

    for (doctor_id, department_id) in pairs(
        "SELECT id, department_id FROM doctors WHERE department_id IS NOT NULL
         ORDER BY department_position, rowid",
    )? {
        store
            .get_department_mut(&department_id)?
            .link_doctor(&doctor_id);
    }

    Ok(())
}
