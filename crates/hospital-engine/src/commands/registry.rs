//! Registry commands: hospitals, departments, doctors, patients, rooms
//!
//! Lifecycle logging follows the engine convention:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! DNIs and phone numbers are only logged masked.

use super::{elapsed_ms, with_context, with_registry};
use chrono::NaiveDate;
use hospital_core::ops::appointment_ops::appointments_for_patient;
use hospital_core::ops::{department_ops, hospital_ops, person_ops};
use hospital_core::types::{RequestContext, Sensitive};
use hospital_core::{
    log_op_end, log_op_error, log_op_start, Appointment, BloodType, ClinicalHistory, Clock,
    Hospital, Patient, Person, Specialty,
};
use hospital_store::errors::Result;
use hospital_store::repo::{load_registry, SqliteRepo};
use rusqlite::Connection;
use std::time::Instant;

/// Raw identity fields; validated when the command runs
#[derive(Debug, Clone)]
pub struct PersonInput {
    pub first_name: String,
    pub last_name: String,
    pub dni: String,
    pub birth_date: NaiveDate,
    pub blood_type: BloodType,
}

impl PersonInput {
    fn masked_dni(&self) -> String {
        Sensitive::new(self.dni.as_str()).masked(3)
    }

    fn into_person(self) -> hospital_core::Result<Person> {
        Person::new(
            self.first_name,
            self.last_name,
            &self.dni,
            self.birth_date,
            self.blood_type,
        )
    }
}

/// Everything known about one patient
#[derive(Debug, Clone)]
pub struct PatientRecord {
    pub patient: Patient,
    pub history: ClinicalHistory,
    pub appointments: Vec<Appointment>,
}

/// Create a hospital
///
/// # Errors
/// `InvalidInput` for a blank field, `Persistence` on database failure.
pub fn hospital_create(
    conn: &mut Connection,
    ctx: &RequestContext,
    name: String,
    address: String,
    phone: String,
) -> Result<String> {
    const OP: &str = "hospital_create";
    log_op_start!(OP, request_id = %ctx.request_id);
    let start = Instant::now();

    let result = with_registry(conn, |store, tx| {
        let id = hospital_ops::create_hospital(store, name, address, phone)?;
        SqliteRepo::persist_hospital(tx, store.get_hospital(&id)?)?;
        Ok(id)
    })
    .map_err(|e| {
        log_op_error!(OP, e.clone(), duration_ms = elapsed_ms(start), request_id = %ctx.request_id);
        with_context(e, OP, ctx)
    })?;

    log_op_end!(OP, duration_ms = elapsed_ms(start), request_id = %ctx.request_id, hospital_id = %result);
    Ok(result)
}

/// All hospitals in creation order
///
/// # Errors
/// `Persistence` or `Serialization` when the registry cannot be loaded.
pub fn hospital_list(conn: &Connection, ctx: &RequestContext) -> Result<Vec<Hospital>> {
    const OP: &str = "hospital_list";
    log_op_start!(OP, request_id = %ctx.request_id);
    let start = Instant::now();

    let result = load_registry(conn)
        .map(|store| store.list_hospitals().into_iter().cloned().collect::<Vec<_>>())
        .map_err(|e| {
            log_op_error!(OP, e.clone(), duration_ms = elapsed_ms(start), request_id = %ctx.request_id);
            with_context(e, OP, ctx)
        })?;

    log_op_end!(OP, duration_ms = elapsed_ms(start), request_id = %ctx.request_id, row_count = result.len());
    Ok(result)
}

/// Create a department, optionally attaching it to a hospital right away
///
/// # Errors
/// `InvalidInput` for a blank name, `NotFound` for an unknown hospital.
pub fn department_create(
    conn: &mut Connection,
    ctx: &RequestContext,
    name: String,
    specialty: Specialty,
    hospital_id: Option<String>,
) -> Result<String> {
    const OP: &str = "department_create";
    log_op_start!(OP, request_id = %ctx.request_id, specialty = %specialty);
    let start = Instant::now();

    let result = with_registry(conn, |store, tx| {
        let id = department_ops::create_department(store, name, specialty)?;
        if let Some(ref hospital_id) = hospital_id {
            hospital_ops::add_department(store, hospital_id, &id)?;
        }
        SqliteRepo::persist_department(tx, store.get_department(&id)?)?;
        if let Some(ref hospital_id) = hospital_id {
            SqliteRepo::persist_hospital(tx, store.get_hospital(hospital_id)?)?;
        }
        Ok(id)
    })
    .map_err(|e| {
        log_op_error!(OP, e.clone(), duration_ms = elapsed_ms(start), request_id = %ctx.request_id);
        with_context(e, OP, ctx)
    })?;

    log_op_end!(OP, duration_ms = elapsed_ms(start), request_id = %ctx.request_id, department_id = %result);
    Ok(result)
}

/// Attach a department to a hospital, moving it from any previous one
///
/// # Errors
/// `NotFound` for an unknown hospital or department.
pub fn department_attach(
    conn: &mut Connection,
    ctx: &RequestContext,
    hospital_id: &str,
    department_id: &str,
) -> Result<()> {
    const OP: &str = "department_attach";
    log_op_start!(OP, request_id = %ctx.request_id, hospital_id, department_id);
    let start = Instant::now();

    with_registry(conn, |store, tx| {
        let previous = store.get_department(department_id)?.hospital_id.clone();
        hospital_ops::add_department(store, hospital_id, department_id)?;
        SqliteRepo::persist_department(tx, store.get_department(department_id)?)?;
        SqliteRepo::persist_hospital(tx, store.get_hospital(hospital_id)?)?;
        if let Some(previous) = previous.filter(|p| p != hospital_id) {
            SqliteRepo::persist_hospital(tx, store.get_hospital(&previous)?)?;
        }
        Ok(())
    })
    .map_err(|e| {
        log_op_error!(OP, e.clone(), duration_ms = elapsed_ms(start), request_id = %ctx.request_id);
        with_context(e, OP, ctx)
    })?;

    log_op_end!(OP, duration_ms = elapsed_ms(start), request_id = %ctx.request_id);
    Ok(())
}

/// Register a doctor, optionally assigning a department
///
/// # Errors
/// `InvalidInput` for bad identity or license data, `AlreadyExists` for a
/// registered DNI, `SpecialtyMismatch` when the department differs.
pub fn doctor_register(
    conn: &mut Connection,
    ctx: &RequestContext,
    person: PersonInput,
    license: String,
    specialty: Specialty,
    department_id: Option<String>,
) -> Result<String> {
    const OP: &str = "doctor_register";
    log_op_start!(OP, request_id = %ctx.request_id, dni = %person.masked_dni(), specialty = %specialty);
    let start = Instant::now();

    let result = with_registry(conn, |store, tx| {
        let id = person_ops::register_doctor(store, person.into_person()?, &license, specialty)?;
        if let Some(ref department_id) = department_id {
            department_ops::add_doctor(store, department_id, &id)?;
        }
        SqliteRepo::persist_doctor(tx, store.get_doctor(&id)?)?;
        if let Some(ref department_id) = department_id {
            SqliteRepo::persist_department(tx, store.get_department(department_id)?)?;
        }
        Ok(id)
    })
    .map_err(|e| {
        log_op_error!(OP, e.clone(), duration_ms = elapsed_ms(start), request_id = %ctx.request_id);
        with_context(e, OP, ctx)
    })?;

    log_op_end!(OP, duration_ms = elapsed_ms(start), request_id = %ctx.request_id, doctor_id = %result);
    Ok(result)
}

/// Assign a doctor to a department
///
/// # Errors
/// `NotFound` for unknown ids, `SpecialtyMismatch` when specialties differ.
pub fn doctor_assign(
    conn: &mut Connection,
    ctx: &RequestContext,
    department_id: &str,
    doctor_id: &str,
) -> Result<()> {
    const OP: &str = "doctor_assign";
    log_op_start!(OP, request_id = %ctx.request_id, department_id, doctor_id);
    let start = Instant::now();

    with_registry(conn, |store, tx| {
        let previous = store.get_doctor(doctor_id)?.department_id.clone();
        department_ops::add_doctor(store, department_id, doctor_id)?;
        SqliteRepo::persist_doctor(tx, store.get_doctor(doctor_id)?)?;
        SqliteRepo::persist_department(tx, store.get_department(department_id)?)?;
        if let Some(previous) = previous.filter(|p| p != department_id) {
            SqliteRepo::persist_department(tx, store.get_department(&previous)?)?;
        }
        Ok(())
    })
    .map_err(|e| {
        log_op_error!(OP, e.clone(), duration_ms = elapsed_ms(start), request_id = %ctx.request_id);
        with_context(e, OP, ctx)
    })?;

    log_op_end!(OP, duration_ms = elapsed_ms(start), request_id = %ctx.request_id);
    Ok(())
}

/// Register a patient with a fresh clinical history, optionally admitting
/// them to a hospital
///
/// # Errors
/// `InvalidInput` for bad identity or contact data, `AlreadyExists` for a
/// registered DNI, `NotFound` for an unknown hospital.
pub fn patient_register(
    conn: &mut Connection,
    ctx: &RequestContext,
    person: PersonInput,
    phone: String,
    address: String,
    hospital_id: Option<String>,
    clock: &dyn Clock,
) -> Result<String> {
    const OP: &str = "patient_register";
    log_op_start!(
        OP,
        request_id = %ctx.request_id,
        dni = %person.masked_dni(),
        phone = %Sensitive::new(phone.as_str()).masked(2)
    );
    let start = Instant::now();

    let result = with_registry(conn, |store, tx| {
        let id = person_ops::register_patient(store, person.into_person()?, phone, address, clock)?;
        if let Some(ref hospital_id) = hospital_id {
            hospital_ops::add_patient(store, hospital_id, &id)?;
        }
        let patient = store.get_patient(&id)?;
        SqliteRepo::persist_patient(tx, patient)?;
        SqliteRepo::persist_history(tx, store.get_history(&patient.history_id)?)?;
        if let Some(ref hospital_id) = hospital_id {
            SqliteRepo::persist_hospital(tx, store.get_hospital(hospital_id)?)?;
        }
        Ok(id)
    })
    .map_err(|e| {
        log_op_error!(OP, e.clone(), duration_ms = elapsed_ms(start), request_id = %ctx.request_id);
        with_context(e, OP, ctx)
    })?;

    log_op_end!(OP, duration_ms = elapsed_ms(start), request_id = %ctx.request_id, patient_id = %result);
    Ok(result)
}

/// Admit a patient to a hospital, moving them from any previous one
///
/// # Errors
/// `NotFound` for unknown ids.
pub fn patient_admit(
    conn: &mut Connection,
    ctx: &RequestContext,
    hospital_id: &str,
    patient_id: &str,
) -> Result<()> {
    const OP: &str = "patient_admit";
    log_op_start!(OP, request_id = %ctx.request_id, hospital_id, patient_id);
    let start = Instant::now();

    with_registry(conn, |store, tx| {
        let previous = store.get_patient(patient_id)?.hospital_id.clone();
        hospital_ops::add_patient(store, hospital_id, patient_id)?;
        SqliteRepo::persist_patient(tx, store.get_patient(patient_id)?)?;
        SqliteRepo::persist_hospital(tx, store.get_hospital(hospital_id)?)?;
        if let Some(previous) = previous.filter(|p| p != hospital_id) {
            SqliteRepo::persist_hospital(tx, store.get_hospital(&previous)?)?;
        }
        Ok(())
    })
    .map_err(|e| {
        log_op_error!(OP, e.clone(), duration_ms = elapsed_ms(start), request_id = %ctx.request_id);
        with_context(e, OP, ctx)
    })?;

    log_op_end!(OP, duration_ms = elapsed_ms(start), request_id = %ctx.request_id);
    Ok(())
}

/// A patient with their history and appointments
///
/// # Errors
/// `NotFound` for an unknown patient.
pub fn patient_show(
    conn: &Connection,
    ctx: &RequestContext,
    patient_id: &str,
) -> Result<PatientRecord> {
    const OP: &str = "patient_show";
    log_op_start!(OP, request_id = %ctx.request_id, patient_id);
    let start = Instant::now();

    let result = patient_show_impl(conn, patient_id).map_err(|e| {
        log_op_error!(OP, e.clone(), duration_ms = elapsed_ms(start), request_id = %ctx.request_id);
        with_context(e, OP, ctx)
    })?;

    log_op_end!(OP, duration_ms = elapsed_ms(start), request_id = %ctx.request_id);
    Ok(result)
}

fn patient_show_impl(conn: &Connection, patient_id: &str) -> Result<PatientRecord> {
    let store = load_registry(conn)?;
    Ok(PatientRecord {
        patient: store.get_patient(patient_id)?.clone(),
        history: store.history_of(patient_id)?.clone(),
        appointments: appointments_for_patient(&store, patient_id)?
            .into_iter()
            .cloned()
            .collect(),
    })
}

/// Create a room in a department
///
/// # Errors
/// `NotFound` for an unknown department, `AlreadyExists` for a used number.
pub fn room_create(
    conn: &mut Connection,
    ctx: &RequestContext,
    department_id: &str,
    number: String,
    kind: String,
) -> Result<String> {
    const OP: &str = "room_create";
    log_op_start!(OP, request_id = %ctx.request_id, department_id, room_number = %number);
    let start = Instant::now();

    let result = with_registry(conn, |store, tx| {
        let id = department_ops::create_room(store, department_id, number, kind)?;
        SqliteRepo::persist_room(tx, store.get_room(&id)?)?;
        Ok(id)
    })
    .map_err(|e| {
        log_op_error!(OP, e.clone(), duration_ms = elapsed_ms(start), request_id = %ctx.request_id);
        with_context(e, OP, ctx)
    })?;

    log_op_end!(OP, duration_ms = elapsed_ms(start), request_id = %ctx.request_id, room_id = %result);
    Ok(result)
}
