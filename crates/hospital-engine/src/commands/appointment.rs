//! Appointment commands: scheduling, status and notes, listing, CSV
//! export and import

use super::{elapsed_ms, with_context, with_registry};
use hospital_core::codec::{export_csv, import_csv};
use hospital_core::ops::appointment_ops::{
    appointments_for_doctor, appointments_for_patient, appointments_for_room, update_notes,
    update_status,
};
use hospital_core::ops::{schedule_appointment, ScheduleRequest};
use hospital_core::types::RequestContext;
use hospital_core::{log_op_end, log_op_error, log_op_start, Appointment, AppointmentStatus, Clock};
use hospital_store::errors::{io_error, Result};
use hospital_store::repo::{load_registry, SqliteRepo};
use rusqlite::Connection;
use std::path::Path;
use std::time::Instant;

/// Which appointments `appointment_list` returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppointmentFilter {
    All,
    Patient(String),
    Doctor(String),
    Room(String),
}

/// Schedule an appointment and persist it
///
/// # Errors
/// The scheduling rule violations of `schedule_appointment`, plus
/// `Persistence` on database failure.
pub fn appointment_schedule(
    conn: &mut Connection,
    ctx: &RequestContext,
    request: ScheduleRequest,
    clock: &dyn Clock,
) -> Result<String> {
    const OP: &str = "appointment_schedule";
    log_op_start!(
        OP,
        request_id = %ctx.request_id,
        patient_id = %request.patient_id,
        doctor_id = %request.doctor_id,
        room_id = %request.room_id
    );
    let start = Instant::now();

    let result = with_registry(conn, |store, tx| {
        let id = schedule_appointment(store, request, clock)?;
        SqliteRepo::persist_appointment(tx, store.get_appointment(&id)?)?;
        Ok(id)
    })
    .map_err(|e| {
        log_op_error!(OP, e.clone(), duration_ms = elapsed_ms(start), request_id = %ctx.request_id);
        with_context(e, OP, ctx)
    })?;

    log_op_end!(OP, duration_ms = elapsed_ms(start), request_id = %ctx.request_id, appointment_id = %result);
    Ok(result)
}

/// Change the status of an appointment
///
/// # Errors
/// `NotFound` for an unknown appointment.
pub fn appointment_set_status(
    conn: &mut Connection,
    ctx: &RequestContext,
    appointment_id: &str,
    status: AppointmentStatus,
) -> Result<()> {
    const OP: &str = "appointment_set_status";
    log_op_start!(OP, request_id = %ctx.request_id, appointment_id, status = %status);
    let start = Instant::now();

    with_registry(conn, |store, tx| {
        update_status(store, appointment_id, status)?;
        SqliteRepo::persist_appointment(tx, store.get_appointment(appointment_id)?)
    })
    .map_err(|e| {
        log_op_error!(OP, e.clone(), duration_ms = elapsed_ms(start), request_id = %ctx.request_id);
        with_context(e, OP, ctx)
    })?;

    log_op_end!(OP, duration_ms = elapsed_ms(start), request_id = %ctx.request_id);
    Ok(())
}

/// Replace or clear (`None`) the notes of an appointment
///
/// # Errors
/// `NotFound` for an unknown appointment.
pub fn appointment_set_notes(
    conn: &mut Connection,
    ctx: &RequestContext,
    appointment_id: &str,
    notes: Option<String>,
) -> Result<()> {
    const OP: &str = "appointment_set_notes";
    log_op_start!(OP, request_id = %ctx.request_id, appointment_id);
    let start = Instant::now();

    with_registry(conn, |store, tx| {
        update_notes(store, appointment_id, notes)?;
        SqliteRepo::persist_appointment(tx, store.get_appointment(appointment_id)?)
    })
    .map_err(|e| {
        log_op_error!(OP, e.clone(), duration_ms = elapsed_ms(start), request_id = %ctx.request_id);
        with_context(e, OP, ctx)
    })?;

    log_op_end!(OP, duration_ms = elapsed_ms(start), request_id = %ctx.request_id);
    Ok(())
}

/// List appointments in booking order
///
/// # Errors
/// `NotFound` when the filter names an unknown patient, doctor or room.
pub fn appointment_list(
    conn: &Connection,
    ctx: &RequestContext,
    filter: &AppointmentFilter,
) -> Result<Vec<Appointment>> {
    const OP: &str = "appointment_list";
    log_op_start!(OP, request_id = %ctx.request_id, filter = ?filter);
    let start = Instant::now();

    let result = appointment_list_impl(conn, filter).map_err(|e| {
        log_op_error!(OP, e.clone(), duration_ms = elapsed_ms(start), request_id = %ctx.request_id);
        with_context(e, OP, ctx)
    })?;

    log_op_end!(OP, duration_ms = elapsed_ms(start), request_id = %ctx.request_id, row_count = result.len());
    Ok(result)
}

fn appointment_list_impl(conn: &Connection, filter: &AppointmentFilter) -> Result<Vec<Appointment>> {
    let store = load_registry(conn)?;
    let found = match filter {
        AppointmentFilter::All => store.list_appointments(),
        AppointmentFilter::Patient(id) => appointments_for_patient(&store, id)?,
        AppointmentFilter::Doctor(id) => appointments_for_doctor(&store, id)?,
        AppointmentFilter::Room(id) => appointments_for_room(&store, id)?,
    };
    Ok(found.into_iter().cloned().collect())
}

/// Write every appointment to a CSV file, one line each
///
/// Returns the number of lines written.
///
/// # Errors
/// `Io` when the file cannot be written.
pub fn appointments_export(conn: &Connection, ctx: &RequestContext, path: &Path) -> Result<usize> {
    const OP: &str = "appointments_export";
    log_op_start!(OP, request_id = %ctx.request_id, path = %path.display());
    let start = Instant::now();

    let result = appointments_export_impl(conn, path).map_err(|e| {
        log_op_error!(OP, e.clone(), duration_ms = elapsed_ms(start), request_id = %ctx.request_id);
        with_context(e, OP, ctx)
    })?;

    log_op_end!(OP, duration_ms = elapsed_ms(start), request_id = %ctx.request_id, row_count = result);
    Ok(result)
}

fn appointments_export_impl(conn: &Connection, path: &Path) -> Result<usize> {
    let store = load_registry(conn)?;
    let text = export_csv(&store)?;
    std::fs::write(path, &text).map_err(|e| io_error("appointments_export", e))?;
    Ok(store.list_appointments().len())
}

/// Read a CSV file and persist every appointment in it
///
/// All-or-nothing: a bad line aborts the import and nothing is written.
/// Returns the ids of the new appointments in file order.
///
/// # Errors
/// `Io` when the file cannot be read, `InvalidInput` for a malformed line,
/// `NotFound` for an unknown DNI or room number, and the booking rule
/// violations.
pub fn appointments_import(
    conn: &mut Connection,
    ctx: &RequestContext,
    path: &Path,
    clock: &dyn Clock,
) -> Result<Vec<String>> {
    const OP: &str = "appointments_import";
    log_op_start!(OP, request_id = %ctx.request_id, path = %path.display());
    let start = Instant::now();

    let result = appointments_import_impl(conn, path, clock).map_err(|e| {
        log_op_error!(OP, e.clone(), duration_ms = elapsed_ms(start), request_id = %ctx.request_id);
        with_context(e, OP, ctx)
    })?;

    log_op_end!(OP, duration_ms = elapsed_ms(start), request_id = %ctx.request_id, row_count = result.len());
    Ok(result)
}

fn appointments_import_impl(
    conn: &mut Connection,
    path: &Path,
    clock: &dyn Clock,
) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path).map_err(|e| io_error("appointments_import", e))?;
    with_registry(conn, |store, tx| {
        let ids = import_csv(&text, store, clock)?;
        for id in &ids {
            SqliteRepo::persist_appointment(tx, store.get_appointment(id)?)?;
        }
        Ok(ids)
    })
}
