//! Appointment CSV lines
//!
//! One appointment per line, seven comma-separated fields:
//!
//! ```text
//! patientDni,doctorDni,roomNumber,dateTime,cost,STATUS,notes
//! 30111222,20999888,C-101,2031-05-04T10:30,1500.00,SCHEDULED,bring tests; fasting
//! ```
//!
//! Fields are split on every comma, without quoting. Commas inside notes are
//! written as `;` and read back as `,`, so a literal `;` in notes does not
//! survive a round trip.

use chrono::{NaiveDateTime, Timelike};

use crate::clock::Clock;
use crate::errors::{HospitalError, Result};
use crate::model::{Appointment, AppointmentStatus, Money};
use crate::ops::appointment_ops::{attach, check_booking};
use crate::ops::Store;

const FIELD_COUNT: usize = 7;
const MINUTES_FORMAT: &str = "%Y-%m-%dT%H:%M";
const SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

fn invalid(reason: impl Into<String>) -> HospitalError {
    HospitalError::InvalidCsv {
        reason: reason.into(),
    }
}

/// ISO-8601 local date-time; seconds are written only when non-zero
pub fn format_date_time(at: NaiveDateTime) -> String {
    if at.second() == 0 && at.nanosecond() == 0 {
        at.format(MINUTES_FORMAT).to_string()
    } else {
        at.format(SECONDS_FORMAT).to_string()
    }
}

/// Accepts `YYYY-MM-DDTHH:MM` with optional seconds and fraction
///
/// # Errors
/// * `InvalidCsv` - text is not a local date-time
pub fn parse_date_time(text: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, SECONDS_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, MINUTES_FORMAT))
        .map_err(|_| invalid(format!("bad date-time '{text}'")))
}

/// Render one appointment as a CSV line (no trailing newline)
///
/// # Errors
/// * `PatientNotFound`, `DoctorNotFound`, `RoomNotFound` - dangling reference
pub fn to_csv_line(appointment: &Appointment, store: &Store) -> Result<String> {
    let patient = store.get_patient(&appointment.patient_id)?;
    let doctor = store.get_doctor(&appointment.doctor_id)?;
    let room = store.get_room(&appointment.room_id)?;

    Ok(format!(
        "{},{},{},{},{},{},{}",
        patient.person.dni,
        doctor.person.dni,
        room.number,
        format_date_time(appointment.scheduled_at),
        appointment.cost,
        appointment.status(),
        appointment.notes().replace(',', ";"),
    ))
}

/// Parse one CSV line into an appointment bound to registry entities
///
/// The appointment is built but not attached to the store. Date, cost and
/// specialty rules apply as for scheduling; doctor and room availability is
/// not checked.
///
/// # Errors
/// * `InvalidCsv` - wrong field count or unparseable date-time, cost or status
/// * `UnknownPatientDni`, `UnknownDoctorDni`, `UnknownRoomNumber`
/// * `PastAppointment`, `NonPositiveCost`, `SpecialtyMismatch`
pub fn from_csv_line(line: &str, store: &Store, clock: &dyn Clock) -> Result<Appointment> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != FIELD_COUNT {
        return Err(invalid(format!(
            "expected {FIELD_COUNT} fields, found {} in '{line}'",
            fields.len()
        )));
    }

    let (patient_dni, doctor_dni, room_number) = (fields[0], fields[1], fields[2]);
    let scheduled_at = parse_date_time(fields[3])?;
    let cost: Money = fields[4]
        .parse()
        .map_err(|e: HospitalError| invalid(e.to_string()))?;
    let status: AppointmentStatus = fields[5]
        .parse()
        .map_err(|e: HospitalError| invalid(e.to_string()))?;
    let notes = fields[6].replace(';', ",");

    let patient = store
        .find_patient_by_dni(patient_dni)
        .ok_or_else(|| HospitalError::UnknownPatientDni {
            dni: patient_dni.to_string(),
        })?;
    let doctor = store
        .find_doctor_by_dni(doctor_dni)
        .ok_or_else(|| HospitalError::UnknownDoctorDni {
            dni: doctor_dni.to_string(),
        })?;
    let room = store
        .find_room_by_number(room_number)
        .ok_or_else(|| HospitalError::UnknownRoomNumber {
            number: room_number.to_string(),
        })?;

    check_booking(store, &patient.id, &doctor.id, &room.id, scheduled_at, cost, clock)?;

    Appointment::builder()
        .patient(patient.id.clone())
        .doctor(doctor.id.clone())
        .room(room.id.clone())
        .scheduled_at(scheduled_at)
        .cost(cost)
        .status(status)
        .notes(notes)
        .build()
}

/// All appointments in the registry, one line each, newline-terminated
///
/// # Errors
/// Propagates [`to_csv_line`] failures.
pub fn export_csv(store: &Store) -> Result<String> {
    let mut out = String::new();
    for appointment in store.list_appointments() {
        out.push_str(&to_csv_line(appointment, store)?);
        out.push('\n');
    }
    Ok(out)
}

/// Import every non-blank line; nothing is added if any line fails
///
/// Returns the ids of the imported appointments in file order.
///
/// # Errors
/// The first line error, wrapped with its 1-based line number when it is a
/// format error.
pub fn import_csv(text: &str, store: &mut Store, clock: &dyn Clock) -> Result<Vec<String>> {
    let mut parsed = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            continue;
        }
        let appointment = from_csv_line(line, store, clock).map_err(|err| match err {
            HospitalError::InvalidCsv { reason } => HospitalError::InvalidCsv {
                reason: format!("line {}: {reason}", index + 1),
            },
            other => other,
        })?;
        parsed.push(appointment);
    }

    let mut ids = Vec::with_capacity(parsed.len());
    for appointment in parsed {
        ids.push(appointment.id.clone());
        attach(store, appointment)?;
    }
    tracing::debug!(row_count = ids.len(), "appointments imported");
    Ok(ids)
}
