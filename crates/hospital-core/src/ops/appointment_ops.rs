use chrono::{Duration, NaiveDateTime};

use super::store::Store;
use crate::clock::Clock;
use crate::errors::{HospitalError, Result};
use crate::model::{Appointment, AppointmentStatus, Money};

/// Doctor and room are busy for this many minutes on either side of a booking
pub const AVAILABILITY_WINDOW_MINUTES: i64 = 120;

/// Input for [`schedule_appointment`]
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRequest {
    pub patient_id: String,
    pub doctor_id: String,
    pub room_id: String,
    pub scheduled_at: NaiveDateTime,
    pub cost: Money,
    pub notes: Option<String>,
}

/// Book an appointment after running every scheduling rule
///
/// Rules are checked in this order and the first failure is returned:
/// patient, doctor and room exist; the date is not in the past; the cost is
/// positive; the doctor's specialty matches the room's department; neither
/// the doctor nor the room has a non-cancelled booking within
/// [`AVAILABILITY_WINDOW_MINUTES`].
///
/// # Errors
/// * `PatientNotFound`, `DoctorNotFound`, `RoomNotFound`
/// * `PastAppointment`, `NonPositiveCost`, `SpecialtyMismatch`
/// * `DoctorUnavailable`, `RoomUnavailable`
/// * `MultiLineNotes`
pub fn schedule_appointment(
    store: &mut Store,
    request: ScheduleRequest,
    clock: &dyn Clock,
) -> Result<String> {
    check_booking(
        store,
        &request.patient_id,
        &request.doctor_id,
        &request.room_id,
        request.scheduled_at,
        request.cost,
        clock,
    )?;
    check_availability(store, &request.doctor_id, &request.room_id, request.scheduled_at)?;

    let mut builder = Appointment::builder()
        .patient(request.patient_id)
        .doctor(request.doctor_id)
        .room(request.room_id)
        .scheduled_at(request.scheduled_at)
        .cost(request.cost);
    if let Some(notes) = request.notes {
        builder = builder.notes(notes);
    }
    let appointment = builder.build()?;

    let id = appointment.id.clone();
    attach(store, appointment)?;
    tracing::debug!(appointment_id = %id, "appointment scheduled");
    Ok(id)
}

/// Rules shared by scheduling and CSV import: references exist, date not in
/// the past, positive cost, matching specialty
///
/// # Errors
/// See [`schedule_appointment`]; availability is not checked here.
pub fn check_booking(
    store: &Store,
    patient_id: &str,
    doctor_id: &str,
    room_id: &str,
    scheduled_at: NaiveDateTime,
    cost: Money,
    clock: &dyn Clock,
) -> Result<()> {
    store.get_patient(patient_id)?;
    let doctor = store.get_doctor(doctor_id)?;
    let room = store.get_room(room_id)?;

    if scheduled_at < clock.now() {
        return Err(HospitalError::PastAppointment { scheduled_at });
    }
    if !cost.is_positive() {
        return Err(HospitalError::NonPositiveCost {
            cost: cost.to_string(),
        });
    }

    let department = store.get_department(&room.department_id)?;
    if doctor.specialty != department.specialty {
        return Err(HospitalError::SpecialtyMismatch {
            doctor: doctor.specialty,
            department: department.specialty,
        });
    }
    Ok(())
}

/// Reject a booking that overlaps the doctor's or the room's existing
/// non-cancelled appointments
///
/// # Errors
/// * `DoctorUnavailable`, `RoomUnavailable`
pub fn check_availability(
    store: &Store,
    doctor_id: &str,
    room_id: &str,
    scheduled_at: NaiveDateTime,
) -> Result<()> {
    check_availability_except(store, doctor_id, room_id, scheduled_at, None)
}

/// Same as [`check_availability`], ignoring the appointment `skip_id`
fn check_availability_except(
    store: &Store,
    doctor_id: &str,
    room_id: &str,
    scheduled_at: NaiveDateTime,
    skip_id: Option<&str>,
) -> Result<()> {
    let window = Duration::minutes(AVAILABILITY_WINDOW_MINUTES);
    let clashes = |ids: &[String]| {
        ids.iter()
            .filter(|id| Some(id.as_str()) != skip_id)
            .filter_map(|id| store.appointments.get(id))
            .filter(|a| a.status().blocks_slot())
            .any(|a| (a.scheduled_at - scheduled_at).abs() < window)
    };

    if clashes(store.get_doctor(doctor_id)?.appointment_ids()) {
        return Err(HospitalError::DoctorUnavailable {
            doctor_id: doctor_id.to_string(),
            scheduled_at,
        });
    }
    if clashes(store.get_room(room_id)?.appointment_ids()) {
        return Err(HospitalError::RoomUnavailable {
            room_id: room_id.to_string(),
            scheduled_at,
        });
    }
    Ok(())
}

/// Store an already validated appointment and list it on its patient,
/// doctor and room
///
/// # Errors
/// * `PatientNotFound`, `DoctorNotFound`, `RoomNotFound`
pub fn attach(store: &mut Store, appointment: Appointment) -> Result<()> {
    let id = appointment.id.clone();
    store.get_patient(&appointment.patient_id)?;
    store.get_doctor(&appointment.doctor_id)?;
    store.get_room(&appointment.room_id)?;

    store
        .get_patient_mut(&appointment.patient_id)?
        .link_appointment(&id);
    store
        .get_doctor_mut(&appointment.doctor_id)?
        .link_appointment(&id);
    store.get_room_mut(&appointment.room_id)?.link_appointment(&id);
    store.insert_appointment(appointment);
    Ok(())
}

/// Moving a cancelled appointment back to a slot-blocking status re-runs the
/// availability check against the other bookings.
///
/// # Errors
/// * `AppointmentNotFound`
/// * `DoctorUnavailable`, `RoomUnavailable` when reinstating into a taken slot
pub fn update_status(
    store: &mut Store,
    appointment_id: &str,
    status: AppointmentStatus,
) -> Result<()> {
    let current = store.get_appointment(appointment_id)?;
    if status.blocks_slot() && !current.status().blocks_slot() {
        check_availability_except(
            store,
            &current.doctor_id,
            &current.room_id,
            current.scheduled_at,
            Some(appointment_id),
        )?;
    }
    store.get_appointment_mut(appointment_id)?.set_status(status);
    tracing::debug!(appointment_id, status = %status, "appointment status changed");
    Ok(())
}

/// `None` clears the notes
///
/// # Errors
/// * `AppointmentNotFound`
/// * `MultiLineNotes`
pub fn update_notes(
    store: &mut Store,
    appointment_id: &str,
    notes: Option<String>,
) -> Result<()> {
    store.get_appointment_mut(appointment_id)?.set_notes(notes)?;
    Ok(())
}

fn resolve<'a>(store: &'a Store, ids: &[String]) -> Result<Vec<&'a Appointment>> {
    ids.iter().map(|id| store.get_appointment(id)).collect()
}

/// # Errors
/// * `PatientNotFound`, or `AppointmentNotFound` for a dangling id
pub fn appointments_for_patient<'a>(store: &'a Store, patient_id: &str) -> Result<Vec<&'a Appointment>> {
    resolve(store, store.get_patient(patient_id)?.appointment_ids())
}

/// # Errors
/// * `DoctorNotFound`, or `AppointmentNotFound` for a dangling id
pub fn appointments_for_doctor<'a>(store: &'a Store, doctor_id: &str) -> Result<Vec<&'a Appointment>> {
    resolve(store, store.get_doctor(doctor_id)?.appointment_ids())
}

/// # Errors
/// * `RoomNotFound`, or `AppointmentNotFound` for a dangling id
pub fn appointments_for_room<'a>(store: &'a Store, room_id: &str) -> Result<Vec<&'a Appointment>> {
    resolve(store, store.get_room(room_id)?.appointment_ids())
}
