// Integration tests for appointment commands: scheduling rules through the
// database, status and notes updates, listing filters and CSV round trips.

mod common;

use common::{at, cardiology_registry, clock, ctx, person, setup_db, Registry};
use hospital_core::errors::ExErrorKind;
use hospital_core::logging_facility::init_test_capture;
use hospital_core::ops::ScheduleRequest;
use hospital_core::types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use hospital_core::{AppointmentStatus, Money, Specialty};
use hospital_engine::commands::appointment::{
    appointment_list, appointment_schedule, appointment_set_notes, appointment_set_status,
    appointments_export, appointments_import, AppointmentFilter,
};
use hospital_engine::commands::registry::{patient_register, patient_show, room_create};
use hospital_store::repo::load_registry;

fn request(reg: &Registry, hour: u32) -> ScheduleRequest {
    ScheduleRequest {
        patient_id: reg.patient_id.clone(),
        doctor_id: reg.doctor_id.clone(),
        room_id: reg.room_id.clone(),
        scheduled_at: at(2030, 3, 10, hour),
        cost: Money::from_cents(150_000),
        notes: Some("first visit".to_string()),
    }
}

#[test]
fn test_schedule_persists_and_links() {
    let (_tmp, mut conn) = setup_db();
    let reg = cardiology_registry(&mut conn);

    let id = appointment_schedule(&mut conn, &ctx(), request(&reg, 10), &clock()).unwrap();

    let store = load_registry(&conn).unwrap();
    let appointment = store.get_appointment(&id).unwrap();
    assert_eq!(appointment.status(), AppointmentStatus::Scheduled);
    assert_eq!(appointment.notes(), "first visit");
    assert_eq!(appointment.cost, Money::from_cents(150_000));
    assert_eq!(store.get_patient(&reg.patient_id).unwrap().appointment_ids(), [id.clone()]);
    assert_eq!(store.get_doctor(&reg.doctor_id).unwrap().appointment_ids(), [id.clone()]);
    assert_eq!(store.get_room(&reg.room_id).unwrap().appointment_ids(), [id]);
}

#[test]
fn test_schedule_conflict_within_window() {
    let (_tmp, mut conn) = setup_db();
    let reg = cardiology_registry(&mut conn);
    appointment_schedule(&mut conn, &ctx(), request(&reg, 10), &clock()).unwrap();

    let err = appointment_schedule(&mut conn, &ctx(), request(&reg, 11), &clock()).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::SchedulingConflict);
    assert_eq!(err.op(), Some("appointment_schedule"));

    // exactly two hours later is free
    appointment_schedule(&mut conn, &ctx(), request(&reg, 12), &clock()).unwrap();
    assert_eq!(
        appointment_list(&conn, &ctx(), &AppointmentFilter::All).unwrap().len(),
        2
    );
}

#[test]
fn test_cancelled_appointment_frees_the_slot() {
    let (_tmp, mut conn) = setup_db();
    let reg = cardiology_registry(&mut conn);
    let first = appointment_schedule(&mut conn, &ctx(), request(&reg, 10), &clock()).unwrap();

    appointment_set_status(&mut conn, &ctx(), &first, AppointmentStatus::Cancelled).unwrap();
    appointment_schedule(&mut conn, &ctx(), request(&reg, 10), &clock()).unwrap();
}

#[test]
fn test_schedule_in_the_past_rejected() {
    let (_tmp, mut conn) = setup_db();
    let reg = cardiology_registry(&mut conn);
    let mut past = request(&reg, 10);
    past.scheduled_at = at(2030, 2, 1, 10);

    let err = appointment_schedule(&mut conn, &ctx(), past, &clock()).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::PastDate);
    assert!(appointment_list(&conn, &ctx(), &AppointmentFilter::All).unwrap().is_empty());
}

#[test]
fn test_schedule_zero_cost_rejected() {
    let (_tmp, mut conn) = setup_db();
    let reg = cardiology_registry(&mut conn);
    let mut free = request(&reg, 10);
    free.cost = Money::ZERO;

    let err = appointment_schedule(&mut conn, &ctx(), free, &clock()).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidCost);
}

#[test]
fn test_set_notes_and_clear() {
    let (_tmp, mut conn) = setup_db();
    let reg = cardiology_registry(&mut conn);
    let id = appointment_schedule(&mut conn, &ctx(), request(&reg, 10), &clock()).unwrap();

    appointment_set_notes(&mut conn, &ctx(), &id, Some("fasting".to_string())).unwrap();
    let listed = appointment_list(&conn, &ctx(), &AppointmentFilter::Patient(reg.patient_id.clone()))
        .unwrap();
    assert_eq!(listed[0].notes(), "fasting");

    appointment_set_notes(&mut conn, &ctx(), &id, None).unwrap();
    let record = patient_show(&conn, &ctx(), &reg.patient_id).unwrap();
    assert_eq!(record.appointments[0].notes(), "");
}

#[test]
fn test_set_status_unknown_appointment() {
    let (_tmp, mut conn) = setup_db();
    let err = appointment_set_status(&mut conn, &ctx(), "missing", AppointmentStatus::Completed)
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_list_filters() {
    let (_tmp, mut conn) = setup_db();
    let reg = cardiology_registry(&mut conn);
    let second_room = room_create(
        &mut conn,
        &ctx(),
        &reg.department_id,
        "C-102".to_string(),
        "Echo lab".to_string(),
    )
    .unwrap();
    let other_patient = patient_register(
        &mut conn,
        &ctx(),
        person("Bruno", "4555666"),
        "555-0123".to_string(),
        "Calle 40".to_string(),
        None,
        &clock(),
    )
    .unwrap();

    appointment_schedule(&mut conn, &ctx(), request(&reg, 10), &clock()).unwrap();
    let mut other = request(&reg, 14);
    other.patient_id = other_patient.clone();
    other.room_id = second_room.clone();
    appointment_schedule(&mut conn, &ctx(), other, &clock()).unwrap();

    let count = |filter: AppointmentFilter| appointment_list(&conn, &ctx(), &filter).unwrap().len();
    assert_eq!(count(AppointmentFilter::All), 2);
    assert_eq!(count(AppointmentFilter::Doctor(reg.doctor_id.clone())), 2);
    assert_eq!(count(AppointmentFilter::Patient(other_patient)), 1);
    assert_eq!(count(AppointmentFilter::Room(second_room)), 1);

    let err = appointment_list(&conn, &ctx(), &AppointmentFilter::Room("nope".to_string()))
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_export_then_import_into_fresh_registry() {
    let (tmp, mut conn) = setup_db();
    let reg = cardiology_registry(&mut conn);
    appointment_schedule(&mut conn, &ctx(), request(&reg, 10), &clock()).unwrap();
    appointment_schedule(&mut conn, &ctx(), request(&reg, 13), &clock()).unwrap();

    let csv_path = tmp.path().join("appointments.csv");
    let written = appointments_export(&conn, &ctx(), &csv_path).unwrap();
    assert_eq!(written, 2);
    let text = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(text.starts_with("30111222,20111222,C-101,2030-03-10T10:00,1500.00,SCHEDULED,"));

    let (_tmp2, mut fresh) = setup_db();
    cardiology_registry(&mut fresh);
    let ids = appointments_import(&mut fresh, &ctx(), &csv_path, &clock()).unwrap();
    assert_eq!(ids.len(), 2);

    let listed = appointment_list(&fresh, &ctx(), &AppointmentFilter::All).unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].scheduled_at, at(2030, 3, 10, 10));
    assert_eq!(listed[1].notes(), "first visit");
}

#[test]
fn test_import_is_all_or_nothing() {
    let (tmp, mut conn) = setup_db();
    cardiology_registry(&mut conn);
    let csv_path = tmp.path().join("bad.csv");
    std::fs::write(
        &csv_path,
        "30111222,20111222,C-101,2030-03-10T10:00,100.00,SCHEDULED,ok\n\
         99999999,20111222,C-101,2030-03-11T10:00,100.00,SCHEDULED,unknown patient\n",
    )
    .unwrap();

    let err = appointments_import(&mut conn, &ctx(), &csv_path, &clock()).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert!(appointment_list(&conn, &ctx(), &AppointmentFilter::All).unwrap().is_empty());
}

#[test]
fn test_import_missing_file() {
    let (tmp, mut conn) = setup_db();
    let err = appointments_import(&mut conn, &ctx(), &tmp.path().join("none.csv"), &clock())
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Io);
}

#[test]
fn test_import_rejects_specialty_mismatch() {
    let (tmp, mut conn) = setup_db();
    cardiology_registry(&mut conn);
    hospital_engine::commands::registry::doctor_register(
        &mut conn,
        &ctx(),
        person("Flor", "20333444"),
        "MP-2222".to_string(),
        Specialty::Pediatrics,
        None,
    )
    .unwrap();
    let csv_path = tmp.path().join("mismatch.csv");
    std::fs::write(
        &csv_path,
        "30111222,20333444,C-101,2030-03-10T10:00,100.00,SCHEDULED,\n",
    )
    .unwrap();

    let err = appointments_import(&mut conn, &ctx(), &csv_path, &clock()).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::SpecialtyMismatch);
}

#[test]
fn test_schedule_emits_boundary_events() {
    let capture = init_test_capture();
    let (_tmp, mut conn) = setup_db();
    let reg = cardiology_registry(&mut conn);

    let ok_ctx = ctx();
    appointment_schedule(&mut conn, &ok_ctx, request(&reg, 10), &clock()).unwrap();
    let fail_ctx = ctx();
    appointment_schedule(&mut conn, &fail_ctx, request(&reg, 10), &clock()).unwrap_err();

    let for_request = |request_id: String, event: &str| {
        capture.count_events(|e| {
            e.op.as_deref() == Some("appointment_schedule")
                && e.event.as_deref() == Some(event)
                && e.field("request_id") == Some(request_id.as_str())
        })
    };
    assert_eq!(for_request(ok_ctx.request_id.to_string(), EVENT_START), 1);
    assert_eq!(for_request(ok_ctx.request_id.to_string(), EVENT_END), 1);
    assert_eq!(for_request(fail_ctx.request_id.to_string(), EVENT_END_ERROR), 1);
    assert_eq!(for_request(fail_ctx.request_id.to_string(), EVENT_END), 0);
}

#[test]
fn test_patient_register_logs_masked_dni() {
    let capture = init_test_capture();
    let (_tmp, mut conn) = setup_db();
    let request_ctx = ctx();

    patient_register(
        &mut conn,
        &request_ctx,
        person("Lia", "31222333"),
        "555-0177".to_string(),
        "Calle 1".to_string(),
        None,
        &clock(),
    )
    .unwrap();

    let request_id = request_ctx.request_id.to_string();
    let events: Vec<_> = capture
        .events_for_op("patient_register")
        .into_iter()
        .filter(|e| e.field("request_id") == Some(request_id.as_str()))
        .collect();
    assert!(!events.is_empty());
    for event in &events {
        for value in event.fields.values() {
            assert!(!value.contains("31222333"));
            assert!(!value.contains("555-0177"));
        }
    }
    assert_eq!(events[0].field("dni"), Some("*****333"));
}

#[test]
fn test_short_invalid_dni_is_not_logged_whole() {
    let capture = init_test_capture();
    let (_tmp, mut conn) = setup_db();
    let request_ctx = ctx();

    let err = patient_register(
        &mut conn,
        &request_ctx,
        person("Lia", "123"),
        "555-0177".to_string(),
        "Calle 1".to_string(),
        None,
        &clock(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);

    let request_id = request_ctx.request_id.to_string();
    let start = capture
        .events_for_op("patient_register")
        .into_iter()
        .find(|e| {
            e.field("request_id") == Some(request_id.as_str())
                && e.event.as_deref() == Some(EVENT_START)
        })
        .unwrap();
    assert_eq!(start.field("dni"), Some("*23"));
}
