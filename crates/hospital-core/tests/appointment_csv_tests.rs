#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{at, cardiology_fixture, clock};
use hospital_core::codec::{export_csv, from_csv_line, import_csv, to_csv_line};
use hospital_core::ops::appointment_ops::{update_notes, update_status};
use hospital_core::ops::{department_ops, schedule_appointment, ScheduleRequest};
use hospital_core::rules::validate_registry;
use hospital_core::{AppointmentStatus, ExErrorKind, HospitalError, Money, Specialty};

#[test]
fn test_to_csv_line_layout() {
    let mut fx = cardiology_fixture();
    let req = ScheduleRequest {
        patient_id: fx.patient_id.clone(),
        doctor_id: fx.doctor_id.clone(),
        room_id: fx.room_id.clone(),
        scheduled_at: at(2030, 4, 5, 14, 30),
        cost: "1500.5".parse::<Money>().unwrap(),
        notes: Some("bring ECG, fasting".to_string()),
    };
    let id = schedule_appointment(&mut fx.store, req, &clock()).unwrap();
    update_status(&mut fx.store, &id, AppointmentStatus::InProgress).unwrap();

    let line = to_csv_line(fx.store.get_appointment(&id).unwrap(), &fx.store).unwrap();
    assert_eq!(
        line,
        "30111222,20111222,C-101,2030-04-05T14:30,1500.50,IN_PROGRESS,bring ECG; fasting"
    );
}

#[test]
fn test_from_csv_line_restores_fields() {
    let fx = cardiology_fixture();
    let a = from_csv_line(
        "30111222,20111222,C-101,2030-04-05T14:30,99.90,COMPLETED,call back; next week",
        &fx.store,
        &clock(),
    )
    .unwrap();

    assert_eq!(a.patient_id, fx.patient_id);
    assert_eq!(a.doctor_id, fx.doctor_id);
    assert_eq!(a.room_id, fx.room_id);
    assert_eq!(a.scheduled_at, at(2030, 4, 5, 14, 30));
    assert_eq!(a.cost.cents(), 9990);
    assert_eq!(a.status(), AppointmentStatus::Completed);
    assert_eq!(a.notes(), "call back, next week");
}

#[test]
fn test_empty_trailing_notes_accepted() {
    let fx = cardiology_fixture();
    let a = from_csv_line(
        "30111222,20111222,C-101,2030-04-05T14:30,10,SCHEDULED,",
        &fx.store,
        &clock(),
    )
    .unwrap();
    assert_eq!(a.notes(), "");
}

#[test]
fn test_unknown_keys_are_named() {
    let fx = cardiology_fixture();
    let err = from_csv_line(
        "99999999,20111222,C-101,2030-04-05T14:30,10,SCHEDULED,",
        &fx.store,
        &clock(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        HospitalError::UnknownPatientDni {
            dni: "99999999".to_string()
        }
    );

    let err = from_csv_line(
        "30111222,20111222,Z-9,2030-04-05T14:30,10,SCHEDULED,",
        &fx.store,
        &clock(),
    )
    .unwrap_err();
    assert!(matches!(err, HospitalError::UnknownRoomNumber { .. }));
}

#[test]
fn test_import_rules_match_scheduling() {
    let mut fx = cardiology_fixture();
    let neuro =
        department_ops::create_department(&mut fx.store, "Neuro", Specialty::Neurology).unwrap();
    department_ops::create_room(&mut fx.store, &neuro, "N-1", "Consult").unwrap();

    let past = "30111222,20111222,C-101,2020-01-01T10:00,10,SCHEDULED,";
    let free = "30111222,20111222,C-101,2030-04-05T14:30,0,SCHEDULED,";
    let mismatch = "30111222,20111222,N-1,2030-04-05T14:30,10,SCHEDULED,";

    assert!(matches!(
        from_csv_line(past, &fx.store, &clock()).unwrap_err(),
        HospitalError::PastAppointment { .. }
    ));
    assert!(matches!(
        from_csv_line(free, &fx.store, &clock()).unwrap_err(),
        HospitalError::NonPositiveCost { .. }
    ));
    assert!(matches!(
        from_csv_line(mismatch, &fx.store, &clock()).unwrap_err(),
        HospitalError::SpecialtyMismatch { .. }
    ));
}

#[test]
fn test_import_skips_blank_lines_and_links() {
    let mut fx = cardiology_fixture();
    let text = "\n30111222,20111222,C-101,2030-04-05T14:30,10,SCHEDULED,\n\n\
                30111222,20111222,C-101,2030-04-05T15:00,10,SCHEDULED,overlap ok\n";

    let ids = import_csv(text, &mut fx.store, &clock()).unwrap();
    assert_eq!(ids.len(), 2);
    assert_eq!(
        fx.store.get_doctor(&fx.doctor_id).unwrap().appointment_ids(),
        ids.as_slice()
    );
    validate_registry(&fx.store).unwrap();
}

#[test]
fn test_import_is_all_or_nothing() {
    let mut fx = cardiology_fixture();
    let text = "30111222,20111222,C-101,2030-04-05T14:30,10,SCHEDULED,\n\
                30111222,20111222,C-101,not-a-date,10,SCHEDULED,\n";

    let err = import_csv(text, &mut fx.store, &clock()).unwrap_err();
    match err {
        HospitalError::InvalidCsv { reason } => assert!(reason.starts_with("line 2")),
        other => panic!("unexpected error {other:?}"),
    }
    assert!(fx.store.list_appointments().is_empty());
}

#[test]
fn test_export_then_import_into_fresh_copy() {
    let mut fx = cardiology_fixture();
    let blank = fx.store.clone();
    let req = ScheduleRequest {
        patient_id: fx.patient_id.clone(),
        doctor_id: fx.doctor_id.clone(),
        room_id: fx.room_id.clone(),
        scheduled_at: at(2030, 4, 5, 14, 30),
        cost: Money::from_cents(2500),
        notes: Some("first visit".to_string()),
    };
    schedule_appointment(&mut fx.store, req, &clock()).unwrap();

    let text = export_csv(&fx.store).unwrap();
    let mut copy = blank;
    import_csv(&text, &mut copy, &clock()).unwrap();
    assert_eq!(export_csv(&copy).unwrap(), text);
}

#[test]
fn test_multi_line_notes_never_reach_the_export() {
    let mut fx = cardiology_fixture();
    let blank = fx.store.clone();
    let mut req = ScheduleRequest {
        patient_id: fx.patient_id.clone(),
        doctor_id: fx.doctor_id.clone(),
        room_id: fx.room_id.clone(),
        scheduled_at: at(2030, 4, 5, 14, 30),
        cost: Money::from_cents(2500),
        notes: Some("line1\nline2".to_string()),
    };
    let err = schedule_appointment(&mut fx.store, req.clone(), &clock()).unwrap_err();
    assert_eq!(err, HospitalError::MultiLineNotes);
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert!(fx.store.list_appointments().is_empty());

    req.notes = Some("line1, line2".to_string());
    let id = schedule_appointment(&mut fx.store, req, &clock()).unwrap();
    let err = update_notes(&mut fx.store, &id, Some("a\rb".to_string())).unwrap_err();
    assert_eq!(err, HospitalError::MultiLineNotes);

    let text = export_csv(&fx.store).unwrap();
    assert_eq!(text.lines().count(), 1);
    let mut copy = blank;
    import_csv(&text, &mut copy, &clock()).unwrap();
    assert_eq!(copy.list_appointments()[0].notes(), "line1, line2");
}
