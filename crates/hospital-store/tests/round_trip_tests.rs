#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::NaiveDate;
use hospital_core::model::HistoryEntryKind;
use hospital_core::ops::appointment_ops::update_status;
use hospital_core::ops::{
    department_ops, history_ops, hospital_ops, person_ops, schedule_appointment, ScheduleRequest,
};
use hospital_core::{AppointmentStatus, BloodType, FixedClock, Money, Person, Specialty, Store};
use hospital_store::db;
use hospital_store::repo::{load_registry, SqliteRepo};

fn clock() -> FixedClock {
    FixedClock(
        NaiveDate::from_ymd_opt(2030, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap(),
    )
}

fn person(first: &str, dni: &str) -> Person {
    Person::new(
        first,
        "Round",
        dni,
        NaiveDate::from_ymd_opt(1975, 4, 4).unwrap(),
        BloodType::BNegative,
    )
    .unwrap()
}

fn build_registry() -> Store {
    let mut store = Store::new();
    let h = hospital_ops::create_hospital(&mut store, "Central", "Street 1", "555").unwrap();
    let d1 = department_ops::create_department(&mut store, "Neuro", Specialty::Neurology).unwrap();
    let d2 = department_ops::create_department(&mut store, "Cardio", Specialty::Cardiology).unwrap();
    // Attach in reverse creation order to exercise list positions
    hospital_ops::add_department(&mut store, &h, &d2).unwrap();
    hospital_ops::add_department(&mut store, &h, &d1).unwrap();

    let room = department_ops::create_room(&mut store, &d1, "N-1", "Consult").unwrap();
    let doc = person_ops::register_doctor(&mut store, person("Doc", "20000001"), "MP-1111", Specialty::Neurology)
        .unwrap();
    department_ops::add_doctor(&mut store, &d1, &doc).unwrap();

    let p = person_ops::register_patient(&mut store, person("Pat", "30000001"), "555-1", "Street 2", &clock())
        .unwrap();
    hospital_ops::add_patient(&mut store, &h, &p).unwrap();
    history_ops::record_entry(&mut store, &p, HistoryEntryKind::Diagnosis, "migraine").unwrap();
    history_ops::record_entry(&mut store, &p, HistoryEntryKind::Treatment, "rest").unwrap();

    let request = ScheduleRequest {
        patient_id: p,
        doctor_id: doc,
        room_id: room,
        scheduled_at: NaiveDate::from_ymd_opt(2030, 3, 2)
            .unwrap()
            .and_hms_opt(10, 15, 30)
            .unwrap(),
        cost: "1200.75".parse::<Money>().unwrap(),
        notes: Some("first visit, bring scans".to_string()),
    };
    let a = schedule_appointment(&mut store, request, &clock()).unwrap();
    update_status(&mut store, &a, AppointmentStatus::Completed).unwrap();
    store
}

#[test]
fn test_persist_and_hydrate_preserves_registry() {
    let store = build_registry();
    let mut conn = db::open_in_memory().unwrap();
    let tx = conn.transaction().unwrap();
    SqliteRepo::persist_store(&tx, &store).unwrap();
    tx.commit().unwrap();

    let loaded = load_registry(&conn).unwrap();
    assert_eq!(loaded.list_hospitals(), store.list_hospitals());
    assert_eq!(loaded.list_departments(), store.list_departments());
    assert_eq!(loaded.list_rooms(), store.list_rooms());
    assert_eq!(loaded.list_doctors(), store.list_doctors());
    assert_eq!(loaded.list_patients(), store.list_patients());
    assert_eq!(loaded.list_histories(), store.list_histories());
    assert_eq!(loaded.list_appointments(), store.list_appointments());
}

#[test]
fn test_persist_is_upsert() {
    let mut store = build_registry();
    let conn = db::open_in_memory().unwrap();
    SqliteRepo::persist_store(&conn, &store).unwrap();

    let id = store.list_appointments()[0].id.clone();
    update_status(&mut store, &id, AppointmentStatus::NoShow).unwrap();
    SqliteRepo::persist_appointment(&conn, store.get_appointment(&id).unwrap()).unwrap();

    let loaded = load_registry(&conn).unwrap();
    assert_eq!(loaded.list_appointments().len(), 1);
    assert_eq!(
        loaded.get_appointment(&id).unwrap().status(),
        AppointmentStatus::NoShow
    );
}

#[test]
fn test_duplicate_dni_rejected_by_schema() {
    let store = build_registry();
    let conn = db::open_in_memory().unwrap();
    SqliteRepo::persist_store(&conn, &store).unwrap();

    let mut clone = store.list_doctors()[0].clone();
    clone.id = "another-id".to_string();
    clone.department_id = None;
    assert!(SqliteRepo::persist_doctor(&conn, &clone).is_err());
}

#[test]
fn test_file_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registry.db");
    {
        let conn = db::open(&path).unwrap();
        SqliteRepo::persist_store(&conn, &build_registry()).unwrap();
    }
    let conn = db::open(&path).unwrap();
    assert_eq!(load_registry(&conn).unwrap().list_patients().len(), 1);
}
