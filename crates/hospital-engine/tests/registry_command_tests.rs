// Integration tests for registry commands: hospitals, departments, doctors,
// patients, rooms and clinical histories, checked through a reopened database.

mod common;

use common::{cardiology_registry, clock, ctx, person, setup_db};
use hospital_core::errors::ExErrorKind;
use hospital_core::model::HistoryEntryKind;
use hospital_core::types::{RequestContext, TraceId};
use hospital_core::Specialty;
use hospital_engine::commands::history::history_record;
use hospital_engine::commands::registry::{
    department_attach, department_create, doctor_assign, doctor_register, hospital_create,
    hospital_list, patient_admit, patient_register, patient_show, room_create,
};
use hospital_store::repo::load_registry;

#[test]
fn test_registry_survives_reopen() {
    let (tmp, mut conn) = setup_db();
    let reg = cardiology_registry(&mut conn);
    drop(conn);

    let conn = hospital_store::db::open(tmp.path().join("registry.db")).unwrap();
    let store = load_registry(&conn).unwrap();

    let hospital = store.get_hospital(&reg.hospital_id).unwrap();
    assert_eq!(hospital.department_ids(), [reg.department_id.clone()]);
    assert_eq!(hospital.patient_ids(), [reg.patient_id.clone()]);

    let department = store.get_department(&reg.department_id).unwrap();
    assert_eq!(department.doctor_ids(), [reg.doctor_id.clone()]);
    assert_eq!(department.room_ids(), [reg.room_id.clone()]);

    let history = store.history_of(&reg.patient_id).unwrap();
    assert_eq!(history.patient_id, reg.patient_id);
}

#[test]
fn test_hospital_list_in_creation_order() {
    let (_tmp, mut conn) = setup_db();
    for name in ["North", "South", "East"] {
        hospital_create(&mut conn, &ctx(), name.to_string(), "Addr".to_string(), "1".to_string())
            .unwrap();
    }

    let names: Vec<String> = hospital_list(&conn, &ctx())
        .unwrap()
        .into_iter()
        .map(|h| h.name)
        .collect();
    assert_eq!(names, ["North", "South", "East"]);
}

#[test]
fn test_hospital_create_blank_name_rejected() {
    let (_tmp, mut conn) = setup_db();
    let err = hospital_create(&mut conn, &ctx(), " ".to_string(), "A".to_string(), "1".to_string())
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(err.op(), Some("hospital_create"));
    assert!(err.request_id().is_some());
    assert!(hospital_list(&conn, &ctx()).unwrap().is_empty());
}

#[test]
fn test_error_carries_request_and_trace_ids() {
    let (_tmp, mut conn) = setup_db();
    let traced = RequestContext::new().with_trace_id(TraceId::from("bulk-import-7".to_string()));
    let err = hospital_create(&mut conn, &traced, "".to_string(), "A".to_string(), "1".to_string())
        .unwrap_err();

    assert_eq!(err.trace_id().map(|t| t.as_str()), Some("bulk-import-7"));
    assert_eq!(err.request_id(), Some(&traced.request_id));

    let err = hospital_create(&mut conn, &ctx(), "".to_string(), "A".to_string(), "1".to_string())
        .unwrap_err();
    assert!(err.trace_id().is_none());
}

#[test]
fn test_department_attach_moves_between_hospitals() {
    let (_tmp, mut conn) = setup_db();
    let reg = cardiology_registry(&mut conn);
    let other = hospital_create(
        &mut conn,
        &ctx(),
        "Other".to_string(),
        "Elsewhere".to_string(),
        "2".to_string(),
    )
    .unwrap();

    department_attach(&mut conn, &ctx(), &other, &reg.department_id).unwrap();

    let store = load_registry(&conn).unwrap();
    assert!(store.get_hospital(&reg.hospital_id).unwrap().department_ids().is_empty());
    assert_eq!(
        store.get_hospital(&other).unwrap().department_ids(),
        [reg.department_id.clone()]
    );
    assert_eq!(
        store.get_department(&reg.department_id).unwrap().hospital_id.as_deref(),
        Some(other.as_str())
    );
}

#[test]
fn test_doctor_register_duplicate_dni() {
    let (_tmp, mut conn) = setup_db();
    cardiology_registry(&mut conn);

    let err = doctor_register(
        &mut conn,
        &ctx(),
        person("Copy", "20111222"),
        "MP-999".to_string(),
        Specialty::Cardiology,
        None,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::AlreadyExists);
}

#[test]
fn test_doctor_assign_specialty_mismatch_writes_nothing() {
    let (_tmp, mut conn) = setup_db();
    let reg = cardiology_registry(&mut conn);
    let pediatrician = doctor_register(
        &mut conn,
        &ctx(),
        person("Flor", "20333444"),
        "MP-2222".to_string(),
        Specialty::Pediatrics,
        None,
    )
    .unwrap();

    let err = doctor_assign(&mut conn, &ctx(), &reg.department_id, &pediatrician).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::SpecialtyMismatch);

    let store = load_registry(&conn).unwrap();
    assert_eq!(store.get_department(&reg.department_id).unwrap().doctor_ids().len(), 1);
    assert!(store.get_doctor(&pediatrician).unwrap().department_id.is_none());
}

#[test]
fn test_doctor_assign_moves_between_departments() {
    let (_tmp, mut conn) = setup_db();
    let reg = cardiology_registry(&mut conn);
    let second = department_create(
        &mut conn,
        &ctx(),
        "Cardiology II".to_string(),
        Specialty::Cardiology,
        None,
    )
    .unwrap();

    doctor_assign(&mut conn, &ctx(), &second, &reg.doctor_id).unwrap();

    let store = load_registry(&conn).unwrap();
    assert!(store.get_department(&reg.department_id).unwrap().doctor_ids().is_empty());
    assert_eq!(store.get_department(&second).unwrap().doctor_ids(), [reg.doctor_id.clone()]);
}

#[test]
fn test_patient_admit_moves_between_hospitals() {
    let (_tmp, mut conn) = setup_db();
    let reg = cardiology_registry(&mut conn);
    let other = hospital_create(
        &mut conn,
        &ctx(),
        "Other".to_string(),
        "Elsewhere".to_string(),
        "2".to_string(),
    )
    .unwrap();

    patient_admit(&mut conn, &ctx(), &other, &reg.patient_id).unwrap();
    // admitting twice is a no-op
    patient_admit(&mut conn, &ctx(), &other, &reg.patient_id).unwrap();

    let store = load_registry(&conn).unwrap();
    assert!(store.get_hospital(&reg.hospital_id).unwrap().patient_ids().is_empty());
    assert_eq!(store.get_hospital(&other).unwrap().patient_ids(), [reg.patient_id.clone()]);
}

#[test]
fn test_patient_register_invalid_dni() {
    let (_tmp, mut conn) = setup_db();
    let err = patient_register(
        &mut conn,
        &ctx(),
        person("Bad", "12ab"),
        "1".to_string(),
        "A".to_string(),
        None,
        &clock(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
}

#[test]
fn test_room_create_duplicate_number() {
    let (_tmp, mut conn) = setup_db();
    let reg = cardiology_registry(&mut conn);
    let err = room_create(
        &mut conn,
        &ctx(),
        &reg.department_id,
        "C-101".to_string(),
        "Other".to_string(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::AlreadyExists);
}

#[test]
fn test_room_create_unknown_department() {
    let (_tmp, mut conn) = setup_db();
    let err = room_create(&mut conn, &ctx(), "missing", "1".to_string(), "X".to_string())
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_history_record_persists_in_order() {
    let (_tmp, mut conn) = setup_db();
    let reg = cardiology_registry(&mut conn);

    assert!(history_record(
        &mut conn,
        &ctx(),
        &reg.patient_id,
        HistoryEntryKind::Diagnosis,
        "hypertension".to_string()
    )
    .unwrap());
    assert!(history_record(
        &mut conn,
        &ctx(),
        &reg.patient_id,
        HistoryEntryKind::Diagnosis,
        "arrhythmia".to_string()
    )
    .unwrap());
    assert!(!history_record(
        &mut conn,
        &ctx(),
        &reg.patient_id,
        HistoryEntryKind::Allergy,
        "   ".to_string()
    )
    .unwrap());

    let record = patient_show(&conn, &ctx(), &reg.patient_id).unwrap();
    assert_eq!(record.history.diagnoses(), ["hypertension", "arrhythmia"]);
    assert!(record.history.allergies().is_empty());
    assert!(record.appointments.is_empty());
}

#[test]
fn test_patient_show_unknown() {
    let (_tmp, conn) = setup_db();
    let err = patient_show(&conn, &ctx(), "nope").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.op(), Some("patient_show"));
}
