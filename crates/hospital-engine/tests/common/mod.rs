#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use hospital_core::types::RequestContext;
use hospital_core::{BloodType, FixedClock, Specialty};
use hospital_engine::commands::registry::{
    department_create, doctor_register, hospital_create, patient_register, room_create,
    PersonInput,
};
use rusqlite::Connection;
use tempfile::TempDir;

pub fn now() -> NaiveDateTime {
    at(2030, 3, 1, 9)
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

pub fn clock() -> FixedClock {
    FixedClock(now())
}

pub fn ctx() -> RequestContext {
    RequestContext::new()
}

pub fn setup_db() -> (TempDir, Connection) {
    let temp_dir = TempDir::new().unwrap();
    let conn = hospital_store::db::open(temp_dir.path().join("registry.db")).unwrap();
    (temp_dir, conn)
}

pub fn person(first_name: &str, dni: &str) -> PersonInput {
    PersonInput {
        first_name: first_name.to_string(),
        last_name: "Tester".to_string(),
        dni: dni.to_string(),
        birth_date: NaiveDate::from_ymd_opt(1980, 6, 15).unwrap(),
        blood_type: BloodType::OPositive,
    }
}

pub struct Registry {
    pub hospital_id: String,
    pub department_id: String,
    pub room_id: String,
    pub doctor_id: String,
    pub patient_id: String,
}

/// One hospital with a cardiology department, room C-101, doctor DNI
/// 20111222 and patient DNI 30111222
pub fn cardiology_registry(conn: &mut Connection) -> Registry {
    let hospital_id = hospital_create(
        conn,
        &ctx(),
        "Hospital Central".to_string(),
        "Av. Rivadavia 1200".to_string(),
        "555-0100".to_string(),
    )
    .unwrap();
    let department_id = department_create(
        conn,
        &ctx(),
        "Cardiology".to_string(),
        Specialty::Cardiology,
        Some(hospital_id.clone()),
    )
    .unwrap();
    let room_id = room_create(
        conn,
        &ctx(),
        &department_id,
        "C-101".to_string(),
        "Consult".to_string(),
    )
    .unwrap();
    let doctor_id = doctor_register(
        conn,
        &ctx(),
        person("Rene", "20111222"),
        "MP-12345".to_string(),
        Specialty::Cardiology,
        Some(department_id.clone()),
    )
    .unwrap();
    let patient_id = patient_register(
        conn,
        &ctx(),
        person("Ana", "30111222"),
        "555-0199".to_string(),
        "Calle 12".to_string(),
        Some(hospital_id.clone()),
        &clock(),
    )
    .unwrap();

    Registry {
        hospital_id,
        department_id,
        room_id,
        doctor_id,
        patient_id,
    }
}
