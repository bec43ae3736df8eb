use chrono::{NaiveDate, NaiveDateTime};
use hospital_core::ops::{department_ops, hospital_ops, person_ops};
use hospital_core::{BloodType, FixedClock, Person, Specialty, Store};

/// "Now" for every test: 2030-03-01 09:00
#[allow(dead_code)]
pub fn now() -> NaiveDateTime {
    at(2030, 3, 1, 9, 0)
}

#[allow(dead_code)]
pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

#[allow(dead_code)]
pub fn clock() -> FixedClock {
    FixedClock(now())
}

#[allow(dead_code)]
pub fn person(first: &str, dni: &str) -> Person {
    Person::new(
        first,
        "Tester",
        dni,
        NaiveDate::from_ymd_opt(1980, 7, 15).unwrap(),
        BloodType::OPositive,
    )
    .unwrap()
}

/// A hospital with one cardiology department, room `C-101`, one
/// cardiologist (DNI 20111222) and one admitted patient (DNI 30111222)
#[allow(dead_code)]
pub struct Fixture {
    pub store: Store,
    pub hospital_id: String,
    pub department_id: String,
    pub room_id: String,
    pub doctor_id: String,
    pub patient_id: String,
}

#[allow(dead_code)]
pub fn cardiology_fixture() -> Fixture {
    let mut store = Store::new();
    let clock = clock();

    let hospital_id =
        hospital_ops::create_hospital(&mut store, "Central", "Av. Siempre Viva 742", "555-0100")
            .unwrap();
    let department_id =
        department_ops::create_department(&mut store, "Cardiology", Specialty::Cardiology).unwrap();
    hospital_ops::add_department(&mut store, &hospital_id, &department_id).unwrap();

    let room_id = department_ops::create_room(&mut store, &department_id, "C-101", "Consult")
        .unwrap();

    let doctor_id = person_ops::register_doctor(
        &mut store,
        person("Rene", "20111222"),
        "MP-12345",
        Specialty::Cardiology,
    )
    .unwrap();
    department_ops::add_doctor(&mut store, &department_id, &doctor_id).unwrap();

    let patient_id = person_ops::register_patient(
        &mut store,
        person("Ana", "30111222"),
        "555-0199",
        "Calle 12",
        &clock,
    )
    .unwrap();
    hospital_ops::add_patient(&mut store, &hospital_id, &patient_id).unwrap();

    Fixture {
        store,
        hospital_id,
        department_id,
        room_id,
        doctor_id,
        patient_id,
    }
}
