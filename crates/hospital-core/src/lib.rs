//! Hospital Core - in-memory registry kernel
//!
//! This crate owns the hospital domain and every rule that does not need a
//! database:
//! - Hospital, department, doctor, patient, room, clinical history and
//!   appointment models with constructor validation
//! - Registry operations that keep both sides of every relationship in sync
//! - Appointment scheduling with availability checks
//! - The appointment CSV line format
//! - Registry integrity validation
//! - The error and logging facilities shared by the other crates

pub mod clock;
pub mod codec;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod rules;

pub use hospital_core_types as types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{ExError, ExErrorKind, HospitalError, Result};
pub use model::{
    Appointment, AppointmentStatus, BloodType, ClinicalHistory, Department, Dni, Doctor,
    Hospital, LicenseNumber, Money, Patient, Person, Room, Specialty,
};
pub use ops::Store;
