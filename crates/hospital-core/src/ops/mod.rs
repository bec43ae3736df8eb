pub mod appointment_ops;
pub mod department_ops;
pub mod history_ops;
pub mod hospital_ops;
pub mod person_ops;
pub mod store;

pub use appointment_ops::{schedule_appointment, ScheduleRequest};
pub use store::Store;
