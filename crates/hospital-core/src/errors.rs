use chrono::NaiveDateTime;
use hospital_core_types::{RequestId, TraceId};
use thiserror::Error;

use crate::model::Specialty;

/// Result type alias using HospitalError
pub type Result<T> = std::result::Result<T, HospitalError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every error surfaced by the store, engine or CLI carries one of these
/// kinds. The `code()` string is stable and is what scripts and tests match
/// on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidInput,
    MissingField,
    NotFound,
    AlreadyExists,

    // Scheduling
    SpecialtyMismatch,
    PastDate,
    InvalidCost,
    SchedulingConflict,

    // Appointment files
    InvalidCsv,

    // Registry integrity
    IntegrityViolation,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    Config,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::SpecialtyMismatch => "ERR_SPECIALTY_MISMATCH",
            ExErrorKind::PastDate => "ERR_PAST_DATE",
            ExErrorKind::InvalidCost => "ERR_INVALID_COST",
            ExErrorKind::SchedulingConflict => "ERR_SCHEDULING_CONFLICT",
            ExErrorKind::InvalidCsv => "ERR_INVALID_CSV",
            ExErrorKind::IntegrityViolation => "ERR_INTEGRITY_VIOLATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Classification fields for programmatic handling plus context for the
/// operator reading stderr.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
}

impl ExError {
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (registry id, DNI or room number)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity: {})", entity_id)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain errors raised by registry, scheduling and CSV operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HospitalError {
    // ===== Validation =====
    /// A required text field was empty or whitespace-only
    #[error("{field} must not be blank")]
    BlankField { field: &'static str },

    /// DNI is not 7 or 8 digits
    #[error("DNI must have 7 or 8 digits, got '{value}'")]
    InvalidDni { value: String },

    /// License number is not `MP-` followed by 4 to 6 digits
    #[error("License number must match MP-NNNN..MP-NNNNNN, got '{value}'")]
    InvalidLicense { value: String },

    /// Amount could not be parsed as money with two decimal places
    #[error("Invalid amount '{value}': {reason}")]
    InvalidMoney { value: String, reason: String },

    /// Unknown enum name (specialty, blood type, status)
    #[error("Unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    /// Builder was missing a required field
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// Appointment notes must fit on one CSV line
    #[error("Notes must not contain line breaks")]
    MultiLineNotes,

    // ===== Lookup =====
    #[error("Hospital not found: {hospital_id}")]
    HospitalNotFound { hospital_id: String },

    #[error("Department not found: {department_id}")]
    DepartmentNotFound { department_id: String },

    #[error("Doctor not found: {doctor_id}")]
    DoctorNotFound { doctor_id: String },

    #[error("Patient not found: {patient_id}")]
    PatientNotFound { patient_id: String },

    #[error("Room not found: {room_id}")]
    RoomNotFound { room_id: String },

    #[error("Appointment not found: {appointment_id}")]
    AppointmentNotFound { appointment_id: String },

    #[error("Clinical history not found: {history_id}")]
    HistoryNotFound { history_id: String },

    /// CSV row references a patient DNI that is not registered
    #[error("Patient not found for DNI: {dni}")]
    UnknownPatientDni { dni: String },

    /// CSV row references a doctor DNI that is not registered
    #[error("Doctor not found for DNI: {dni}")]
    UnknownDoctorDni { dni: String },

    /// CSV row references a room number that does not exist
    #[error("Room not found for number: {number}")]
    UnknownRoomNumber { number: String },

    // ===== Uniqueness =====
    #[error("A {role} with DNI {dni} is already registered")]
    DuplicateDni { role: &'static str, dni: String },

    #[error("Room number {number} already exists")]
    DuplicateRoomNumber { number: String },

    // ===== Scheduling =====
    /// Doctor specialty differs from the department (or room's department)
    #[error("Doctor specialty {doctor} does not match department specialty {department}")]
    SpecialtyMismatch {
        doctor: Specialty,
        department: Specialty,
    },

    #[error("Cannot schedule an appointment in the past: {scheduled_at}")]
    PastAppointment { scheduled_at: NaiveDateTime },

    #[error("Cost must be greater than zero, got {cost}")]
    NonPositiveCost { cost: String },

    #[error("Doctor {doctor_id} already has an appointment near {scheduled_at}")]
    DoctorUnavailable {
        doctor_id: String,
        scheduled_at: NaiveDateTime,
    },

    #[error("Room {room_id} is already booked near {scheduled_at}")]
    RoomUnavailable {
        room_id: String,
        scheduled_at: NaiveDateTime,
    },

    // ===== Appointment CSV =====
    #[error("Invalid CSV format for appointment: {reason}")]
    InvalidCsv { reason: String },

    // ===== Integrity =====
    #[error("Registry integrity violation: {reason}")]
    IntegrityViolation { reason: String },
}

impl HospitalError {
    /// Canonical kind for this domain error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            HospitalError::BlankField { .. }
            | HospitalError::InvalidDni { .. }
            | HospitalError::InvalidLicense { .. }
            | HospitalError::UnknownVariant { .. }
            | HospitalError::MultiLineNotes => ExErrorKind::InvalidInput,
            HospitalError::InvalidMoney { .. } | HospitalError::NonPositiveCost { .. } => {
                ExErrorKind::InvalidCost
            }
            HospitalError::MissingField { .. } => ExErrorKind::MissingField,
            HospitalError::HospitalNotFound { .. }
            | HospitalError::DepartmentNotFound { .. }
            | HospitalError::DoctorNotFound { .. }
            | HospitalError::PatientNotFound { .. }
            | HospitalError::RoomNotFound { .. }
            | HospitalError::AppointmentNotFound { .. }
            | HospitalError::HistoryNotFound { .. }
            | HospitalError::UnknownPatientDni { .. }
            | HospitalError::UnknownDoctorDni { .. }
            | HospitalError::UnknownRoomNumber { .. } => ExErrorKind::NotFound,
            HospitalError::DuplicateDni { .. } | HospitalError::DuplicateRoomNumber { .. } => {
                ExErrorKind::AlreadyExists
            }
            HospitalError::SpecialtyMismatch { .. } => ExErrorKind::SpecialtyMismatch,
            HospitalError::PastAppointment { .. } => ExErrorKind::PastDate,
            HospitalError::DoctorUnavailable { .. } | HospitalError::RoomUnavailable { .. } => {
                ExErrorKind::SchedulingConflict
            }
            HospitalError::InvalidCsv { .. } => ExErrorKind::InvalidCsv,
            HospitalError::IntegrityViolation { .. } => ExErrorKind::IntegrityViolation,
        }
    }

    /// Entity the error is about, when there is one
    fn entity(&self) -> Option<&str> {
        match self {
            HospitalError::HospitalNotFound { hospital_id } => Some(hospital_id.as_str()),
            HospitalError::DepartmentNotFound { department_id } => Some(department_id.as_str()),
            HospitalError::DoctorNotFound { doctor_id }
            | HospitalError::DoctorUnavailable { doctor_id, .. } => Some(doctor_id.as_str()),
            HospitalError::PatientNotFound { patient_id } => Some(patient_id.as_str()),
            HospitalError::RoomNotFound { room_id }
            | HospitalError::RoomUnavailable { room_id, .. } => Some(room_id.as_str()),
            HospitalError::AppointmentNotFound { appointment_id } => Some(appointment_id.as_str()),
            HospitalError::HistoryNotFound { history_id } => Some(history_id.as_str()),
            HospitalError::UnknownPatientDni { dni }
            | HospitalError::UnknownDoctorDni { dni }
            | HospitalError::DuplicateDni { dni, .. } => Some(dni.as_str()),
            HospitalError::UnknownRoomNumber { number }
            | HospitalError::DuplicateRoomNumber { number } => Some(number.as_str()),
            _ => None,
        }
    }
}

impl From<HospitalError> for ExError {
    fn from(err: HospitalError) -> Self {
        let mut ex = ExError::new(err.kind()).with_message(err.to_string());
        if let Some(entity) = err.entity() {
            ex = ex.with_entity_id(entity.to_string());
        }
        ex
    }
}
