//! Canonical schema constants for structured logging
//!
//! Every lifecycle event emitted by the engine uses these keys so that log
//! consumers can filter on stable names.

pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Registry entities
pub const FIELD_HOSPITAL_ID: &str = "hospital_id";
pub const FIELD_DEPARTMENT_ID: &str = "department_id";
pub const FIELD_DOCTOR_ID: &str = "doctor_id";
pub const FIELD_PATIENT_ID: &str = "patient_id";
pub const FIELD_ROOM_ID: &str = "room_id";
pub const FIELD_APPOINTMENT_ID: &str = "appointment_id";

// Bulk operations
pub const FIELD_ROW_COUNT: &str = "row_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_entity_fields_end_with_id() {
        for field in [
            FIELD_HOSPITAL_ID,
            FIELD_DEPARTMENT_ID,
            FIELD_DOCTOR_ID,
            FIELD_PATIENT_ID,
            FIELD_ROOM_ID,
            FIELD_APPOINTMENT_ID,
        ] {
            assert!(field.ends_with("_id"), "{field}");
        }
    }
}
