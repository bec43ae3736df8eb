use serde::{Deserialize, Serialize};

use super::{push_unique, require_text};
use crate::errors::Result;

/// A room belonging to exactly one department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub number: String,
    pub kind: String,
    pub department_id: String,
    pub(crate) appointment_ids: Vec<String>,
}

impl Room {
    /// # Errors
    /// * `BlankField` - number or kind is blank
    pub fn new(
        id: String,
        number: impl Into<String>,
        kind: impl Into<String>,
        department_id: String,
    ) -> Result<Self> {
        Ok(Self {
            id,
            number: require_text(number, "room number")?,
            kind: require_text(kind, "room kind")?,
            department_id,
            appointment_ids: Vec::new(),
        })
    }

    pub fn appointment_ids(&self) -> &[String] {
        &self.appointment_ids
    }

    pub fn link_appointment(&mut self, appointment_id: &str) {
        push_unique(&mut self.appointment_ids, appointment_id);
    }
}
