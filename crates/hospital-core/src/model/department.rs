use serde::{Deserialize, Serialize};

use super::{push_unique, require_text, Specialty};
use crate::errors::Result;

/// A hospital department of a single specialty
///
/// Doctors assigned here must share the specialty; rooms are created through
/// the department (`ops::department_ops::create_room`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub name: String,
    pub specialty: Specialty,
    pub hospital_id: Option<String>,
    pub(crate) doctor_ids: Vec<String>,
    pub(crate) room_ids: Vec<String>,
}

impl Department {
    /// # Errors
    /// * `BlankField` - name is blank
    pub fn new(id: String, name: impl Into<String>, specialty: Specialty) -> Result<Self> {
        Ok(Self {
            id,
            name: require_text(name, "department name")?,
            specialty,
            hospital_id: None,
            doctor_ids: Vec::new(),
            room_ids: Vec::new(),
        })
    }

    pub fn doctor_ids(&self) -> &[String] {
        &self.doctor_ids
    }

    pub fn room_ids(&self) -> &[String] {
        &self.room_ids
    }

    pub fn link_doctor(&mut self, doctor_id: &str) {
        push_unique(&mut self.doctor_ids, doctor_id);
    }

    pub fn link_room(&mut self, room_id: &str) {
        push_unique(&mut self.room_ids, room_id);
    }

    pub(crate) fn unlink_doctor(&mut self, doctor_id: &str) {
        self.doctor_ids.retain(|id| id != doctor_id);
    }
}
