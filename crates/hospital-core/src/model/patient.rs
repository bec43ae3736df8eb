use serde::{Deserialize, Serialize};

use super::{push_unique, require_text, Person};
use crate::errors::Result;

/// A patient; always owns exactly one clinical history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    #[serde(flatten)]
    pub person: Person,
    pub phone: String,
    pub address: String,
    pub hospital_id: Option<String>,
    pub history_id: String,
    pub(crate) appointment_ids: Vec<String>,
}

impl Patient {
    /// # Errors
    /// * `BlankField` - phone or address is blank
    pub fn new(
        id: String,
        person: Person,
        phone: impl Into<String>,
        address: impl Into<String>,
        history_id: String,
    ) -> Result<Self> {
        Ok(Self {
            id,
            person,
            phone: require_text(phone, "phone")?,
            address: require_text(address, "address")?,
            hospital_id: None,
            history_id,
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
