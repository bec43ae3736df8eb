use serde::{Deserialize, Serialize};

use super::{push_unique, require_text};
use crate::errors::Result;

/// A hospital owning departments and admitted patients
///
/// Membership lists are kept in insertion order and only change through
/// `ops::hospital_ops`, which also updates the other side of the link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub(crate) department_ids: Vec<String>,
    pub(crate) patient_ids: Vec<String>,
}

impl Hospital {
    /// # Errors
    /// * `BlankField` - name, address or phone is blank
    pub fn new(
        id: String,
        name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            id,
            name: require_text(name, "hospital name")?,
            address: require_text(address, "address")?,
            phone: require_text(phone, "phone")?,
            department_ids: Vec::new(),
            patient_ids: Vec::new(),
        })
    }

    pub fn department_ids(&self) -> &[String] {
        &self.department_ids
    }

    pub fn patient_ids(&self) -> &[String] {
        &self.patient_ids
    }

    /// Record a department id (no-op when already listed). Used by hydration.
    pub fn link_department(&mut self, department_id: &str) {
        push_unique(&mut self.department_ids, department_id);
    }

    /// Record a patient id (no-op when already listed). Used by hydration.
    pub fn link_patient(&mut self, patient_id: &str) {
        push_unique(&mut self.patient_ids, patient_id);
    }

    pub(crate) fn unlink_department(&mut self, department_id: &str) {
        self.department_ids.retain(|id| id != department_id);
    }

    pub(crate) fn unlink_patient(&mut self, patient_id: &str) {
        self.patient_ids.retain(|id| id != patient_id);
    }
}
