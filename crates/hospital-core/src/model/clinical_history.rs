use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Dni;

/// Which list of a clinical history an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryEntryKind {
    Diagnosis,
    Treatment,
    Allergy,
}

impl fmt::Display for HistoryEntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HistoryEntryKind::Diagnosis => "diagnosis",
            HistoryEntryKind::Treatment => "treatment",
            HistoryEntryKind::Allergy => "allergy",
        })
    }
}

/// Clinical history of one patient
///
/// The history number is derived once at creation: `HC-{dni}-{year}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalHistory {
    pub id: String,
    pub number: String,
    pub patient_id: String,
    pub created_at: NaiveDateTime,
    diagnoses: Vec<String>,
    treatments: Vec<String>,
    allergies: Vec<String>,
}

impl ClinicalHistory {
    pub fn new(id: String, patient_id: String, dni: &Dni, created_at: NaiveDateTime) -> Self {
        Self {
            id,
            number: Self::number_for(dni, created_at),
            patient_id,
            created_at,
            diagnoses: Vec::new(),
            treatments: Vec::new(),
            allergies: Vec::new(),
        }
    }

    /// Canonical history number for a DNI and creation instant
    pub fn number_for(dni: &Dni, created_at: NaiveDateTime) -> String {
        format!("HC-{}-{}", dni, created_at.year())
    }

    /// Append an entry; blank text is ignored
    ///
    /// Returns whether the entry was recorded.
    pub fn add_entry(&mut self, kind: HistoryEntryKind, text: impl Into<String>) -> bool {
        let text = text.into();
        if text.trim().is_empty() {
            return false;
        }
        self.entries_mut(kind).push(text);
        true
    }

    pub fn add_diagnosis(&mut self, text: impl Into<String>) -> bool {
        self.add_entry(HistoryEntryKind::Diagnosis, text)
    }

    pub fn add_treatment(&mut self, text: impl Into<String>) -> bool {
        self.add_entry(HistoryEntryKind::Treatment, text)
    }

    pub fn add_allergy(&mut self, text: impl Into<String>) -> bool {
        self.add_entry(HistoryEntryKind::Allergy, text)
    }

    pub fn entries(&self, kind: HistoryEntryKind) -> &[String] {
        match kind {
            HistoryEntryKind::Diagnosis => &self.diagnoses,
            HistoryEntryKind::Treatment => &self.treatments,
            HistoryEntryKind::Allergy => &self.allergies,
        }
    }

    pub fn diagnoses(&self) -> &[String] {
        &self.diagnoses
    }

    pub fn treatments(&self) -> &[String] {
        &self.treatments
    }

    pub fn allergies(&self) -> &[String] {
        &self.allergies
    }

    fn entries_mut(&mut self, kind: HistoryEntryKind) -> &mut Vec<String> {
        match kind {
            HistoryEntryKind::Diagnosis => &mut self.diagnoses,
            HistoryEntryKind::Treatment => &mut self.treatments,
            HistoryEntryKind::Allergy => &mut self.allergies,
        }
    }
}
