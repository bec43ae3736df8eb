use serde::{Deserialize, Serialize};
use std::fmt;

use super::{push_unique, Person, Specialty};
use crate::errors::{HospitalError, Result};

/// Professional license number: `MP-` followed by 4 to 6 digits
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LicenseNumber(String);

impl LicenseNumber {
    pub fn parse(value: &str) -> Result<Self> {
        let valid = value
            .strip_prefix("MP-")
            .map(|digits| {
                (4..=6).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
            })
            .unwrap_or(false);
        if !valid {
            return Err(HospitalError::InvalidLicense {
                value: value.to_string(),
            });
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LicenseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LicenseNumber {
    type Error = HospitalError;

    fn try_from(value: String) -> Result<Self> {
        LicenseNumber::parse(&value)
    }
}

impl From<LicenseNumber> for String {
    fn from(license: LicenseNumber) -> Self {
        license.0
    }
}

/// A licensed doctor, optionally assigned to a department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    #[serde(flatten)]
    pub person: Person,
    pub license: LicenseNumber,
    pub specialty: Specialty,
    pub department_id: Option<String>,
    pub(crate) appointment_ids: Vec<String>,
}

impl Doctor {
    /// # Errors
    /// * `InvalidLicense` - license does not match `MP-NNNN`..`MP-NNNNNN`
    pub fn new(id: String, person: Person, license: &str, specialty: Specialty) -> Result<Self> {
        Ok(Self {
            id,
            person,
            license: LicenseNumber::parse(license)?,
            specialty,
            department_id: None,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BloodType;
    use chrono::NaiveDate;

    #[test]
    fn test_license_format() {
        assert!(LicenseNumber::parse("MP-1234").is_ok());
        assert!(LicenseNumber::parse("MP-123456").is_ok());
        assert!(LicenseNumber::parse("MP-123").is_err());
        assert!(LicenseNumber::parse("MP-1234567").is_err());
        assert!(LicenseNumber::parse("MN-1234").is_err());
        assert!(LicenseNumber::parse("MP-12a4").is_err());
    }

    #[test]
    fn test_new_doctor_has_no_department() {
        let person = Person::new(
            "Luis",
            "Pérez",
            "20111222",
            NaiveDate::from_ymd_opt(1975, 3, 3).unwrap(),
            BloodType::APositive,
        )
        .unwrap();
        let doc = Doctor::new("doc1".into(), person, "MP-55555", Specialty::Neurology).unwrap();
        assert!(doc.department_id.is_none());
        assert!(doc.appointment_ids().is_empty());
        assert_eq!(doc.license.as_str(), "MP-55555");
    }
}
