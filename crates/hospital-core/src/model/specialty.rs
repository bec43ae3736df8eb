use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::HospitalError;

/// Medical specialty shared by doctors and departments
///
/// Persisted by its upper-case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Specialty {
    Cardiology,
    Neurology,
    Pediatrics,
    Traumatology,
    Dermatology,
    Gynecology,
    Urology,
    Ophthalmology,
    Psychiatry,
    GeneralMedicine,
    Emergency,
    Oncology,
}

impl Specialty {
    pub const ALL: [Specialty; 12] = [
        Specialty::Cardiology,
        Specialty::Neurology,
        Specialty::Pediatrics,
        Specialty::Traumatology,
        Specialty::Dermatology,
        Specialty::Gynecology,
        Specialty::Urology,
        Specialty::Ophthalmology,
        Specialty::Psychiatry,
        Specialty::GeneralMedicine,
        Specialty::Emergency,
        Specialty::Oncology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Specialty::Cardiology => "CARDIOLOGY",
            Specialty::Neurology => "NEUROLOGY",
            Specialty::Pediatrics => "PEDIATRICS",
            Specialty::Traumatology => "TRAUMATOLOGY",
            Specialty::Dermatology => "DERMATOLOGY",
            Specialty::Gynecology => "GYNECOLOGY",
            Specialty::Urology => "UROLOGY",
            Specialty::Ophthalmology => "OPHTHALMOLOGY",
            Specialty::Psychiatry => "PSYCHIATRY",
            Specialty::GeneralMedicine => "GENERAL_MEDICINE",
            Specialty::Emergency => "EMERGENCY",
            Specialty::Oncology => "ONCOLOGY",
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Specialty {
    type Err = HospitalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        Specialty::ALL
            .into_iter()
            .find(|sp| sp.as_str() == wanted)
            .ok_or_else(|| HospitalError::UnknownVariant {
                kind: "specialty",
                value: s.to_string(),
            })
    }
}
