use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::require_text;
use crate::errors::{HospitalError, Result};

/// National identity document number: 7 or 8 ASCII digits
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Dni(String);

impl Dni {
    pub fn parse(value: &str) -> Result<Self> {
        let digits_only = value.chars().all(|c| c.is_ascii_digit());
        if !digits_only || !(7..=8).contains(&value.len()) {
            return Err(HospitalError::InvalidDni {
                value: value.to_string(),
            });
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Dni {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Dni {
    type Error = HospitalError;

    fn try_from(value: String) -> Result<Self> {
        Dni::parse(&value)
    }
}

impl From<Dni> for String {
    fn from(dni: Dni) -> Self {
        dni.0
    }
}

/// ABO/Rh blood group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BloodType {
    #[serde(alias = "A+")]
    APositive,
    #[serde(alias = "A-")]
    ANegative,
    #[serde(alias = "B+")]
    BPositive,
    #[serde(alias = "B-")]
    BNegative,
    #[serde(alias = "AB+")]
    AbPositive,
    #[serde(alias = "AB-")]
    AbNegative,
    #[serde(alias = "O+")]
    OPositive,
    #[serde(alias = "O-")]
    ONegative,
}

impl BloodType {
    const ALL: [BloodType; 8] = [
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::OPositive,
        BloodType::ONegative,
    ];

    /// Persisted name
    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::APositive => "A_POSITIVE",
            BloodType::ANegative => "A_NEGATIVE",
            BloodType::BPositive => "B_POSITIVE",
            BloodType::BNegative => "B_NEGATIVE",
            BloodType::AbPositive => "AB_POSITIVE",
            BloodType::AbNegative => "AB_NEGATIVE",
            BloodType::OPositive => "O_POSITIVE",
            BloodType::ONegative => "O_NEGATIVE",
        }
    }

    /// Clinical notation, e.g. `AB-`
    pub fn symbol(&self) -> &'static str {
        match self {
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::AbPositive => "AB+",
            BloodType::AbNegative => "AB-",
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for BloodType {
    type Err = HospitalError;

    /// Accepts either the persisted name or the clinical symbol
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_uppercase();
        BloodType::ALL
            .into_iter()
            .find(|bt| bt.as_str() == wanted || bt.symbol() == wanted)
            .ok_or_else(|| HospitalError::UnknownVariant {
                kind: "blood type",
                value: s.to_string(),
            })
    }
}

/// Identity data shared by doctors and patients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub dni: Dni,
    pub birth_date: NaiveDate,
    pub blood_type: BloodType,
}

impl Person {
    /// Build a validated person
    ///
    /// # Errors
    /// * `BlankField` - first or last name is blank
    /// * `InvalidDni` - DNI is not 7 or 8 digits
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        dni: &str,
        birth_date: NaiveDate,
        blood_type: BloodType,
    ) -> Result<Self> {
        Ok(Self {
            first_name: require_text(first_name, "first name")?,
            last_name: require_text(last_name, "last name")?,
            dni: Dni::parse(dni)?,
            birth_date,
            blood_type,
        })
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Age as the difference of calendar years (birthdays are not considered)
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        today.year() - self.birth_date.year()
    }

    pub fn age(&self) -> i32 {
        self.age_on(chrono::Local::now().date_naive())
    }
}
