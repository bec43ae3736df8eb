use chrono::NaiveDate;
use hospital_core::{BloodType, Specialty};
use serde::{Deserialize, Serialize};

/// Root of a seed file
///
/// ```yaml
/// schema_version: 0
/// hospitals:
///   - name: Central
///     address: Av. Rivadavia 1200
///     phone: "555-0100"
///     departments:
///       - name: Cardiology
///         specialty: CARDIOLOGY
///         rooms:
///           - { number: C-101, kind: Consult }
///         doctors:
///           - first_name: Rene
///             last_name: Favaloro
///             dni: "20111222"
///             birth_date: 1960-07-12
///             blood_type: O+
///             license: MP-12345
///             specialty: CARDIOLOGY
///     patients:
///       - first_name: Ana
///         last_name: Diaz
///         dni: "30111222"
///         birth_date: 1990-02-01
///         blood_type: A-
///         phone: "555-0199"
///         address: Calle 12
///         history:
///           allergies: [penicillin]
/// ```

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedV0 {
    pub schema_version: u32,
    #[serde(default)]
    pub hospitals: Vec<SeedHospital>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedHospital {
    pub name: String,
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub departments: Vec<SeedDepartment>,
    #[serde(default)]
    pub patients: Vec<SeedPatient>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedDepartment {
    pub name: String,
    pub specialty: Specialty,
    #[serde(default)]
    pub rooms: Vec<SeedRoom>,
    #[serde(default)]
    pub doctors: Vec<SeedDoctor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedRoom {
    pub number: String,
    pub kind: String,
}

/// Identity fields shared by doctors and patients; flattened into both, so
/// unknown keys are not rejected at this level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedPerson {
    pub first_name: String,
    pub last_name: String,
    pub dni: String,
    pub birth_date: NaiveDate,
    pub blood_type: BloodType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedDoctor {
    #[serde(flatten)]
    pub person: SeedPerson,
    pub license: String,
    pub specialty: Specialty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedPatient {
    #[serde(flatten)]
    pub person: SeedPerson,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub history: SeedHistory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedHistory {
    #[serde(default)]
    pub diagnoses: Vec<String>,
    #[serde(default)]
    pub treatments: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
}
