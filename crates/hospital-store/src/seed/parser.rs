//! Seed parsing and validation

use crate::errors::{seed_validation, Result};
use crate::seed::format_v0::SeedV0;
use hospital_core::{Dni, LicenseNumber};
use std::collections::HashSet;

/// # Errors
/// `InvalidInput` for YAML errors and for the checks in [`validate_seed`].
pub fn parse_seed_str(content: &str) -> Result<SeedV0> {
    let seed: SeedV0 = serde_yaml::from_str(content)
        .map_err(|e| seed_validation(&format!("YAML parse error: {}", e)))?;
    validate_seed(&seed)?;
    Ok(seed)
}

/// Checks that need the whole seed: schema version, DNI and license format,
/// DNI uniqueness per role, room number uniqueness, and doctors matching
/// their department's specialty
///
/// # Errors
/// `InvalidInput` naming the first problem found.
pub fn validate_seed(seed: &SeedV0) -> Result<()> {
    if seed.schema_version != 0 {
        return Err(seed_validation(&format!(
            "Unsupported schema_version: {}. Expected 0",
            seed.schema_version
        )));
    }

    let mut doctor_dnis = HashSet::new();
    let mut patient_dnis = HashSet::new();
    let mut room_numbers = HashSet::new();

    for hospital in &seed.hospitals {
        for department in &hospital.departments {
            for room in &department.rooms {
                if !room_numbers.insert(room.number.as_str()) {
                    return Err(seed_validation(&format!(
                        "Duplicate room number {}",
                        room.number
                    )));
                }
            }

            for doctor in &department.doctors {
                let dni = &doctor.person.dni;
                Dni::parse(dni).map_err(|e| seed_validation(&e.to_string()))?;
                LicenseNumber::parse(&doctor.license)
                    .map_err(|e| seed_validation(&e.to_string()))?;
                if !doctor_dnis.insert(dni.as_str()) {
                    return Err(seed_validation(&format!("Duplicate doctor DNI {}", dni)));
                }
                if doctor.specialty != department.specialty {
                    return Err(seed_validation(&format!(
                        "Doctor {} is {} but department '{}' is {}",
                        dni, doctor.specialty, department.name, department.specialty
                    )));
                }
            }
        }

        for patient in &hospital.patients {
            let dni = &patient.person.dni;
            Dni::parse(dni).map_err(|e| seed_validation(&e.to_string()))?;
            if !patient_dnis.insert(dni.as_str()) {
                return Err(seed_validation(&format!("Duplicate patient DNI {}", dni)));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "schema_version: 0\nhospitals: []\n";

    #[test]
    fn test_minimal_seed() {
        let seed = parse_seed_str(MINIMAL).unwrap();
        assert!(seed.hospitals.is_empty());
    }

    #[test]
    fn test_wrong_schema_version() {
        let err = parse_seed_str("schema_version: 2\n").unwrap_err();
        assert!(err.message().contains("schema_version"));
    }

    #[test]
    fn test_unknown_top_level_key() {
        assert!(parse_seed_str("schema_version: 0\nclinics: []\n").is_err());
    }

    #[test]
    fn test_doctor_in_wrong_department() {
        let yaml = r#"
schema_version: 0
hospitals:
  - name: H
    address: A
    phone: "1"
    departments:
      - name: Peds
        specialty: PEDIATRICS
        doctors:
          - first_name: X
            last_name: Y
            dni: "1234567"
            birth_date: 1970-01-01
            blood_type: O+
            license: MP-1234
            specialty: ONCOLOGY
"#;
        let err = parse_seed_str(yaml).unwrap_err();
        assert!(err.message().contains("ONCOLOGY"));
    }

    #[test]
    fn test_duplicate_room_numbers_across_hospitals() {
        let yaml = r#"
schema_version: 0
hospitals:
  - name: H1
    address: A
    phone: "1"
    departments:
      - { name: D, specialty: UROLOGY, rooms: [{ number: "1", kind: K }] }
  - name: H2
    address: B
    phone: "2"
    departments:
      - { name: D, specialty: UROLOGY, rooms: [{ number: "1", kind: K }] }
"#;
        let err = parse_seed_str(yaml).unwrap_err();
        assert!(err.message().contains("Duplicate room number"));
    }
}
