//! Seed import
//!
//! 1. Parse and validate the YAML
//! 2. Skip if the digest is already recorded in `seed_imports`
//! 3. Build onto the current registry with the core operations
//! 4. Validate the result and persist it in one transaction

use crate::errors::{from_rusqlite, io_error, Result};
use crate::repo::{load_registry, SqliteRepo};
use crate::seed::format_v0::{SeedPerson, SeedV0};
use crate::seed::{compute_seed_digest, parse_seed_str};
use hospital_core::model::HistoryEntryKind;
use hospital_core::ops::{department_ops, history_ops, hospital_ops, person_ops};
use hospital_core::rules::validate_registry;
use hospital_core::{Clock, Person, Store};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

/// What an import did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedImportOutcome {
    pub digest: String,
    /// `false` when the same seed had been imported before
    pub imported: bool,
    pub hospitals: usize,
    pub doctors: usize,
    pub patients: usize,
}

/// # Errors
/// `Io` when the file cannot be read; otherwise as [`import_seed_str`].
pub fn import_seed(path: &Path, conn: &mut Connection, clock: &dyn Clock) -> Result<SeedImportOutcome> {
    let content = std::fs::read_to_string(path).map_err(|e| io_error("seed_read", e))?;
    import_seed_str(&content, &path.display().to_string(), conn, clock)
}

/// Import seed text; `source` is recorded alongside the digest
///
/// # Errors
/// `InvalidInput` for seed validation failures, the core error kinds when a
/// registry rule rejects the seed (for example a DNI already registered),
/// `Persistence` on SQLite failure. Nothing is written on error.
pub fn import_seed_str(
    content: &str,
    source: &str,
    conn: &mut Connection,
    clock: &dyn Clock,
) -> Result<SeedImportOutcome> {
    let seed = parse_seed_str(content)?;
    let digest = compute_seed_digest(&seed)?;

    let already: Option<String> = conn
        .query_row(
            "SELECT digest FROM seed_imports WHERE digest = ?1",
            [&digest],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;
    if already.is_some() {
        tracing::debug!(digest = %digest, "seed already imported");
        return Ok(SeedImportOutcome {
            digest,
            imported: false,
            hospitals: 0,
            doctors: 0,
            patients: 0,
        });
    }

    let mut store = load_registry(conn)?;
    let mut outcome = SeedImportOutcome {
        digest,
        imported: true,
        hospitals: 0,
        doctors: 0,
        patients: 0,
    };
    apply_seed(&seed, &mut store, clock, &mut outcome)?;
    validate_registry(&store)?;

    let tx = conn.transaction().map_err(from_rusqlite)?;
    SqliteRepo::persist_store(&tx, &store)?;
    tx.execute(
        "INSERT INTO seed_imports (digest, source, imported_at) VALUES (?1, ?2, ?3)",
        rusqlite::params![outcome.digest, source, clock.now().to_string()],
    )
    .map_err(from_rusqlite)?;
    tx.commit().map_err(from_rusqlite)?;

    tracing::debug!(
        digest = %outcome.digest,
        hospitals = outcome.hospitals,
        doctors = outcome.doctors,
        patients = outcome.patients,
        "seed imported"
    );
    Ok(outcome)
}

fn person(seed: &SeedPerson) -> hospital_core::Result<Person> {
    Person::new(
        seed.first_name.clone(),
        seed.last_name.clone(),
        &seed.dni,
        seed.birth_date,
        seed.blood_type,
    )
}

fn apply_seed(
    seed: &SeedV0,
    store: &mut Store,
    clock: &dyn Clock,
    outcome: &mut SeedImportOutcome,
) -> Result<()> {
    for hospital in &seed.hospitals {
        let hospital_id = hospital_ops::create_hospital(
            store,
            hospital.name.clone(),
            hospital.address.clone(),
            hospital.phone.clone(),
        )?;
        outcome.hospitals += 1;

        for department in &hospital.departments {
            let department_id =
                department_ops::create_department(store, department.name.clone(), department.specialty)?;
            hospital_ops::add_department(store, &hospital_id, &department_id)?;

            for room in &department.rooms {
                department_ops::create_room(
                    store,
                    &department_id,
                    room.number.clone(),
                    room.kind.clone(),
                )?;
            }

            for doctor in &department.doctors {
                let doctor_id = person_ops::register_doctor(
                    store,
                    person(&doctor.person)?,
                    &doctor.license,
                    doctor.specialty,
                )?;
                department_ops::add_doctor(store, &department_id, &doctor_id)?;
                outcome.doctors += 1;
            }
        }

        for patient in &hospital.patients {
            let patient_id = person_ops::register_patient(
                store,
                person(&patient.person)?,
                patient.phone.clone(),
                patient.address.clone(),
                clock,
            )?;
            hospital_ops::add_patient(store, &hospital_id, &patient_id)?;

            let entries = [
                (HistoryEntryKind::Diagnosis, &patient.history.diagnoses),
                (HistoryEntryKind::Treatment, &patient.history.treatments),
                (HistoryEntryKind::Allergy, &patient.history.allergies),
            ];
            for (kind, texts) in entries {
                for text in texts {
                    history_ops::record_entry(store, &patient_id, kind, text.clone())?;
                }
            }
            outcome.patients += 1;
        }
    }
    Ok(())
}
