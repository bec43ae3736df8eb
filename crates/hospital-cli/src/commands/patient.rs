//! Usage: hospital patient register|admit|show

use super::{CliResult, PersonArgs, Session};
use clap::{Args, Subcommand};
use hospital_core::codec::format_date_time;
use hospital_core::model::HistoryEntryKind;
use hospital_engine::commands::registry::{patient_admit, patient_register, patient_show};

#[derive(Debug, Args)]
pub struct PatientArgs {
    #[command(subcommand)]
    pub command: PatientCommand,
}

#[derive(Debug, Subcommand)]
pub enum PatientCommand {
    /// Register a patient with an empty clinical history and print their id
    Register(RegisterArgs),
    /// Admit a patient to a hospital
    Admit(AdmitArgs),
    /// Show a patient, their clinical history and appointments
    Show(ShowArgs),
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[command(flatten)]
    pub person: PersonArgs,

    #[arg(long)]
    pub phone: String,

    #[arg(long)]
    pub address: String,

    /// Admit to this hospital right away
    #[arg(long)]
    pub hospital: Option<String>,
}

#[derive(Debug, Args)]
pub struct AdmitArgs {
    #[arg(long)]
    pub hospital: String,

    #[arg(long)]
    pub patient: String,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub patient: String,
}

pub fn execute(args: PatientArgs, session: &mut Session) -> CliResult {
    match args.command {
        PatientCommand::Register(a) => {
            let id = patient_register(
                &mut session.conn,
                &session.ctx,
                a.person.into(),
                a.phone,
                a.address,
                a.hospital,
                &session.clock,
            )?;
            println!("{}", id);
        }
        PatientCommand::Admit(a) => {
            patient_admit(&mut session.conn, &session.ctx, &a.hospital, &a.patient)?;
            println!("✓ Patient {} admitted to {}", a.patient, a.hospital);
        }
        PatientCommand::Show(a) => {
            let record = patient_show(&session.conn, &session.ctx, &a.patient)?;
            let person = &record.patient.person;
            println!("{} (DNI {})", person.full_name(), person.dni);
            println!("  age: {}  blood type: {}", person.age(), person.blood_type);
            println!("  phone: {}  address: {}", record.patient.phone, record.patient.address);
            println!("  history: {}", record.history.number);
            for kind in [
                HistoryEntryKind::Diagnosis,
                HistoryEntryKind::Treatment,
                HistoryEntryKind::Allergy,
            ] {
                for entry in record.history.entries(kind) {
                    println!("    {}: {}", kind, entry);
                }
            }
            println!("  appointments: {}", record.appointments.len());
            for appointment in &record.appointments {
                println!(
                    "    {}\t{}\t{}\t{}",
                    appointment.id,
                    format_date_time(appointment.scheduled_at),
                    appointment.status(),
                    appointment.cost
                );
            }
        }
    }
    Ok(())
}
