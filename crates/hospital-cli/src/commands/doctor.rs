//! Usage: hospital doctor register|assign

use super::{CliResult, PersonArgs, Session};
use clap::{Args, Subcommand};
use hospital_core::Specialty;
use hospital_engine::commands::registry::{doctor_assign, doctor_register};

#[derive(Debug, Args)]
pub struct DoctorArgs {
    #[command(subcommand)]
    pub command: DoctorCommand,
}

#[derive(Debug, Subcommand)]
pub enum DoctorCommand {
    /// Register a doctor and print their id
    Register(RegisterArgs),
    /// Assign a doctor to a department of the same specialty
    Assign(AssignArgs),
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[command(flatten)]
    pub person: PersonArgs,

    /// Medical license, e.g. MP-12345
    #[arg(long)]
    pub license: String,

    #[arg(long)]
    pub specialty: Specialty,

    /// Assign to this department right away
    #[arg(long)]
    pub department: Option<String>,
}

#[derive(Debug, Args)]
pub struct AssignArgs {
    #[arg(long)]
    pub department: String,

    #[arg(long)]
    pub doctor: String,
}

pub fn execute(args: DoctorArgs, session: &mut Session) -> CliResult {
    match args.command {
        DoctorCommand::Register(a) => {
            let id = doctor_register(
                &mut session.conn,
                &session.ctx,
                a.person.into(),
                a.license,
                a.specialty,
                a.department,
            )?;
            println!("{}", id);
        }
        DoctorCommand::Assign(a) => {
            doctor_assign(&mut session.conn, &session.ctx, &a.department, &a.doctor)?;
            println!("✓ Doctor {} assigned to {}", a.doctor, a.department);
        }
    }
    Ok(())
}
