//! Usage: hospital department create|attach

use super::{CliResult, Session};
use clap::{Args, Subcommand};
use hospital_core::Specialty;
use hospital_engine::commands::registry::{department_attach, department_create};

#[derive(Debug, Args)]
pub struct DepartmentArgs {
    #[command(subcommand)]
    pub command: DepartmentCommand,
}

#[derive(Debug, Subcommand)]
pub enum DepartmentCommand {
    /// Create a department and print its id
    Create(CreateArgs),
    /// Attach a department to a hospital
    Attach(AttachArgs),
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,

    /// e.g. CARDIOLOGY, PEDIATRICS
    #[arg(long)]
    pub specialty: Specialty,

    /// Attach to this hospital right away
    #[arg(long)]
    pub hospital: Option<String>,
}

#[derive(Debug, Args)]
pub struct AttachArgs {
    #[arg(long)]
    pub hospital: String,

    #[arg(long)]
    pub department: String,
}

pub fn execute(args: DepartmentArgs, session: &mut Session) -> CliResult {
    match args.command {
        DepartmentCommand::Create(a) => {
            let id = department_create(
                &mut session.conn,
                &session.ctx,
                a.name,
                a.specialty,
                a.hospital,
            )?;
            println!("{}", id);
        }
        DepartmentCommand::Attach(a) => {
            department_attach(&mut session.conn, &session.ctx, &a.hospital, &a.department)?;
            println!("✓ Department {} attached to {}", a.department, a.hospital);
        }
    }
    Ok(())
}
