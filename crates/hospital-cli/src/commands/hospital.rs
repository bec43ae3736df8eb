//! Usage: hospital hospital create|list

use super::{CliResult, Session};
use clap::{Args, Subcommand};
use hospital_engine::commands::registry::{hospital_create, hospital_list};

#[derive(Debug, Args)]
pub struct HospitalArgs {
    #[command(subcommand)]
    pub command: HospitalCommand,
}

#[derive(Debug, Subcommand)]
pub enum HospitalCommand {
    /// Create a hospital and print its id
    Create(CreateArgs),
    /// List hospitals
    List,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub address: String,

    #[arg(long)]
    pub phone: String,
}

pub fn execute(args: HospitalArgs, session: &mut Session) -> CliResult {
    match args.command {
        HospitalCommand::Create(a) => {
            let id = hospital_create(&mut session.conn, &session.ctx, a.name, a.address, a.phone)?;
            println!("{}", id);
        }
        HospitalCommand::List => {
            for hospital in hospital_list(&session.conn, &session.ctx)? {
                println!(
                    "{}\t{}\t{}\t{}\tdepartments={}\tpatients={}",
                    hospital.id,
                    hospital.name,
                    hospital.address,
                    hospital.phone,
                    hospital.department_ids().len(),
                    hospital.patient_ids().len()
                );
            }
        }
    }
    Ok(())
}
