//! Hospital CLI
//!
//! Command-line interface for the hospital registry

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;

#[derive(Debug, Parser)]
#[command(name = "hospital")]
#[command(about = "Hospital registry - departments, staff, patients and appointments", long_about = None)]
struct Cli {
    /// Database file; overrides `database_path` from configuration
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the database and apply migrations
    Init,
    /// Seed import operations
    Seed(commands::seed::SeedArgs),
    /// Hospital operations
    Hospital(commands::hospital::HospitalArgs),
    /// Department operations
    Department(commands::department::DepartmentArgs),
    /// Doctor operations
    Doctor(commands::doctor::DoctorArgs),
    /// Patient operations
    Patient(commands::patient::PatientArgs),
    /// Room operations
    Room(commands::room::RoomArgs),
    /// Appointment operations, including CSV export and import
    Appointment(commands::appointment::AppointmentArgs),
    /// Clinical history operations
    History(commands::history::HistoryArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = config::Settings::load()?;
    hospital_core::logging_facility::init(settings.profile()?);

    let db_path = cli.db.unwrap_or(settings.database_path);
    let mut session = commands::Session::open(&db_path)?;
    tracing::debug!(db = %db_path.display(), request_id = %session.ctx.request_id, "session opened");

    match cli.command {
        Commands::Init => commands::init::execute(&session, &db_path),
        Commands::Seed(args) => commands::seed::execute(args, &mut session),
        Commands::Hospital(args) => commands::hospital::execute(args, &mut session),
        Commands::Department(args) => commands::department::execute(args, &mut session),
        Commands::Doctor(args) => commands::doctor::execute(args, &mut session),
        Commands::Patient(args) => commands::patient::execute(args, &mut session),
        Commands::Room(args) => commands::room::execute(args, &mut session),
        Commands::Appointment(args) => commands::appointment::execute(args, &mut session),
        Commands::History(args) => commands::history::execute(args, &mut session),
    }
}
