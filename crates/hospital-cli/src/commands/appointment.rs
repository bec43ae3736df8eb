//! Appointment commands
//!
//! Usage: hospital appointment schedule|status|notes|list|export|import

use super::{parse_at, CliResult, Session};
use chrono::NaiveDateTime;
use clap::{Args, Subcommand};
use hospital_core::codec::format_date_time;
use hospital_core::ops::ScheduleRequest;
use hospital_core::{AppointmentStatus, Money};
use hospital_engine::commands::appointment::{
    appointment_list, appointment_schedule, appointment_set_notes, appointment_set_status,
    appointments_export, appointments_import, AppointmentFilter,
};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct AppointmentArgs {
    #[command(subcommand)]
    pub command: AppointmentCommand,
}

#[derive(Debug, Subcommand)]
pub enum AppointmentCommand {
    /// Book an appointment and print its id
    Schedule(ScheduleArgs),
    /// Change the status of an appointment
    Status(StatusArgs),
    /// Replace or clear the notes of an appointment
    Notes(NotesArgs),
    /// List appointments, optionally for one patient, doctor or room
    List(ListArgs),
    /// Write every appointment to a CSV file
    Export(FileArgs),
    /// Load appointments from a CSV file; nothing is saved if a line fails
    Import(FileArgs),
}

#[derive(Debug, Args)]
pub struct ScheduleArgs {
    #[arg(long)]
    pub patient: String,

    #[arg(long)]
    pub doctor: String,

    #[arg(long)]
    pub room: String,

    /// YYYY-MM-DDTHH:MM, local time
    #[arg(long, value_parser = parse_at)]
    pub at: NaiveDateTime,

    /// Positive amount with up to two decimals
    #[arg(long)]
    pub cost: Money,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    pub appointment: String,

    /// SCHEDULED, IN_PROGRESS, COMPLETED, CANCELLED or NO_SHOW
    pub status: AppointmentStatus,
}

#[derive(Debug, Args)]
pub struct NotesArgs {
    pub appointment: String,

    /// New notes; omit to clear
    pub notes: Option<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long, conflicts_with_all = ["doctor", "room"])]
    pub patient: Option<String>,

    #[arg(long, conflicts_with = "room")]
    pub doctor: Option<String>,

    #[arg(long)]
    pub room: Option<String>,
}

#[derive(Debug, Args)]
pub struct FileArgs {
    pub path: PathBuf,
}

impl ListArgs {
    fn filter(self) -> AppointmentFilter {
        match (self.patient, self.doctor, self.room) {
            (Some(id), _, _) => AppointmentFilter::Patient(id),
            (_, Some(id), _) => AppointmentFilter::Doctor(id),
            (_, _, Some(id)) => AppointmentFilter::Room(id),
            _ => AppointmentFilter::All,
        }
    }
}

pub fn execute(args: AppointmentArgs, session: &mut Session) -> CliResult {
    match args.command {
        AppointmentCommand::Schedule(a) => {
            let request = ScheduleRequest {
                patient_id: a.patient,
                doctor_id: a.doctor,
                room_id: a.room,
                scheduled_at: a.at,
                cost: a.cost,
                notes: a.notes,
            };
            let id = appointment_schedule(&mut session.conn, &session.ctx, request, &session.clock)?;
            println!("{}", id);
        }
        AppointmentCommand::Status(a) => {
            appointment_set_status(&mut session.conn, &session.ctx, &a.appointment, a.status)?;
            println!("✓ Appointment {} is now {}", a.appointment, a.status);
        }
        AppointmentCommand::Notes(a) => {
            let cleared = a.notes.is_none();
            appointment_set_notes(&mut session.conn, &session.ctx, &a.appointment, a.notes)?;
            if cleared {
                println!("✓ Notes cleared");
            } else {
                println!("✓ Notes updated");
            }
        }
        AppointmentCommand::List(a) => {
            for appointment in appointment_list(&session.conn, &session.ctx, &a.filter())? {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    appointment.id,
                    format_date_time(appointment.scheduled_at),
                    appointment.status(),
                    appointment.cost,
                    appointment.notes()
                );
            }
        }
        AppointmentCommand::Export(a) => {
            let written = appointments_export(&session.conn, &session.ctx, &a.path)?;
            println!("✓ Exported {} appointments to {}", written, a.path.display());
        }
        AppointmentCommand::Import(a) => {
            let ids = appointments_import(&mut session.conn, &session.ctx, &a.path, &session.clock)?;
            println!("✓ Imported {} appointments", ids.len());
            for id in ids {
                println!("  {}", id);
            }
        }
    }
    Ok(())
}
