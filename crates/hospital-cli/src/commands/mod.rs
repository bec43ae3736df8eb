pub mod appointment;
pub mod department;
pub mod doctor;
pub mod hospital;
pub mod history;
pub mod init;
pub mod patient;
pub mod room;
pub mod seed;

use chrono::{NaiveDate, NaiveDateTime};
use clap::Args;
use hospital_core::codec::parse_date_time;
use hospital_core::types::RequestContext;
use hospital_core::{BloodType, SystemClock};
use hospital_engine::commands::registry::PersonInput;
use rusqlite::Connection;
use std::path::Path;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open connection plus the context shared by one invocation
pub struct Session {
    pub conn: Connection,
    pub ctx: RequestContext,
    pub clock: SystemClock,
}

impl Session {
    /// # Errors
    /// `Io` or `Persistence` when the database cannot be created or migrated.
    pub fn open(db_path: &Path) -> hospital_store::Result<Self> {
        Ok(Self {
            conn: hospital_store::db::open(db_path)?,
            ctx: RequestContext::new(),
            clock: SystemClock,
        })
    }
}

/// Identity flags shared by `doctor register` and `patient register`
#[derive(Debug, Args)]
pub struct PersonArgs {
    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    /// 7 or 8 digits
    #[arg(long)]
    pub dni: String,

    /// YYYY-MM-DD
    #[arg(long)]
    pub birth_date: NaiveDate,

    /// `O+`, `AB-`, or the stored name such as `A_POSITIVE`
    #[arg(long)]
    pub blood_type: BloodType,
}

impl From<PersonArgs> for PersonInput {
    fn from(args: PersonArgs) -> Self {
        PersonInput {
            first_name: args.first_name,
            last_name: args.last_name,
            dni: args.dni,
            birth_date: args.birth_date,
            blood_type: args.blood_type,
        }
    }
}

/// clap parser for `YYYY-MM-DDTHH:MM[:SS]`
pub fn parse_at(text: &str) -> Result<NaiveDateTime, String> {
    parse_date_time(text).map_err(|e| e.to_string())
}
