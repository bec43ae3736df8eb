//! Usage: hospital history add --patient <ID> --kind <KIND> <TEXT>

use super::{CliResult, Session};
use clap::{Args, Subcommand, ValueEnum};
use hospital_core::model::HistoryEntryKind;
use hospital_engine::commands::history::history_record;

#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: HistoryCommand,
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// Append an entry to a patient's clinical history
    Add(AddArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EntryKind {
    Diagnosis,
    Treatment,
    Allergy,
}

impl From<EntryKind> for HistoryEntryKind {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Diagnosis => HistoryEntryKind::Diagnosis,
            EntryKind::Treatment => HistoryEntryKind::Treatment,
            EntryKind::Allergy => HistoryEntryKind::Allergy,
        }
    }
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub patient: String,

    #[arg(long, value_enum)]
    pub kind: EntryKind,

    pub text: String,
}

pub fn execute(args: HistoryArgs, session: &mut Session) -> CliResult {
    match args.command {
        HistoryCommand::Add(a) => {
            let recorded = history_record(
                &mut session.conn,
                &session.ctx,
                &a.patient,
                a.kind.into(),
                a.text,
            )?;
            if recorded {
                println!("✓ Recorded");
            } else {
                println!("Nothing recorded: entry text is blank");
            }
        }
    }
    Ok(())
}
