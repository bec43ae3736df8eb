//! Usage: hospital room create

use super::{CliResult, Session};
use clap::{Args, Subcommand};
use hospital_engine::commands::registry::room_create;

#[derive(Debug, Args)]
pub struct RoomArgs {
    #[command(subcommand)]
    pub command: RoomCommand,
}

#[derive(Debug, Subcommand)]
pub enum RoomCommand {
    /// Create a room in a department and print its id
    Create(CreateArgs),
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub department: String,

    /// Unique across the registry
    #[arg(long)]
    pub number: String,

    #[arg(long)]
    pub kind: String,
}

pub fn execute(args: RoomArgs, session: &mut Session) -> CliResult {
    match args.command {
        RoomCommand::Create(a) => {
            let id = room_create(&mut session.conn, &session.ctx, &a.department, a.number, a.kind)?;
            println!("{}", id);
        }
    }
    Ok(())
}
