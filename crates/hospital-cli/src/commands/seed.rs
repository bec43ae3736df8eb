//! Seed import command
//!
//! Usage: hospital seed import <PATH>

use super::{CliResult, Session};
use clap::{Args, Subcommand};
use hospital_engine::commands::seed::seed_import;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SeedArgs {
    #[command(subcommand)]
    pub command: SeedCommand,
}

#[derive(Debug, Subcommand)]
pub enum SeedCommand {
    /// Import a seed file, or every `.yaml`/`.yml` file of a directory
    Import(ImportArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to seed YAML file or directory
    pub path: PathBuf,
}

pub fn execute(args: SeedArgs, session: &mut Session) -> CliResult {
    match args.command {
        SeedCommand::Import(import_args) => execute_import(import_args, session),
    }
}

fn execute_import(args: ImportArgs, session: &mut Session) -> CliResult {
    let seed_files = if args.path.is_dir() {
        // sorted for determinism
        let mut files: Vec<PathBuf> = std::fs::read_dir(&args.path)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
            .collect();
        files.sort();
        files
    } else {
        vec![args.path]
    };

    for seed_file in seed_files {
        println!("Importing {}...", seed_file.display());
        let outcome = seed_import(&mut session.conn, &session.ctx, &seed_file, &session.clock)?;
        if outcome.imported {
            println!(
                "✓ Imported {} hospitals, {} doctors, {} patients (digest: {})",
                outcome.hospitals, outcome.doctors, outcome.patients, outcome.digest
            );
        } else {
            println!("✓ Already imported (digest: {})", outcome.digest);
        }
    }
    Ok(())
}
