//! CLI settings
//!
//! Sources, later ones winning:
//! 1. Built-in defaults
//! 2. `hospital.toml` in the working directory, if present
//! 3. `HOSPITAL_*` environment variables (a `.env` file is loaded first)
//!
//! `--db` on the command line overrides `database_path` after loading.

use config::{Config, ConfigError, Environment, File};
use hospital_core::logging_facility::Profile;
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_DATABASE_PATH: &str = ".hospital/registry.db";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// SQLite file. Env: `HOSPITAL_DATABASE_PATH`.
    pub database_path: PathBuf,

    /// `development` or `production`. Env: `HOSPITAL_LOG_PROFILE`.
    pub log_profile: String,
}

impl Settings {
    /// # Errors
    /// `ConfigError` when a source is malformed or a value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        // a missing .env is fine
        let _ = dotenvy::dotenv();

        Config::builder()
            .set_default("database_path", DEFAULT_DATABASE_PATH)?
            .set_default("log_profile", "development")?
            .add_source(File::with_name("hospital").required(false))
            .add_source(Environment::with_prefix("HOSPITAL"))
            .build()?
            .try_deserialize()
    }

    /// # Errors
    /// A message naming the unknown profile.
    pub fn profile(&self) -> Result<Profile, String> {
        self.log_profile.parse()
    }
}
