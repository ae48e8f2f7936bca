//! Command-line surface and configuration resolution.
//!
//! # Responsibility
//! - Declare subcommands for each planet use-case.
//! - Resolve DB path and logging settings from flags or environment.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const DEFAULT_DB_FILE_NAME: &str = "planets.sqlite3";

#[derive(Debug, Parser)]
#[command(name = "planet", version, about = "Planet catalog over SQLite")]
pub struct Cli {
    /// SQLite database file. Defaults to `<temp_dir>/planets.sqlite3`.
    #[arg(long, env = "PLANET_DB_PATH", global = true)]
    pub db: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long, env = "PLANET_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "PLANET_LOG_DIR", global = true)]
    pub log_dir: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a planet.
    Create(CreateArgs),
    /// Get a planet by id.
    Get { id: i64 },
    /// Get a planet by exact name.
    GetByName { name: String },
    /// List planets, optionally filtered by terrain and climate.
    List(ListArgs),
    /// Delete a planet by id.
    Remove { id: i64 },
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub climate: String,
    #[arg(long, default_value = "")]
    pub terrain: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub terrain: Option<String>,
    #[arg(long)]
    pub climate: Option<String>,
    /// Compare with case-sensitive equality instead of substring match.
    #[arg(long)]
    pub exact: bool,
}

impl Cli {
    pub fn db_path(&self) -> PathBuf {
        match &self.db {
            Some(path) if !path.as_os_str().is_empty() => path.clone(),
            _ => std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
        }
    }

    pub fn log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or(planet_core::default_log_level())
    }
}
