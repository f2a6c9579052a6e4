//! Runtime settings shared by every subcommand.

use catalog_core::db::{open_db, open_db_in_memory};
use catalog_core::{default_log_level, init_logging};
use clap::Args;
use rusqlite::Connection;
use std::path::PathBuf;

/// Level used when logs would land on the same stderr as command errors.
const STDERR_DEFAULT_LOG_LEVEL: &str = "warn";

/// Storage settings.
#[derive(Debug, Args)]
pub(crate) struct DatabaseConfig {
    /// SQLite database file
    #[arg(long = "db", env = "CATALOG_DB_PATH", global = true)]
    pub(crate) db_path: Option<PathBuf>,

    /// Use a throwaway in-memory database; nothing outlives the command
    #[arg(long, global = true, conflicts_with = "db_path")]
    pub(crate) in_memory: bool,
}

impl DatabaseConfig {
    pub(crate) fn open(&self) -> Result<Connection, String> {
        let conn = match (self.db_path.as_deref(), self.in_memory) {
            (Some(path), _) => open_db(path),
            (None, true) => open_db_in_memory(),
            (None, false) => {
                return Err(
                    "no database selected; pass --db <path> (or CATALOG_DB_PATH), or --in-memory"
                        .to_string(),
                )
            }
        };
        conn.map_err(|error| format!("failed to open database: {error}"))
    }
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// One of trace|debug|info|warn|error
    #[arg(long, env = "CATALOG_LOG_LEVEL", global = true)]
    pub(crate) log_level: Option<String>,

    /// Absolute directory for rotating log files; logs go to stderr when omitted
    #[arg(long, env = "CATALOG_LOG_DIR", global = true)]
    pub(crate) log_dir: Option<PathBuf>,
}

impl LoggingConfig {
    /// Explicit level, else `warn` on stderr and the build default for files.
    pub(crate) fn level(&self) -> &str {
        match (self.log_level.as_deref(), &self.log_dir) {
            (Some(level), _) => level,
            (None, None) => STDERR_DEFAULT_LOG_LEVEL,
            (None, Some(_)) => default_log_level(),
        }
    }

    pub(crate) fn init(&self) -> Result<(), String> {
        init_logging(self.level(), self.log_dir.as_deref())
            .map_err(|error| format!("failed to initialize logging: {error}"))
    }
}
