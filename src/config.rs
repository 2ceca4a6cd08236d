//! Command-line configuration. The tool stays interactive; these flags only
//! choose where data and logs live and which table opens first.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::db::{default_data_dir, default_db_path};
use crate::models::KnownTable;

/// Log file name used when `--log-file` is not given.
const LOG_FILE_NAME: &str = "grid-manager.log";

#[derive(Debug, Parser)]
#[command(name = "sqlite-grid-manager")]
#[command(about = "Browse, edit, and export the users/dogs/cats SQLite tables", long_about = None)]
pub struct Cli {
    /// SQLite database file (created if missing)
    #[arg(long, env = "GRID_MANAGER_DB")]
    pub db: Option<PathBuf>,

    /// Where to write the application log
    #[arg(long, env = "GRID_MANAGER_LOG")]
    pub log_file: Option<PathBuf>,

    /// Table selected at startup: users, dogs, or cats
    #[arg(long, default_value = "users")]
    pub table: KnownTable,
}

/// Fully resolved settings with defaults filled in.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_path: PathBuf,
    pub initial_table: KnownTable,
}

impl Cli {
    pub fn into_config(self) -> Result<Config> {
        let db_path = match self.db {
            Some(path) => path,
            None => default_db_path()?,
        };
        let log_path = match self.log_file {
            Some(path) => path,
            None => default_data_dir()?.join(LOG_FILE_NAME),
        };
        Ok(Config {
            db_path,
            log_path,
            initial_table: self.table,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_paths_and_table_are_kept() {
        let cli = Cli::try_parse_from([
            "sqlite-grid-manager",
            "--db",
            "/tmp/pets.db",
            "--log-file",
            "/tmp/pets.log",
            "--table",
            "cats",
        ])
        .unwrap();

        let config = cli.into_config().unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/pets.db"));
        assert_eq!(config.log_path, PathBuf::from("/tmp/pets.log"));
        assert_eq!(config.initial_table, KnownTable::Cats);
    }

    #[test]
    fn unknown_table_is_rejected() {
        assert!(Cli::try_parse_from(["sqlite-grid-manager", "--table", "horses"]).is_err());
    }
}
