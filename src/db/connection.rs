use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use rusqlite::Connection;
use tracing::{debug, info};

use crate::models::KnownTable;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".sqlite-grid-manager";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "example.db";

/// Handle to the on-disk database. It only remembers the path: every
/// operation opens its own connection and drops it when done.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Create the parent directory if needed, then make sure the three tables
    /// exist. Any failure here is fatal to startup.
    pub fn open_or_create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).context("failed to create data directory")?;
        }

        let db = Self { path };
        let conn = db.connect()?;
        ensure_schema(&conn)?;
        info!(path = %db.path.display(), "database ready");
        Ok(db)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a short-lived connection for a single user action.
    pub fn connect(&self) -> Result<Connection> {
        debug!(path = %self.path.display(), "opening connection");
        Connection::open(&self.path).context("failed to open SQLite database")
    }
}

/// Create each fixed table if it is missing. Safe to run on every launch.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    for table in KnownTable::ALL {
        let data_columns = table.columns()[1..]
            .iter()
            .map(|column| format!("{column} TEXT"))
            .collect::<Vec<_>>()
            .join(", ");
        conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {} (id INTEGER PRIMARY KEY AUTOINCREMENT, {})",
                table.name(),
                data_columns
            ),
            [],
        )
        .with_context(|| format!("failed to create {} table", table.name()))?;
    }
    Ok(())
}

/// Resolve the directory holding the database and the log file.
pub fn default_data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

/// Resolve the absolute path to the SQLite database inside the user's home.
pub fn default_db_path() -> Result<PathBuf> {
    Ok(default_data_dir()?.join(DB_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_count(conn: &Connection, name: &str) -> i64 {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |row| row.get(0),
        )
        .unwrap()
    }

    #[test]
    fn ensure_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        ensure_schema(&conn).unwrap();

        for table in KnownTable::ALL {
            assert_eq!(table_count(&conn, table.name()), 1);
            let columns: Vec<String> = conn
                .prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid")
                .unwrap()
                .query_map([table.name()], |row| row.get(0))
                .unwrap()
                .collect::<Result<_, _>>()
                .unwrap();
            assert_eq!(columns, table.columns());
        }
    }

    #[test]
    fn open_or_create_makes_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.db");
        let db = Database::open_or_create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(db.path(), path.as_path());
    }
}
