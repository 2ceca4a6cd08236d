//! The controlling state behind the UI: which table is active, the query text
//! being edited, and the grid mirroring the last successful query. All user
//! actions go through here so they can be exercised without a terminal.

use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use crate::db::{run_query, save_grid, Database};
use crate::error::GridError;
use crate::export::{export_csv, export_xlsx};
use crate::models::{Grid, KnownTable};

pub struct Session {
    db: Database,
    active: KnownTable,
    query: String,
    grid: Grid,
}

impl Session {
    /// Start a session on `initial` and load its rows, like picking it in the
    /// selector.
    pub fn new(db: Database, initial: KnownTable) -> Result<Self> {
        let mut session = Self {
            db,
            active: initial,
            query: initial.default_query(),
            grid: Grid::empty(initial.columns().iter().map(|c| c.to_string()).collect()),
        };
        session.select_table(initial)?;
        Ok(session)
    }

    pub fn active_table(&self) -> KnownTable {
        self.active
    }

    pub fn query_text(&self) -> &str {
        &self.query
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Make `table` active, reset the query to select everything from it, and
    /// run that query.
    pub fn select_table(&mut self, table: KnownTable) -> Result<usize> {
        info!(table = %table, "table selected");
        self.active = table;
        self.query = table.default_query();
        self.execute_query()
    }

    /// Replace the pending query text without running it.
    pub fn set_query_text(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    /// Run the pending query verbatim. On success the grid is rebuilt and the
    /// row count returned; on failure the grid keeps its previous contents.
    pub fn execute_query(&mut self) -> Result<usize> {
        let conn = self.db.connect()?;
        match run_query(&conn, &self.query, self.active) {
            Ok(grid) => {
                self.grid = grid;
                info!(rows = self.grid.row_count(), "query loaded into grid");
                Ok(self.grid.row_count())
            }
            Err(err) => {
                warn!(error = %err, query = %self.query, "query failed");
                Err(err)
            }
        }
    }

    /// Stage an empty row; nothing is stored until [`Session::save`].
    pub fn add_row(&mut self) -> usize {
        self.grid.add_row()
    }

    pub fn set_cell(
        &mut self,
        row: usize,
        col: usize,
        text: impl Into<String>,
    ) -> Result<(), GridError> {
        self.grid.set_cell(row, col, text)
    }

    pub fn remove_row(&mut self, row: usize) -> Result<(), GridError> {
        self.grid.remove_row(row).map(|_| ())
    }

    /// Replace the active table's rows with the grid, all or nothing.
    pub fn save(&self) -> Result<usize> {
        let mut conn = self.db.connect()?;
        save_grid(&mut conn, self.active, &self.grid).inspect_err(|err| {
            warn!(error = %err, table = %self.active, "save failed");
        })
    }

    pub fn export_csv(&self, path: &Path) -> Result<()> {
        export_csv(&self.grid, path).inspect_err(|err| {
            warn!(error = %err, path = %path.display(), "CSV export failed");
        })
    }

    pub fn export_xlsx(&self, path: &Path) -> Result<()> {
        export_xlsx(&self.grid, path, self.active.name()).inspect_err(|err| {
            warn!(error = %err, path = %path.display(), "spreadsheet export failed");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(table: KnownTable) -> (Session, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_or_create(dir.path().join("test.db")).unwrap();
        (Session::new(db, table).unwrap(), dir)
    }

    #[test]
    fn new_session_loads_the_initial_table() {
        let (session, _dir) = session(KnownTable::Dogs);
        assert_eq!(session.active_table(), KnownTable::Dogs);
        assert_eq!(session.query_text(), "SELECT * FROM dogs");
        assert_eq!(session.grid().header(), ["id", "name", "breed"]);
    }

    #[test]
    fn select_table_switches_query_and_header() {
        let (mut session, _dir) = session(KnownTable::Users);
        session.select_table(KnownTable::Cats).unwrap();
        assert_eq!(session.query_text(), "SELECT * FROM cats");
        assert_eq!(session.grid().header(), ["id", "name", "color"]);
    }

    #[test]
    fn failed_query_keeps_the_grid() {
        let (mut session, _dir) = session(KnownTable::Users);
        session.add_row();
        let before = session.grid().clone();

        session.set_query_text("SELECT FROM WHERE");
        assert!(session.execute_query().is_err());
        assert_eq!(session.grid(), &before);
    }
}
