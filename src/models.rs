//! Domain models shared by the persistence bridge, the session, and the TUI.
//! The three supported tables are a closed set, so their names and columns
//! live here as constants and double as the identifier allow-list for every
//! statement we build ourselves.

use std::fmt;
use std::str::FromStr;

use crate::error::GridError;

/// Text shown in the grid for SQL NULL. Saving the grid writes this text back,
/// so a NULL column comes back from a save as an empty string.
pub const NULL_TEXT: &str = "";

/// Name of the auto-assigned primary key shared by every table.
pub const PRIMARY_KEY: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// One of the three fixed tables the tool manages.
pub enum KnownTable {
    Users,
    Dogs,
    Cats,
}

impl KnownTable {
    /// Selector order, also used for Tab cycling in the UI.
    pub const ALL: [KnownTable; 3] = [KnownTable::Users, KnownTable::Dogs, KnownTable::Cats];

    /// SQL identifier of the table.
    pub fn name(self) -> &'static str {
        match self {
            KnownTable::Users => "users",
            KnownTable::Dogs => "dogs",
            KnownTable::Cats => "cats",
        }
    }

    /// Label shown in the table selector.
    pub fn label(self) -> &'static str {
        match self {
            KnownTable::Users => "Users",
            KnownTable::Dogs => "Dogs",
            KnownTable::Cats => "Cats",
        }
    }

    /// Declared columns in creation order, primary key first.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            KnownTable::Users => &["id", "name", "email"],
            KnownTable::Dogs => &["id", "name", "breed"],
            KnownTable::Cats => &["id", "name", "color"],
        }
    }

    /// Whether `column` is one of this table's declared columns. Exact match:
    /// the grid header must spell columns the way the schema does.
    pub fn has_column(self, column: &str) -> bool {
        self.columns().contains(&column)
    }

    /// The statement the selector loads when this table becomes active.
    pub fn default_query(self) -> String {
        format!("SELECT * FROM {}", self.name())
    }

    /// Position inside [`KnownTable::ALL`].
    pub fn index(self) -> usize {
        match self {
            KnownTable::Users => 0,
            KnownTable::Dogs => 1,
            KnownTable::Cats => 2,
        }
    }

    /// Step through the selector, wrapping at both ends.
    pub fn cycle(self, offset: isize) -> Self {
        let len = Self::ALL.len() as isize;
        let next = (self.index() as isize + offset).rem_euclid(len);
        Self::ALL[next as usize]
    }
}

impl fmt::Display for KnownTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for KnownTable {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|table| table.name() == s)
            .ok_or_else(|| GridError::UnknownTable(s.to_string()))
    }
}

/// A row of cell texts, one per header column.
pub type Row = Vec<String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// The editable staging area mirroring the last query. Every row is exactly
/// as wide as the header.
pub struct Grid {
    header: Vec<String>,
    rows: Vec<Row>,
}

impl Grid {
    /// Build a grid, rejecting rows whose width differs from the header.
    pub fn new(header: Vec<String>, rows: Vec<Row>) -> Result<Self, GridError> {
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != header.len())
        {
            return Err(GridError::RaggedRow {
                row,
                expected: header.len(),
                found: cells.len(),
            });
        }
        Ok(Self { header, rows })
    }

    /// A grid with the given header and no rows.
    pub fn empty(header: Vec<String>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.header.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Append a row of empty cells and return its index.
    pub fn add_row(&mut self) -> usize {
        self.rows.push(vec![String::new(); self.header.len()]);
        self.rows.len() - 1
    }

    /// Overwrite one cell. No format validation happens here.
    pub fn set_cell(
        &mut self,
        row: usize,
        col: usize,
        text: impl Into<String>,
    ) -> Result<(), GridError> {
        let cell = self
            .rows
            .get_mut(row)
            .and_then(|cells| cells.get_mut(col))
            .ok_or(GridError::CellOutOfRange { row, col })?;
        *cell = text.into();
        Ok(())
    }

    /// Drop a staged row. Only affects storage once the grid is saved.
    pub fn remove_row(&mut self, row: usize) -> Result<Row, GridError> {
        if row >= self.rows.len() {
            return Err(GridError::RowOutOfRange(row));
        }
        Ok(self.rows.remove(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn parses_only_known_tables() {
        assert_eq!("dogs".parse::<KnownTable>(), Ok(KnownTable::Dogs));
        assert_eq!(
            "Dogs".parse::<KnownTable>(),
            Err(GridError::UnknownTable("Dogs".into()))
        );
        assert!("users; DROP TABLE cats".parse::<KnownTable>().is_err());
    }

    #[test]
    fn cycle_wraps_in_both_directions() {
        assert_eq!(KnownTable::Users.cycle(1), KnownTable::Dogs);
        assert_eq!(KnownTable::Cats.cycle(1), KnownTable::Users);
        assert_eq!(KnownTable::Users.cycle(-1), KnownTable::Cats);
    }

    #[test]
    fn new_rejects_ragged_rows() {
        let rows = vec![strings(&["1", "2"]), strings(&["3"])];
        let err = Grid::new(strings(&["a", "b"]), rows).unwrap_err();
        assert_eq!(
            err,
            GridError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn add_row_matches_header_width() {
        let mut grid = Grid::empty(strings(&["id", "name", "breed"]));
        let index = grid.add_row();
        assert_eq!(index, 0);
        assert_eq!(grid.rows()[0], strings(&["", "", ""]));
    }

    #[test]
    fn set_cell_and_remove_row_check_bounds() {
        let mut grid = Grid::new(strings(&["name"]), vec![strings(&["Rex"])]).unwrap();
        grid.set_cell(0, 0, "Fido").unwrap();
        assert_eq!(grid.cell(0, 0), Some("Fido"));
        assert_eq!(
            grid.set_cell(0, 1, "x"),
            Err(GridError::CellOutOfRange { row: 0, col: 1 })
        );
        assert_eq!(grid.remove_row(3), Err(GridError::RowOutOfRange(3)));
        assert_eq!(grid.remove_row(0).unwrap(), strings(&["Fido"]));
        assert_eq!(grid.row_count(), 0);
    }
}
