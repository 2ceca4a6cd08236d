use thiserror::Error;

/// Validation failures raised before any SQL or file I/O runs. Storage and
/// filesystem errors travel as `anyhow::Error` with context instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Query text is empty.")]
    EmptyQuery,
    #[error("Unknown table '{0}'. Expected one of: users, dogs, cats.")]
    UnknownTable(String),
    #[error("Column '{column}' does not exist in table '{table}'.")]
    UnknownColumn { table: String, column: String },
    #[error("Row {row} has {found} cells but the header has {expected}.")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Cell ({row}, {col}) is outside the grid.")]
    CellOutOfRange { row: usize, col: usize },
    #[error("Row {0} is outside the grid.")]
    RowOutOfRange(usize),
}
