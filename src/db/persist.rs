use anyhow::{Context, Result};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use tracing::{debug, info};

use crate::error::GridError;
use crate::models::{Grid, KnownTable, PRIMARY_KEY};

/// Replace every stored row of `table` with the grid's rows.
///
/// The header must only name declared columns of `table`; this is checked
/// before any statement runs. The delete and all inserts share one
/// transaction, so a failing insert rolls the table back to its prior rows.
/// Values are bound as parameters. An empty primary key cell is bound as NULL
/// so SQLite assigns a fresh id; every other empty cell is stored as `""`.
pub fn save_grid(conn: &mut Connection, table: KnownTable, grid: &Grid) -> Result<usize> {
    validate_header(table, grid.header())?;

    let insert_sql = insert_statement(table, grid.header());
    let key_index = grid.header().iter().position(|c| c == PRIMARY_KEY);
    debug!(sql = %insert_sql, rows = grid.row_count(), "saving grid");

    let tx = conn.transaction().context("failed to begin transaction")?;
    tx.execute(&format!("DELETE FROM {}", table.name()), [])
        .with_context(|| format!("failed to clear {} table", table.name()))?;

    {
        let mut stmt = tx
            .prepare(&insert_sql)
            .context("failed to prepare insert statement")?;
        for (row_index, row) in grid.rows().iter().enumerate() {
            let values = row.iter().enumerate().map(|(col, text)| {
                if Some(col) == key_index && text.trim().is_empty() {
                    Value::Null
                } else {
                    Value::Text(text.clone())
                }
            });
            stmt.execute(params_from_iter(values))
                .with_context(|| format!("failed to insert row {}", row_index + 1))?;
        }
    }

    tx.commit().context("failed to commit save")?;
    info!(table = %table, rows = grid.row_count(), "table replaced from grid");
    Ok(grid.row_count())
}

/// Reject headers that name anything outside the table's column allow-list.
fn validate_header(table: KnownTable, header: &[String]) -> Result<(), GridError> {
    match header.iter().find(|column| !table.has_column(column)) {
        Some(column) => Err(GridError::UnknownColumn {
            table: table.name().to_string(),
            column: column.clone(),
        }),
        None => Ok(()),
    }
}

/// Build the INSERT text. Only call after `validate_header` has passed.
fn insert_statement(table: KnownTable, header: &[String]) -> String {
    let placeholders = (1..=header.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    if header.is_empty() {
        return format!("INSERT INTO {} DEFAULT VALUES", table.name());
    }
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table.name(),
        header.join(", "),
        placeholders
    )
}
