use anyhow::{Context, Result};
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use tracing::debug;

use crate::error::GridError;
use crate::models::{Grid, KnownTable, NULL_TEXT};

/// Run `sql` exactly as typed and render the outcome as a text grid.
///
/// Nothing is sanitized: any single statement SQLite accepts will run,
/// including ones that touch other tables. When the statement yields no rows
/// the header falls back to the declared columns of `active`, so an empty
/// table still shows what can be typed into it.
pub fn run_query(conn: &Connection, sql: &str, active: KnownTable) -> Result<Grid> {
    if sql.trim().is_empty() {
        return Err(GridError::EmptyQuery.into());
    }
    debug!(%sql, table = %active, "executing query");

    let mut stmt = conn.prepare(sql).context("failed to prepare query")?;
    let header: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    let width = header.len();

    let mut rows = stmt.query([]).context("failed to execute query")?;
    let mut cells = Vec::new();
    while let Some(row) = rows.next().context("failed to fetch row")? {
        let mut values = Vec::with_capacity(width);
        for index in 0..width {
            let value = row.get_ref(index).context("failed to read column value")?;
            values.push(value_to_text(value));
        }
        cells.push(values);
    }

    if cells.is_empty() {
        return Ok(Grid::empty(declared_columns(conn, active)?));
    }
    Ok(Grid::new(header, cells)?)
}

/// Column names of `table` as SQLite reports them, in declaration order.
pub fn declared_columns(conn: &Connection, table: KnownTable) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid")
        .context("failed to prepare table info query")?;

    let columns = stmt
        .query_map([table.name()], |row| row.get(0))
        .context("failed to load table info")?
        .collect::<Result<Vec<String>, _>>()
        .context("failed to collect column names")?;

    Ok(columns)
}

/// Text form of a stored value. SQL NULL becomes [`NULL_TEXT`].
pub fn value_to_text(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => NULL_TEXT.to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => {
            if f.is_finite() && f.fract() == 0.0 {
                format!("{f:.1}")
            } else {
                f.to_string()
            }
        }
        ValueRef::Text(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        ValueRef::Blob(bytes) => {
            let hex: String = bytes.iter().map(|byte| format!("{byte:02x}")).collect();
            format!("x'{hex}'")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ensure_schema;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn empty_result_uses_declared_columns() {
        let conn = setup();
        let grid = run_query(&conn, "SELECT * FROM cats", KnownTable::Cats).unwrap();
        assert_eq!(grid.header(), ["id", "name", "color"]);
        assert_eq!(grid.row_count(), 0);
    }

    #[test]
    fn result_columns_follow_the_query() {
        let conn = setup();
        conn.execute(
            "INSERT INTO users (name, email) VALUES ('Ann', 'ann@example.com')",
            [],
        )
        .unwrap();

        let grid = run_query(&conn, "SELECT email, name FROM users", KnownTable::Users).unwrap();
        assert_eq!(grid.header(), ["email", "name"]);
        assert_eq!(grid.rows(), [vec!["ann@example.com", "Ann"]]);
    }

    #[test]
    fn values_render_as_text() {
        let conn = setup();
        let grid = run_query(
            &conn,
            "SELECT NULL, 42, 2.0, 2.5, 'txt', x'0aff'",
            KnownTable::Users,
        )
        .unwrap();
        assert_eq!(grid.rows()[0], ["", "42", "2.0", "2.5", "txt", "x'0aff'"]);
    }

    #[test]
    fn malformed_sql_is_an_error() {
        let conn = setup();
        assert!(run_query(&conn, "SELEC * FRM users", KnownTable::Users).is_err());
        assert!(run_query(&conn, "SELECT * FROM horses", KnownTable::Users).is_err());
    }

    #[test]
    fn blank_query_is_rejected() {
        let conn = setup();
        let err = run_query(&conn, "   ", KnownTable::Dogs).unwrap_err();
        assert_eq!(err.downcast_ref::<GridError>(), Some(&GridError::EmptyQuery));
    }
}
