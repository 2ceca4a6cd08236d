//! Grid exports. Both formats are pure reads of the grid and never touch the
//! database. Output is written to a hidden sibling file first and renamed over
//! the destination, so a failed export leaves any previous file intact.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use rust_xlsxwriter::Workbook;
use tracing::info;

use crate::models::Grid;

/// Write the header followed by every row as comma separated UTF-8 text.
pub fn export_csv(grid: &Grid, path: &Path) -> Result<()> {
    write_atomically(path, |tmp| {
        let mut writer = csv::Writer::from_path(tmp).context("failed to create CSV file")?;
        writer
            .write_record(grid.header())
            .context("failed to write CSV header")?;
        for row in grid.rows() {
            writer.write_record(row).context("failed to write CSV row")?;
        }
        writer.flush().context("failed to flush CSV file")?;
        Ok(())
    })?;
    info!(path = %path.display(), rows = grid.row_count(), "exported CSV");
    Ok(())
}

/// Write the header and rows into a single worksheet named `sheet_name`.
pub fn export_xlsx(grid: &Grid, path: &Path, sheet_name: &str) -> Result<()> {
    write_atomically(path, |tmp| {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet
            .set_name(sheet_name)
            .context("invalid worksheet name")?;

        let lines = std::iter::once(grid.header()).chain(grid.rows().iter().map(Vec::as_slice));
        for (row_index, cells) in lines.enumerate() {
            let row = u32::try_from(row_index).context("too many rows for a worksheet")?;
            for (col_index, text) in cells.iter().enumerate() {
                if text.is_empty() {
                    continue;
                }
                let col = u16::try_from(col_index).context("too many columns for a worksheet")?;
                sheet
                    .write_string(row, col, text)
                    .context("failed to write worksheet cell")?;
            }
        }

        workbook.save(tmp).context("failed to save workbook")?;
        Ok(())
    })?;
    info!(path = %path.display(), rows = grid.row_count(), "exported spreadsheet");
    Ok(())
}

/// Suggested file name for exporting `table`, e.g. `dogs.csv`.
pub fn default_export_path(table: &str, extension: &str) -> PathBuf {
    PathBuf::from(format!("{table}.{extension}"))
}

fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("export path '{}' has no file name", path.display()))?;
    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(".partial");
    let tmp = path.with_file_name(tmp_name);

    let outcome = write(&tmp).and_then(|()| {
        fs::rename(&tmp, path)
            .with_context(|| format!("failed to move export into {}", path.display()))
    });
    if outcome.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    outcome
}
