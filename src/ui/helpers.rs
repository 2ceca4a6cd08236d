use std::ops::Range;

use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Widest a grid column is allowed to render, in characters.
pub(crate) const MAX_COLUMN_WIDTH: u16 = 32;
/// Narrowest a grid column renders, so empty columns stay clickable targets.
pub(crate) const MIN_COLUMN_WIDTH: u16 = 4;

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error. For storage
/// failures this is SQLite's own message: the `rusqlite::Error` carries it,
/// while the `ffi::Error` beneath only holds the generic code description.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .find(|cause| cause.downcast_ref::<rusqlite::Error>().is_some())
        .or_else(|| err.chain().last())
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// Terminal column right after `label` plus `text_chars` typed characters,
/// kept inside `area` however long the input grows.
pub(crate) fn input_cursor_x(area: Rect, label: &str, text_chars: usize) -> u16 {
    let offset = label
        .chars()
        .count()
        .saturating_add(text_chars);
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);
    area.x
        .saturating_add(offset)
        .min(area.right().saturating_sub(1))
}

/// Display width for each column: the longest of header and cells, clamped.
pub(crate) fn column_widths(header: &[String], rows: &[Vec<String>]) -> Vec<u16> {
    header
        .iter()
        .enumerate()
        .map(|(col, name)| {
            let longest = rows
                .iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0);
            (longest.min(MAX_COLUMN_WIDTH as usize) as u16).max(MIN_COLUMN_WIDTH)
        })
        .collect()
}

/// Pick the contiguous run of columns to draw so that `selected` is on screen.
/// Columns are laid out left to right with `spacing` between them; when the
/// selection sits past the right edge the window slides right.
pub(crate) fn visible_columns(
    widths: &[u16],
    selected: usize,
    available: u16,
    spacing: u16,
) -> Range<usize> {
    if widths.is_empty() {
        return 0..0;
    }
    let selected = selected.min(widths.len() - 1);
    let available = available as usize;

    let mut start = selected;
    let mut used = widths[selected] as usize;
    while start > 0 {
        let next = used + spacing as usize + widths[start - 1] as usize;
        if next > available {
            break;
        }
        used = next;
        start -= 1;
    }

    let mut end = selected + 1;
    while end < widths.len() {
        let next = used + spacing as usize + widths[end] as usize;
        if next > available {
            break;
        }
        used = next;
        end += 1;
    }

    start..end
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Context};

    #[test]
    fn surface_error_reports_root_cause() {
        let err = Err::<(), _>(anyhow!("no such table: horses"))
            .context("failed to prepare query")
            .unwrap_err();
        assert_eq!(surface_error(&err), "no such table: horses");
    }

    #[test]
    fn surface_error_keeps_sqlite_message() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();

        let err = conn
            .prepare("SELEC nonsense")
            .map(|_| ())
            .context("failed to prepare query")
            .unwrap_err();
        assert!(surface_error(&err).contains("syntax error"));

        let err = conn
            .prepare("SELECT * FROM horses")
            .map(|_| ())
            .context("failed to prepare query")
            .unwrap_err();
        assert!(surface_error(&err).contains("no such table: horses"));
    }

    #[test]
    fn input_cursor_stays_inside_area() {
        let area = Rect::new(2, 0, 20, 1);
        assert_eq!(input_cursor_x(area, "SQL: ", 3), 10);
        assert_eq!(input_cursor_x(area, "SQL: ", 500), 21);
        assert_eq!(input_cursor_x(area, "SQL: ", usize::MAX), 21);
    }

    #[test]
    fn widths_are_clamped() {
        let header = vec!["id".to_string(), "email".to_string()];
        let rows = vec![vec!["1".to_string(), "x".repeat(80)]];
        assert_eq!(column_widths(&header, &rows), [MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH]);
    }

    #[test]
    fn visible_window_follows_selection() {
        let widths = [10, 10, 10, 10];
        assert_eq!(visible_columns(&widths, 0, 21, 1), 0..2);
        assert_eq!(visible_columns(&widths, 3, 21, 1), 2..4);
        assert_eq!(visible_columns(&widths, 1, 100, 1), 0..4);
        assert_eq!(visible_columns(&[], 0, 100, 1), 0..0);
    }

    #[test]
    fn oversized_selected_column_still_shows() {
        assert_eq!(visible_columns(&[50, 5], 0, 20, 1), 0..1);
    }
}
