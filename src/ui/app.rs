use std::mem;

use anyhow::Error;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap,
};
use ratatui::Frame;
use tracing::info;

use crate::export::default_export_path;
use crate::models::KnownTable;
use crate::session::Session;

use super::forms::{CellEditor, ExportFormat, ExportPrompt, Notice, TextInput};
use super::grid_view::GridView;
use super::helpers::{
    centered_rect, column_widths, input_cursor_x, surface_error, visible_columns,
};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Height of the table selector and of the query bar.
const BAR_HEIGHT: u16 = 3;
/// Blank characters between rendered grid columns.
const COLUMN_SPACING: u16 = 1;
/// Rows skipped by PageUp / PageDown.
const PAGE_ROWS: isize = 10;

/// Fine-grained modes layered over the grid screen.
enum Mode {
    Normal,
    EditingQuery(TextInput),
    EditingCell(CellEditor),
    Exporting(ExportPrompt),
    Notice(Notice),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    session: Session,
    view: GridView,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            view: GridView::default(),
            mode: Mode::Normal,
            status: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Feed one key press through the current mode. Returns `true` when the
    /// user asked to quit. Failed actions never escape: they become notices.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::EditingQuery(input) => self.handle_query_key(code, input),
            Mode::EditingCell(editor) => self.handle_cell_key(code, editor),
            Mode::Exporting(prompt) => self.handle_export_key(code, prompt),
            // Any key dismisses a notice.
            Mode::Notice(_) => Mode::Normal,
        };

        exit
    }

    /// Ctrl+S saves from the grid without leaving it.
    pub(crate) fn handle_ctrl_s(&mut self) {
        if matches!(self.mode, Mode::Normal) {
            self.mode = self.save();
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
                Mode::Normal
            }
            KeyCode::Tab => self.select_table(self.session.active_table().cycle(1)),
            KeyCode::BackTab => self.select_table(self.session.active_table().cycle(-1)),
            KeyCode::Char(ch @ '1'..='3') => {
                let index = ch as usize - '1' as usize;
                self.select_table(KnownTable::ALL[index])
            }
            KeyCode::Char('/') => {
                self.clear_status();
                Mode::EditingQuery(TextInput::new(self.session.query_text()))
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.run_query(),
            KeyCode::Up => self.move_row(-1),
            KeyCode::Down => self.move_row(1),
            KeyCode::PageUp => self.move_row(-PAGE_ROWS),
            KeyCode::PageDown => self.move_row(PAGE_ROWS),
            KeyCode::Home => {
                self.view.first_row();
                Mode::Normal
            }
            KeyCode::End => {
                self.view.last_row(self.session.grid());
                Mode::Normal
            }
            KeyCode::Left => {
                self.view.move_col(-1, self.session.grid());
                Mode::Normal
            }
            KeyCode::Right => {
                self.view.move_col(1, self.session.grid());
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('e') | KeyCode::Char('E') => self.open_cell_editor(),
            KeyCode::Char('+') | KeyCode::Char('a') | KeyCode::Char('A') => {
                let row = self.session.add_row();
                self.view.row = row;
                self.view.clamp(self.session.grid());
                self.set_status(
                    "Row added. Press s to save it to the table.",
                    StatusKind::Info,
                );
                Mode::Normal
            }
            KeyCode::Char('-') | KeyCode::Char('d') | KeyCode::Char('D') => self.remove_row(),
            KeyCode::Char('s') | KeyCode::Char('S') => self.save(),
            KeyCode::Char('c') | KeyCode::Char('C') => self.open_export(ExportFormat::Csv),
            KeyCode::Char('x') | KeyCode::Char('X') => self.open_export(ExportFormat::Xlsx),
            _ => Mode::Normal,
        }
    }

    fn handle_query_key(&mut self, code: KeyCode, mut input: TextInput) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Query edit cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter => {
                self.session.set_query_text(input.into_value());
                self.run_query()
            }
            KeyCode::Backspace => {
                input.backspace();
                Mode::EditingQuery(input)
            }
            KeyCode::Delete => {
                input.clear();
                Mode::EditingQuery(input)
            }
            KeyCode::Char(ch) => {
                input.push_char(ch);
                Mode::EditingQuery(input)
            }
            _ => Mode::EditingQuery(input),
        }
    }

    fn handle_cell_key(&mut self, code: KeyCode, mut editor: CellEditor) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Edit cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter => {
                let (row, col) = (editor.row, editor.col);
                match self.session.set_cell(row, col, editor.input.into_value()) {
                    Ok(()) => {
                        self.set_status(
                            "Cell updated. Press s to save the grid.",
                            StatusKind::Info,
                        );
                        Mode::Normal
                    }
                    Err(err) => self.fail("Edit Error", &err.into()),
                }
            }
            KeyCode::Backspace => {
                editor.input.backspace();
                Mode::EditingCell(editor)
            }
            KeyCode::Delete => {
                editor.input.clear();
                Mode::EditingCell(editor)
            }
            KeyCode::Char(ch) => {
                editor.input.push_char(ch);
                Mode::EditingCell(editor)
            }
            _ => Mode::EditingCell(editor),
        }
    }

    fn handle_export_key(&mut self, code: KeyCode, mut prompt: ExportPrompt) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Export cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter => self.export(&prompt),
            KeyCode::Backspace => {
                prompt.input.backspace();
                Mode::Exporting(prompt)
            }
            KeyCode::Delete => {
                prompt.input.clear();
                Mode::Exporting(prompt)
            }
            KeyCode::Char(ch) => {
                prompt.input.push_char(ch);
                Mode::Exporting(prompt)
            }
            _ => Mode::Exporting(prompt),
        }
    }

    fn select_table(&mut self, table: KnownTable) -> Mode {
        match self.session.select_table(table) {
            Ok(rows) => {
                self.view = GridView::default();
                self.set_status(
                    format!("{}: {rows} row(s) loaded.", table.label()),
                    StatusKind::Info,
                );
                Mode::Normal
            }
            Err(err) => self.fail("Query Error", &err),
        }
    }

    fn run_query(&mut self) -> Mode {
        match self.session.execute_query() {
            Ok(rows) => {
                self.view.clamp(self.session.grid());
                self.set_status(format!("Query returned {rows} row(s)."), StatusKind::Info);
                Mode::Normal
            }
            Err(err) => self.fail("Query Error", &err),
        }
    }

    fn save(&mut self) -> Mode {
        let table = self.session.active_table();
        match self.session.save() {
            Ok(rows) => {
                let message = format!("Saved {rows} row(s) to {}.", table.name());
                self.set_status(message.clone(), StatusKind::Info);
                Mode::Notice(Notice::info("Saved", message))
            }
            Err(err) => self.fail("Save Error", &err),
        }
    }

    fn open_cell_editor(&mut self) -> Mode {
        let grid = self.session.grid();
        match self.view.current_cell(grid) {
            Some((row, col)) => {
                let editor = CellEditor {
                    row,
                    col,
                    column_name: grid.header()[col].clone(),
                    input: TextInput::new(grid.cell(row, col).unwrap_or_default()),
                };
                self.clear_status();
                Mode::EditingCell(editor)
            }
            None => {
                self.set_status("No cell selected. Press + to add a row.", StatusKind::Error);
                Mode::Normal
            }
        }
    }

    fn remove_row(&mut self) -> Mode {
        if self.session.grid().row_count() == 0 {
            self.set_status("No row selected to remove.", StatusKind::Error);
            return Mode::Normal;
        }
        match self.session.remove_row(self.view.row) {
            Ok(()) => {
                self.view.clamp(self.session.grid());
                self.set_status(
                    "Row removed from the grid. Press s to apply.",
                    StatusKind::Info,
                );
                Mode::Normal
            }
            Err(err) => self.fail("Edit Error", &err.into()),
        }
    }

    fn open_export(&mut self, format: ExportFormat) -> Mode {
        self.clear_status();
        let suggested =
            default_export_path(self.session.active_table().name(), format.extension());
        Mode::Exporting(ExportPrompt::new(format, suggested))
    }

    fn export(&mut self, prompt: &ExportPrompt) -> Mode {
        let Some(path) = prompt.path() else {
            self.set_status("Export cancelled.", StatusKind::Info);
            return Mode::Normal;
        };
        let outcome = match prompt.format {
            ExportFormat::Csv => self.session.export_csv(&path),
            ExportFormat::Xlsx => self.session.export_xlsx(&path),
        };
        match outcome {
            Ok(()) => {
                info!(path = %path.display(), "export finished");
                let message = format!("Saved to {}.", path.display());
                self.set_status(message.clone(), StatusKind::Info);
                Mode::Notice(Notice::info("Export Complete", message))
            }
            Err(err) => self.fail("Export Error", &err),
        }
    }

    fn move_row(&mut self, offset: isize) -> Mode {
        self.view.move_row(offset, self.session.grid());
        Mode::Normal
    }

    /// Surface a failure verbatim in a blocking notice and the footer.
    fn fail(&mut self, title: &str, err: &Error) -> Mode {
        let message = surface_error(err);
        self.set_status(message.clone(), StatusKind::Error);
        Mode::Notice(Notice::error(title, message))
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(BAR_HEIGHT),
                Constraint::Length(BAR_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_table_selector(frame, chunks[0]);
        self.draw_query_bar(frame, chunks[1]);
        self.draw_grid(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);

        match &self.mode {
            Mode::EditingCell(editor) => self.draw_cell_editor(frame, area, editor),
            Mode::Exporting(prompt) => self.draw_export_prompt(frame, area, prompt),
            Mode::Notice(notice) => self.draw_notice(frame, area, notice),
            Mode::Normal | Mode::EditingQuery(_) => {}
        }
    }

    fn draw_table_selector(&self, frame: &mut Frame, area: Rect) {
        let titles = KnownTable::ALL
            .iter()
            .enumerate()
            .map(|(i, table)| format!("{} {}", i + 1, table.label()));
        let tabs = Tabs::new(titles)
            .select(self.session.active_table().index())
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::default().borders(Borders::ALL).title("Table"));
        frame.render_widget(tabs, area);
    }

    fn draw_query_bar(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Query");
        let inner = block.inner(area);

        let line = match &self.mode {
            Mode::EditingQuery(input) => input.build_line("SQL", true),
            _ => TextInput::new(self.session.query_text()).build_line("SQL", false),
        };
        frame.render_widget(Paragraph::new(line).block(block), area);

        if let Mode::EditingQuery(input) = &self.mode {
            let cursor_x = input_cursor_x(inner, "SQL: ", input.char_count());
            frame.set_cursor_position((cursor_x, inner.y));
        }
    }

    fn draw_grid(&self, frame: &mut Frame, area: Rect) {
        let grid = self.session.grid();
        let title = format!(
            "{} ({} rows)",
            self.session.active_table().label(),
            grid.row_count()
        );
        let block = Block::default().borders(Borders::ALL).title(title);

        if grid.width() == 0 {
            let paragraph = Paragraph::new("The last statement returned no columns.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let inner = block.inner(area);
        let widths = column_widths(grid.header(), grid.rows());
        let range = visible_columns(&widths, self.view.col, inner.width, COLUMN_SPACING);

        let header = Row::new(grid.header()[range.clone()].iter().map(String::as_str)).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        let rows = grid
            .rows()
            .iter()
            .map(|cells| Row::new(cells[range.clone()].iter().map(|c| Cell::from(c.as_str()))));
        let constraints = widths[range.clone()]
            .iter()
            .map(|width| Constraint::Length(*width));

        let table = Table::new(rows, constraints)
            .header(header)
            .block(block)
            .column_spacing(COLUMN_SPACING)
            .row_highlight_style(Style::default().bg(Color::DarkGray))
            .cell_highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            );

        let mut state = TableState::default();
        if grid.row_count() > 0 {
            state.select(Some(self.view.row));
            state.select_column(Some(self.view.col.saturating_sub(range.start)));
        }
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match &self.mode {
            Mode::EditingQuery(_) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Run   "),
                Span::styled("[Del]", key_style),
                Span::raw(" Clear   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            Mode::EditingCell(_) | Mode::Exporting(_) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Confirm   "),
                Span::styled("[Del]", key_style),
                Span::raw(" Clear   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            Mode::Notice(_) => Line::from(vec![
                Span::styled("[any key]", key_style),
                Span::raw(" Dismiss"),
            ]),
            Mode::Normal => Line::from(vec![
                Span::styled("[Tab/1-3]", key_style),
                Span::raw(" Table   "),
                Span::styled("[/]", key_style),
                Span::raw(" Query   "),
                Span::styled("[r]", key_style),
                Span::raw(" Run   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Edit Cell   "),
                Span::styled("[+]", key_style),
                Span::raw(" Add   "),
                Span::styled("[-]", key_style),
                Span::raw(" Remove   "),
                Span::styled("[s]", key_style),
                Span::raw(" Save   "),
                Span::styled("[c]", key_style),
                Span::raw(" CSV   "),
                Span::styled("[x]", key_style),
                Span::raw(" Excel   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }

    fn draw_cell_editor(&self, frame: &mut Frame, area: Rect, editor: &CellEditor) {
        let popup_area = centered_rect(60, 25, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Edit Cell").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(Span::styled(
                format!("Row {}, column {}", editor.row + 1, editor.column_name),
                Style::default().fg(Color::Gray),
            )),
            editor.input.build_line("Value", true),
        ];
        frame.render_widget(Paragraph::new(lines), inner);

        let cursor_x = input_cursor_x(inner, "Value: ", editor.input.char_count());
        frame.set_cursor_position((cursor_x, inner.y.saturating_add(1)));
    }

    fn draw_export_prompt(&self, frame: &mut Frame, area: Rect, prompt: &ExportPrompt) {
        let popup_area = centered_rect(70, 25, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(prompt.format.title())
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            prompt.input.build_line("Path", true),
            Line::from(""),
            Line::from(Span::styled(
                "Leave the path empty to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);

        let cursor_x = input_cursor_x(inner, "Path: ", prompt.input.char_count());
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn draw_notice(&self, frame: &mut Frame, area: Rect, notice: &Notice) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(notice.title.clone())
            .borders(Borders::ALL)
            .border_style(notice.style());
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(notice.text.clone()),
            Line::from(""),
            Line::from(Span::styled(
                "Press any key to continue.",
                Style::default().fg(Color::Gray),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn app(table: KnownTable) -> (App, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_or_create(dir.path().join("app.db")).unwrap();
        let session = Session::new(db, table).unwrap();
        (App::new(session), dir)
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch));
        }
    }

    #[test]
    fn add_edit_and_save_a_row() {
        let (mut app, _dir) = app(KnownTable::Dogs);

        app.handle_key(KeyCode::Char('+'));
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Enter);
        type_text(&mut app, "Rex");
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Char('s'));
        assert!(matches!(app.mode, Mode::Notice(ref n) if n.title == "Saved"));

        app.handle_key(KeyCode::Esc);
        app.handle_key(KeyCode::Char('r'));
        let grid = app.session().grid();
        assert_eq!(grid.row_count(), 1);
        assert_eq!(grid.cell(0, 1), Some("Rex"));
        assert_eq!(grid.cell(0, 2), Some(""));
    }

    #[test]
    fn bad_query_shows_error_and_keeps_grid() {
        let (mut app, _dir) = app(KnownTable::Users);
        app.handle_key(KeyCode::Char('+'));
        let before = app.session().grid().clone();

        app.handle_key(KeyCode::Char('/'));
        app.handle_key(KeyCode::Delete);
        type_text(&mut app, "SELEC nonsense");
        app.handle_key(KeyCode::Enter);

        assert!(matches!(app.mode, Mode::Notice(ref n) if n.title == "Query Error"));
        assert_eq!(app.session().grid(), &before);
        assert_eq!(app.session().query_text(), "SELEC nonsense");
    }

    fn notice_text(app: &App) -> &str {
        match &app.mode {
            Mode::Notice(notice) => &notice.text,
            _ => panic!("expected a notice"),
        }
    }

    fn run_typed_query(app: &mut App, sql: &str) {
        app.handle_key(KeyCode::Char('/'));
        app.handle_key(KeyCode::Delete);
        type_text(app, sql);
        app.handle_key(KeyCode::Enter);
    }

    #[test]
    fn storage_errors_show_sqlite_message() {
        let (mut app, _dir) = app(KnownTable::Dogs);

        run_typed_query(&mut app, "SELEC nonsense");
        assert!(notice_text(&app).contains("syntax error"), "{}", notice_text(&app));
        app.handle_key(KeyCode::Esc);

        run_typed_query(&mut app, "SELECT * FROM horses");
        assert!(notice_text(&app).contains("no such table: horses"));
        app.handle_key(KeyCode::Esc);

        run_typed_query(&mut app, "SELECT * FROM dogs");
        app.session.add_row();
        app.session.add_row();
        app.session.set_cell(0, 0, "1").unwrap();
        app.session.set_cell(1, 0, "1").unwrap();
        app.handle_key(KeyCode::Char('s'));
        assert!(notice_text(&app).contains("constraint failed"), "{}", notice_text(&app));
    }

    #[test]
    fn long_input_renders_without_overflow() {
        let (mut app, _dir) = app(KnownTable::Users);
        app.handle_key(KeyCode::Char('/'));
        type_text(&mut app, &"x".repeat(70_000));

        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
    }

    #[test]
    fn number_keys_switch_tables() {
        let (mut app, _dir) = app(KnownTable::Users);
        app.handle_key(KeyCode::Char('3'));
        assert_eq!(app.session().active_table(), KnownTable::Cats);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.session().active_table(), KnownTable::Users);
    }

    #[test]
    fn ctrl_s_only_saves_from_the_grid() {
        let (mut app, _dir) = app(KnownTable::Cats);
        app.handle_key(KeyCode::Char('/'));
        app.handle_ctrl_s();
        assert!(matches!(app.mode, Mode::EditingQuery(_)));

        app.handle_key(KeyCode::Esc);
        app.handle_ctrl_s();
        assert!(matches!(app.mode, Mode::Notice(_)));
    }

    #[test]
    fn export_prompt_writes_csv() {
        let (mut app, dir) = app(KnownTable::Dogs);
        let target = dir.path().join("out.csv");

        app.handle_key(KeyCode::Char('c'));
        app.handle_key(KeyCode::Delete);
        type_text(&mut app, &target.to_string_lossy());
        app.handle_key(KeyCode::Enter);

        assert!(matches!(app.mode, Mode::Notice(ref n) if n.title == "Export Complete"));
        let text = std::fs::read_to_string(&target).unwrap();
        assert_eq!(text.trim_end(), "id,name,breed");
    }

    #[test]
    fn q_quits() {
        let (mut app, _dir) = app(KnownTable::Users);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn renders_without_panicking() {
        let (mut app, _dir) = app(KnownTable::Users);
        app.handle_key(KeyCode::Char('+'));
        app.handle_key(KeyCode::Enter);

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content.iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Edit Cell"));
        assert!(text.contains("Users"));
    }
}
