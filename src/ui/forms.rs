use std::path::PathBuf;

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Single-line text buffer used by the query bar, the cell editor, and the
/// export path prompt.
#[derive(Default, Clone, Debug)]
pub(crate) struct TextInput {
    value: String,
}

impl TextInput {
    pub(crate) fn new(initial: impl Into<String>) -> Self {
        Self {
            value: initial.into(),
        }
    }

    /// Append a printable character. Control characters are ignored.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            false
        } else {
            self.value.push(ch);
            true
        }
    }

    pub(crate) fn backspace(&mut self) {
        self.value.pop();
    }

    pub(crate) fn clear(&mut self) {
        self.value.clear();
    }

    pub(crate) fn value(&self) -> &str {
        &self.value
    }

    pub(crate) fn into_value(self) -> String {
        self.value
    }

    pub(crate) fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    /// Render `label: value`, highlighted while the input has focus.
    pub(crate) fn build_line(&self, label: &str, focused: bool) -> Line<'static> {
        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::raw(format!("{label}: ")),
            Span::styled(self.value.clone(), style),
        ])
    }
}

/// File formats offered by the export prompt.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub(crate) fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub(crate) fn title(self) -> &'static str {
        match self {
            ExportFormat::Csv => "Export to CSV",
            ExportFormat::Xlsx => "Export to Excel",
        }
    }
}

/// Path prompt standing in for a save-file dialog.
#[derive(Clone, Debug)]
pub(crate) struct ExportPrompt {
    pub(crate) format: ExportFormat,
    pub(crate) input: TextInput,
}

impl ExportPrompt {
    pub(crate) fn new(format: ExportFormat, suggested: PathBuf) -> Self {
        Self {
            format,
            input: TextInput::new(suggested.to_string_lossy()),
        }
    }

    /// The chosen path, or `None` when the prompt was left blank.
    pub(crate) fn path(&self) -> Option<PathBuf> {
        let trimmed = self.input.value().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(PathBuf::from(trimmed))
        }
    }
}

/// In-place editor for one grid cell.
#[derive(Clone, Debug)]
pub(crate) struct CellEditor {
    pub(crate) row: usize,
    pub(crate) col: usize,
    pub(crate) column_name: String,
    pub(crate) input: TextInput,
}

/// Severity of a blocking notice.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum NoticeKind {
    Info,
    Error,
}

/// Modal message that must be dismissed before the next action.
#[derive(Clone, Debug)]
pub(crate) struct Notice {
    pub(crate) title: String,
    pub(crate) text: String,
    pub(crate) kind: NoticeKind,
}

impl Notice {
    pub(crate) fn info(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            kind: NoticeKind::Info,
        }
    }

    pub(crate) fn error(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            kind: NoticeKind::Error,
        }
    }

    pub(crate) fn style(&self) -> Style {
        match self.kind {
            NoticeKind::Info => Style::default().fg(Color::Green),
            NoticeKind::Error => Style::default().fg(Color::Red),
        }
    }
}
