//! Ratatui front-end: a table selector, a query bar, the editable grid, and
//! modal prompts layered on top.

mod app;
mod forms;
mod grid_view;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
