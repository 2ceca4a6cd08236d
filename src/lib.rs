//! Core library surface for the SQLite Grid Manager TUI.
//!
//! The `bin` target only parses flags, sets up logging, and hands a
//! [`Session`] to the terminal loop; everything it drives lives here so the
//! same operations can be exercised from tests.
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod session;
pub mod ui;

/// Persistence entry points used at startup.
pub use db::{ensure_schema, Database};

/// Domain types that other layers manipulate.
pub use error::GridError;
pub use models::{Grid, KnownTable};

pub use config::{Cli, Config};
pub use session::Session;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
