//! Binary entry point: resolve configuration, bring up the database, and drive
//! the Ratatui event loop until the user exits.
use clap::Parser;
use sqlite_grid_manager::logging::init_logging;
use sqlite_grid_manager::{run_app, App, Cli, Database, Session};
use tracing::info;

/// Startup failures (unwritable data directory, broken database file, no
/// terminal) are returned to the shell instead of being shown in the TUI.
fn main() -> anyhow::Result<()> {
    let config = Cli::parse().into_config()?;
    init_logging(&config.log_path)?;
    info!(db = %config.db_path.display(), table = %config.initial_table, "starting");

    let db = Database::open_or_create(&config.db_path)?;
    let session = Session::new(db, config.initial_table)?;

    let mut app = App::new(session);
    run_app(&mut app)
}
