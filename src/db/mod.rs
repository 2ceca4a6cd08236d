//! Persistence module split across logical submodules.

mod connection;
mod persist;
mod query;

pub use connection::{default_data_dir, default_db_path, ensure_schema, Database};
pub use persist::save_grid;
pub use query::{declared_columns, run_query, value_to_text};
