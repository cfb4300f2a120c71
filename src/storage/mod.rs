pub mod csv_export;
pub mod json_backend;

use std::path::PathBuf;

use crate::{errors::ProjectionError, ledger::LedgerInputs};

pub type Result<T> = std::result::Result<T, ProjectionError>;

/// Abstraction over places that can hold named input snapshots.
pub trait SnapshotStore: Send + Sync {
    fn save(&self, inputs: &LedgerInputs, name: &str) -> Result<PathBuf>;
    fn load(&self, name: &str) -> Result<LedgerInputs>;
    fn list(&self) -> Result<Vec<String>>;
}

pub use csv_export::{write_day_records_csv, write_snapshot_csv};
pub use json_backend::{export_file_name, load_inputs_from_path, save_inputs_to_path, JsonStorage};
