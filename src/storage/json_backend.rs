use chrono::NaiveDateTime;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    ledger::LedgerInputs,
    utils::paths::{app_data_dir, ensure_dir, snapshots_dir_in, write_atomic},
};

use super::{Result, SnapshotStore};

const SNAPSHOT_EXTENSION: &str = "json";
const EXPORT_PREFIX: &str = "budget_data";
const EXPORT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Stores named input snapshots as pretty JSON files under one directory.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    snapshots_dir: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(app_data_dir);
        ensure_dir(&root)?;
        let snapshots_dir = snapshots_dir_in(&root);
        ensure_dir(&snapshots_dir)?;
        Ok(Self { snapshots_dir })
    }

    pub fn snapshot_path(&self, name: &str) -> PathBuf {
        self.snapshots_dir
            .join(format!("{}.{}", canonical_name(name), SNAPSHOT_EXTENSION))
    }
}

impl SnapshotStore for JsonStorage {
    fn save(&self, inputs: &LedgerInputs, name: &str) -> Result<PathBuf> {
        let path = self.snapshot_path(name);
        save_inputs_to_path(inputs, &path)?;
        tracing::debug!(path = %path.display(), "saved snapshot");
        Ok(path)
    }

    fn load(&self, name: &str) -> Result<LedgerInputs> {
        load_inputs_from_path(&self.snapshot_path(name))
    }

    fn list(&self) -> Result<Vec<String>> {
        if !self.snapshots_dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.snapshots_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(SNAPSHOT_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

pub fn save_inputs_to_path(inputs: &LedgerInputs, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(inputs)?;
    write_atomic(path, json.as_bytes())?;
    Ok(())
}

/// Loads a snapshot; collections missing from the file come back empty.
pub fn load_inputs_from_path(path: &Path) -> Result<LedgerInputs> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// `budget_data_20250101_093000.json` style names for exported files.
pub fn export_file_name(extension: &str, now: NaiveDateTime) -> String {
    format!(
        "{}_{}.{}",
        EXPORT_PREFIX,
        now.format(EXPORT_TIMESTAMP_FORMAT),
        extension.trim_start_matches('.')
    )
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "snapshot".into()
    } else {
        sanitized
    }
}
