//! Export/import domain logic for the angpao tracker.
//!
//! Backups are a JSON array of entries in the exact in-memory shape.
//! Import replaces the whole collection (no merge), so parsing is strict:
//! a payload that is not JSON, not an array, or contains a record that
//! does not match the entry shape rejects the entire import with a typed
//! error rather than silently dropping records.

use anyhow::Result;
use chrono::NaiveDate;
use log::{error, info};
use std::fs;
use std::path::Path;
use thiserror::Error;

use shared::AngpaoEntry;

/// Why an import payload was rejected.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("File is not valid JSON: {0}")]
    InvalidJson(serde_json::Error),
    #[error("Expected a JSON array of entries")]
    NotAnArray,
    #[error("Entry record has an invalid shape: {0}")]
    InvalidEntry(serde_json::Error),
}

/// Export service that handles backup serialization and import parsing.
#[derive(Clone, Default)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Serialize entries as a pretty-printed JSON array, the backup file
    /// content.
    pub fn export_json(&self, entries: &[AngpaoEntry]) -> Result<String> {
        Ok(serde_json::to_string_pretty(entries)?)
    }

    /// Backup file name for a given date: `angpao-backup-YYYY-MM-DD.json`.
    pub fn export_file_name(&self, date: NaiveDate) -> String {
        format!("angpao-backup-{}.json", date.format("%Y-%m-%d"))
    }

    /// Parse an import payload into an entry collection.
    pub fn parse_import(&self, payload: &str) -> Result<Vec<AngpaoEntry>, ImportError> {
        let value: serde_json::Value =
            serde_json::from_str(payload).map_err(ImportError::InvalidJson)?;
        if !value.is_array() {
            return Err(ImportError::NotAnArray);
        }
        serde_json::from_value(value).map_err(ImportError::InvalidEntry)
    }

    /// Write a backup of the given entries to a file.
    pub fn export_to_path(&self, entries: &[AngpaoEntry], path: &Path) -> Result<()> {
        let content = self.export_json(entries)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        info!("Exported {} entries to {}", entries.len(), path.display());
        Ok(())
    }

    /// Read and parse a backup file.
    pub fn import_from_path(&self, path: &Path) -> Result<Vec<AngpaoEntry>> {
        let payload = fs::read_to_string(path)?;
        match self.parse_import(&payload) {
            Ok(entries) => {
                info!("Parsed {} entries from {}", entries.len(), path.display());
                Ok(entries)
            }
            Err(e) => {
                error!("Rejected import from {}: {e}", path.display());
                Err(e.into())
            }
        }
    }
}
