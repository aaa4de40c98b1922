//! JSON-backed repository for the main entry collection.
//!
//! The whole collection is stored as one JSON array under the
//! `angpao_entries` key. A missing or unparseable value falls back to an
//! empty collection so a damaged store never blocks startup.

use anyhow::Result;
use log::{debug, warn};
use shared::AngpaoEntry;

use super::connection::JsonConnection;
use super::ENTRIES_KEY;
use crate::storage::traits::EntryStorage;

#[derive(Clone)]
pub struct EntryRepository {
    connection: JsonConnection,
}

impl EntryRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl EntryStorage for EntryRepository {
    fn load_entries(&self) -> Result<Vec<AngpaoEntry>> {
        let Some(raw) = self.connection.read_key(ENTRIES_KEY)? else {
            debug!("No persisted entries found, starting empty");
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!("Failed to parse persisted entries, falling back to empty: {e}");
                Ok(Vec::new())
            }
        }
    }

    fn save_entries(&self, entries: &[AngpaoEntry]) -> Result<()> {
        let raw = serde_json::to_string(entries)?;
        self.connection.write_key(ENTRIES_KEY, &raw)?;
        debug!("Persisted {} entries", entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Category;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (EntryRepository, JsonConnection, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        (EntryRepository::new(connection.clone()), connection, temp_dir)
    }

    fn entry(id: &str, amount: i64) -> AngpaoEntry {
        AngpaoEntry {
            id: id.to_string(),
            amount,
            from: "Aunt Mei".to_string(),
            category: Category::Mother,
            chor: 2,
            date: "2025-01-30".to_string(),
            created_at: 1738300000000,
            note: None,
        }
    }

    #[test]
    fn test_load_without_persisted_data_is_empty() {
        let (repo, _connection, _temp_dir) = setup();
        assert!(repo.load_entries().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let (repo, _connection, _temp_dir) = setup();
        let entries = vec![entry("angpao-1-aa", 100), entry("angpao-2-bb", 50)];

        repo.save_entries(&entries).unwrap();
        assert_eq!(repo.load_entries().unwrap(), entries);
    }

    #[test]
    fn test_corrupt_value_falls_back_to_empty() {
        let (repo, connection, _temp_dir) = setup();
        connection.write_key(ENTRIES_KEY, "{not json").unwrap();
        assert!(repo.load_entries().unwrap().is_empty());
    }

    #[test]
    fn test_save_replaces_previous_collection() {
        let (repo, _connection, temp_dir) = setup();
        repo.save_entries(&[entry("angpao-1-aa", 100)]).unwrap();
        repo.save_entries(&[entry("angpao-2-bb", 50)]).unwrap();

        let loaded = repo.load_entries().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "angpao-2-bb");

        // Value on disk is the raw JSON array for the single key
        let raw = fs::read_to_string(temp_dir.path().join("angpao_entries.json")).unwrap();
        assert!(raw.starts_with('['));
    }
}
