use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::traits::Connection;

/// JsonConnection manages the data directory and per-key file paths for
/// the flat key-value JSON store.
#[derive(Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a new connection with an explicit data directory.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a new connection in the default data directory
    /// (`<platform data dir>/Angpao Tracker`, falling back to the home
    /// directory when the platform dir cannot be determined).
    pub fn new_default() -> Result<Self> {
        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Self::new(base.join("Angpao Tracker"))
    }

    /// The directory holding all key files.
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the file backing a storage key.
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.base_directory.join(format!("{key}.json"))
    }

    /// Read the raw value stored under a key. Returns `Ok(None)` when the
    /// key has never been written.
    pub fn read_key(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    /// Write the raw value for a key using the atomic write pattern:
    /// write to a temp file, then rename over the target.
    pub fn write_key(&self, key: &str, contents: &str) -> Result<()> {
        if !self.base_directory.exists() {
            fs::create_dir_all(&self.base_directory)?;
        }

        let path = self.key_path(key);
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, &path)?;
        Ok(())
    }
}

impl Connection for JsonConnection {
    type EntryRepository = super::EntryRepository;
    type QueueRepository = super::QueueRepository;
    type SettingsRepository = super::SettingsRepository;

    fn create_entry_repository(&self) -> Self::EntryRepository {
        super::EntryRepository::new(self.clone())
    }

    fn create_queue_repository(&self) -> Self::QueueRepository {
        super::QueueRepository::new(self.clone())
    }

    fn create_settings_repository(&self) -> Self::SettingsRepository {
        super::SettingsRepository::new(self.clone())
    }
}
