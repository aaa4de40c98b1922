//! JSON-backed repository for the language preference, stored as a JSON
//! string under the `angpao_language` key.

use anyhow::Result;
use log::warn;
use shared::Language;

use super::connection::JsonConnection;
use super::LANGUAGE_KEY;
use crate::storage::traits::SettingsStorage;

#[derive(Clone)]
pub struct SettingsRepository {
    connection: JsonConnection,
}

impl SettingsRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl SettingsStorage for SettingsRepository {
    fn load_language(&self) -> Result<Language> {
        let Some(raw) = self.connection.read_key(LANGUAGE_KEY)? else {
            return Ok(Language::default());
        };

        match serde_json::from_str(&raw) {
            Ok(language) => Ok(language),
            Err(e) => {
                warn!("Failed to parse persisted language, falling back to default: {e}");
                Ok(Language::default())
            }
        }
    }

    fn save_language(&self, language: Language) -> Result<()> {
        let raw = serde_json::to_string(&language)?;
        self.connection.write_key(LANGUAGE_KEY, &raw)?;
        Ok(())
    }
}
