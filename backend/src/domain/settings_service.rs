//! Language preference for the angpao tracker, kept in memory and
//! written through to the settings key with the usual best-effort
//! contract.

use log::warn;
use std::sync::{Arc, Mutex};

use shared::Language;

use crate::storage::traits::{Connection, SettingsStorage};

#[derive(Clone)]
pub struct SettingsService<C: Connection> {
    settings_repository: Arc<C::SettingsRepository>,
    language: Arc<Mutex<Language>>,
}

impl<C: Connection> SettingsService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let settings_repository = connection.create_settings_repository();
        let language = match settings_repository.load_language() {
            Ok(language) => language,
            Err(e) => {
                warn!("Failed to load language preference, using default: {e}");
                Language::default()
            }
        };

        Self {
            settings_repository: Arc::new(settings_repository),
            language: Arc::new(Mutex::new(language)),
        }
    }

    pub fn language(&self) -> Language {
        *self.language.lock().unwrap()
    }

    pub fn set_language(&self, language: Language) {
        *self.language.lock().unwrap() = language;
        if let Err(e) = self.settings_repository.save_language(language) {
            warn!("Failed to persist language preference: {e}");
        }
    }
}
