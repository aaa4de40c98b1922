//! # Angpao Tracker Backend
//!
//! Core of a single-user tracker for monetary gifts ("angpao") received
//! over the 15-day festival window. The backend owns the entry and queue
//! collections, derives every statistic fresh from the current snapshot,
//! and persists state as flat key-value JSON as a best-effort side
//! channel — the in-memory state is the source of truth for a session.
//!
//! UI layers talk to one [`Backend`] instance; there are no ambient
//! singletons.

use anyhow::Result;
use log::info;
use std::path::Path;
use std::sync::Arc;

pub mod domain;
pub mod storage;

pub use storage::json::JsonConnection;

use domain::commands::entries::AddEntryCommand;
use domain::commands::queue::OpenQueuedCommand;
use shared::AngpaoEntry;

/// Main backend struct that orchestrates all services over one storage
/// connection. Lifecycle is tied to the application session: construct at
/// startup, drop at exit.
pub struct Backend {
    pub entry_service: domain::EntryService<JsonConnection>,
    pub queue_service: domain::QueueService<JsonConnection>,
    pub settings_service: domain::SettingsService<JsonConnection>,
    pub export_service: domain::ExportService,
}

impl Backend {
    /// Create a backend over an explicit data directory.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        Self::with_connection(JsonConnection::new(data_dir)?)
    }

    /// Create a backend in the platform's default data directory.
    pub fn new_default() -> Result<Self> {
        Self::with_connection(JsonConnection::new_default()?)
    }

    fn with_connection(connection: JsonConnection) -> Result<Self> {
        info!(
            "Backend starting with data directory {}",
            connection.base_directory().display()
        );
        let connection = Arc::new(connection);

        Ok(Backend {
            entry_service: domain::EntryService::new(connection.clone()),
            queue_service: domain::QueueService::new(connection.clone()),
            settings_service: domain::SettingsService::new(connection),
            export_service: domain::ExportService::new(),
        })
    }

    /// Convert a queued (unopened) angpao into a recorded entry once its
    /// amount is known. The giver name carries over from the queued item.
    /// Returns `None` when the queued id is unknown; the queue is only
    /// consumed after the entry is recorded successfully.
    pub fn open_queued(&self, command: OpenQueuedCommand) -> Result<Option<AngpaoEntry>> {
        let Some(queued) = self.queue_service.remove_from_queue(&command.queued_id) else {
            return Ok(None);
        };

        let entry = self.entry_service.add_entry(AddEntryCommand {
            amount: command.amount,
            from: queued.from.clone(),
            category: command.category,
            chor: command.chor,
            note: command.note,
        });

        match entry {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                // Put the placeholder back unchanged so a validation
                // failure loses neither the photo nor the item's identity.
                self.queue_service.requeue(queued);
                Err(e)
            }
        }
    }
}
