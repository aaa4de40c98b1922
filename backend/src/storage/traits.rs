//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.
//!
//! Persistence is a best-effort side channel: the services hold the
//! authoritative in-memory state, load once on startup, and write through
//! after each mutation. Implementations report failures via `Result`; the
//! domain layer decides whether a failure blocks the caller (it never does).

use anyhow::Result;
use shared::{AngpaoEntry, Language, QueuedAngpao};

/// Interface for persisting the main entry collection.
///
/// The whole collection is written as one value: at the expected scale
/// (tens to low hundreds of entries per season) incremental updates are
/// not worth the complexity.
pub trait EntryStorage: Send + Sync {
    /// Load the persisted entry collection.
    ///
    /// A missing or unreadable value falls back to an empty collection;
    /// only infrastructure-level failures (e.g. an unreadable data
    /// directory) surface as errors.
    fn load_entries(&self) -> Result<Vec<AngpaoEntry>>;

    /// Replace the persisted entry collection.
    fn save_entries(&self, entries: &[AngpaoEntry]) -> Result<()>;
}

/// Interface for persisting the queued (unopened) collection.
pub trait QueueStorage: Send + Sync {
    /// Load the persisted queue, falling back to empty like [`EntryStorage::load_entries`].
    fn load_queue(&self) -> Result<Vec<QueuedAngpao>>;

    /// Replace the persisted queue.
    fn save_queue(&self, items: &[QueuedAngpao]) -> Result<()>;
}

/// Interface for persisting the language preference.
pub trait SettingsStorage: Send + Sync {
    /// Load the persisted language, falling back to the default.
    fn load_language(&self) -> Result<Language>;

    /// Persist the language preference.
    fn save_language(&self, language: Language) -> Result<()>;
}

/// Trait defining the interface for storage connections
///
/// This trait abstracts away the specific connection type and provides
/// factory methods for creating repositories, so the domain layer can work
/// with any storage backend without knowing the implementation details.
pub trait Connection: Send + Sync + Clone {
    type EntryRepository: EntryStorage;
    type QueueRepository: QueueStorage;
    type SettingsRepository: SettingsStorage;

    fn create_entry_repository(&self) -> Self::EntryRepository;
    fn create_queue_repository(&self) -> Self::QueueRepository;
    fn create_settings_repository(&self) -> Self::SettingsRepository;
}
