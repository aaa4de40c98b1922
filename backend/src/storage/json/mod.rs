//! # JSON Key-Value Storage Module
//!
//! File-based implementation of the storage traits. The store is a flat
//! key-value layout: one JSON file per storage key, all in a single data
//! directory.
//!
//! ## File Structure
//!
//! ```text
//! data/
//! ├── angpao_entries.json    ← entry collection (JSON array)
//! ├── angpao_queue.json      ← queued/unopened collection (JSON array)
//! └── angpao_language.json   ← language preference (JSON string)
//! ```
//!
//! ## Features
//!
//! - Atomic file writes with temp files
//! - Missing or corrupt values fall back silently to empty/default
//! - Whole-value replacement on every save (no incremental updates)

pub mod connection;
pub mod entry_repository;
pub mod queue_repository;
pub mod settings_repository;

pub use connection::JsonConnection;
pub use entry_repository::EntryRepository;
pub use queue_repository::QueueRepository;
pub use settings_repository::SettingsRepository;

/// Storage key for the entry collection.
pub const ENTRIES_KEY: &str = "angpao_entries";
/// Storage key for the queued/unopened collection.
pub const QUEUE_KEY: &str = "angpao_queue";
/// Storage key for the language preference.
pub const LANGUAGE_KEY: &str = "angpao_language";
