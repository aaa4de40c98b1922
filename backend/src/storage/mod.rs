//! # Storage Module
//!
//! Persistence layer for the angpao tracker. The domain layer only sees
//! the traits defined in [`traits`]; the concrete implementation is a
//! flat key-value store of JSON files in [`json`].

pub mod json;
pub mod traits;

pub use json::JsonConnection;
pub use traits::{Connection, EntryStorage, QueueStorage, SettingsStorage};
