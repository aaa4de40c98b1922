//! # Domain Module
//!
//! Contains all business logic for the angpao tracker.
//!
//! This module encapsulates the core rules and services that define how
//! angpao entries are recorded, aggregated, and managed. It operates
//! independently of any specific UI framework or storage mechanism.
//!
//! ## Module Organization
//!
//! - **chor_calendar**: The fixed festival-window calendar (chor 1..15 ↔ dates)
//! - **stats**: Pure aggregation functions over an entry snapshot
//! - **entry_service**: The entry store — CRUD, import, derived reads
//! - **queue_service**: Placeholders for unopened angpao
//! - **settings_service**: Persisted language preference
//! - **export_service**: JSON backup export and strict import parsing
//! - **commands**: Domain-level command/query structs
//! - **capabilities**: Trait seams for external collaborators
//!
//! ## Design Principles
//!
//! - **Pure statistics**: every derived value is recomputed from the
//!   current snapshot; no caching, no hidden state
//! - **Storage agnostic**: services work against the storage traits
//! - **Nothing fatal**: bad input is a no-op, an `Option::None`, or a
//!   typed error — never a panic

pub mod capabilities;
pub mod chor_calendar;
pub mod commands;
pub mod entry_service;
pub mod export_service;
pub mod queue_service;
pub mod settings_service;
pub mod stats;

pub use entry_service::EntryService;
pub use export_service::{ExportService, ImportError};
pub use queue_service::QueueService;
pub use settings_service::SettingsService;
