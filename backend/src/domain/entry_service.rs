//! Entry store domain logic for the angpao tracker.
//!
//! `EntryService` is the single mutable owner of the entry collection.
//! The in-memory collection is the source of truth for the session;
//! persistence is a best-effort write-through after each mutation, and a
//! failed write is logged but never blocks the caller. Every derived
//! read recomputes from the current snapshot via [`crate::domain::stats`].

use anyhow::{anyhow, Result};
use chrono::{Local, Utc};
use log::{info, warn};
use std::sync::{Arc, Mutex};

use shared::{AngpaoEntry, CategoryBreakdown, DailyTotal, RankingEntry};

use crate::domain::chor_calendar::{date_for_chor, today_chor, FIRST_CHOR, LAST_CHOR};
use crate::domain::commands::entries::{AddEntryCommand, UpdateEntryCommand};
use crate::domain::stats;
use crate::storage::traits::{Connection, EntryStorage};

#[derive(Clone)]
pub struct EntryService<C: Connection> {
    entry_repository: Arc<C::EntryRepository>,
    /// Authoritative in-memory collection, most-recent-first.
    entries: Arc<Mutex<Vec<AngpaoEntry>>>,
}

impl<C: Connection> EntryService<C> {
    /// Create the service, loading any persisted entries. A missing or
    /// unreadable store starts the session empty rather than failing.
    pub fn new(connection: Arc<C>) -> Self {
        let entry_repository = connection.create_entry_repository();
        let entries = match entry_repository.load_entries() {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to load persisted entries, starting empty: {e}");
                Vec::new()
            }
        };
        info!("Loaded {} entries", entries.len());

        Self {
            entry_repository: Arc::new(entry_repository),
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    /// Record a new entry. The giver name is trimmed and must be
    /// non-empty; the amount must be positive. When no chor is given,
    /// today's chor is used, falling back to chor 1 outside the festival
    /// window (documented fallback, not an error).
    pub fn add_entry(&self, command: AddEntryCommand) -> Result<AngpaoEntry> {
        if command.amount <= 0 {
            return Err(anyhow!("Amount must be positive"));
        }
        let from = command.from.trim();
        if from.is_empty() {
            return Err(anyhow!("Giver name must not be empty"));
        }
        if let Some(chor) = command.chor {
            if !(FIRST_CHOR..=LAST_CHOR).contains(&chor) {
                return Err(anyhow!("Day index {chor} is outside the festival window"));
            }
        }

        let chor = command.chor.or_else(today_chor).unwrap_or(FIRST_CHOR);
        let date = match date_for_chor(chor) {
            Some(date) => date.to_string(),
            // Explicit chor with no mapped date cannot happen after the
            // range check above; keep the local date as a safety net.
            None => Local::now().date_naive().format("%Y-%m-%d").to_string(),
        };

        let created_at = Utc::now().timestamp_millis();
        let entry = AngpaoEntry {
            id: AngpaoEntry::generate_id(created_at),
            amount: command.amount,
            from: from.to_string(),
            category: command.category,
            chor,
            date,
            created_at,
            note: command
                .note
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(String::from),
        };

        let mut entries = self.entries.lock().unwrap();
        entries.insert(0, entry.clone());
        self.persist(&entries);

        info!("Recorded entry {} ({} from {})", entry.id, entry.amount, entry.from);
        Ok(entry)
    }

    /// Apply a partial update to the entry with the given id. Returns
    /// `false` when no entry matches; an unknown id is a no-op, not an
    /// error. Updated fields obey the same rules as `add_entry`: a
    /// non-positive amount or an out-of-window chor rejects the whole
    /// update without touching the entry.
    pub fn edit_entry(&self, id: &str, update: UpdateEntryCommand) -> bool {
        if update.amount.is_some_and(|amount| amount <= 0) {
            info!("Edit with non-positive amount for entry {id} ignored");
            return false;
        }
        if update
            .chor
            .is_some_and(|chor| !(FIRST_CHOR..=LAST_CHOR).contains(&chor))
        {
            info!("Edit with out-of-window day index for entry {id} ignored");
            return false;
        }

        let mut entries = self.entries.lock().unwrap();
        let Some(entry) = entries.iter_mut().find(|e| e.id == id) else {
            info!("Edit for unknown entry {id} ignored");
            return false;
        };

        if let Some(amount) = update.amount {
            entry.amount = amount;
        }
        if let Some(from) = update.from {
            entry.from = from.trim().to_string();
        }
        if let Some(category) = update.category {
            entry.category = category;
        }
        if let Some(chor) = update.chor {
            entry.chor = chor;
            if let Some(date) = date_for_chor(chor) {
                entry.date = date.to_string();
            }
        }
        if let Some(note) = update.note {
            entry.note = note
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(String::from);
        }

        self.persist(&entries);
        true
    }

    /// Delete the entry with the given id. Returns `false` on a miss.
    pub fn delete_entry(&self, id: &str) -> bool {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        let deleted = entries.len() < before;
        if deleted {
            self.persist(&entries);
            info!("Deleted entry {id}");
        }
        deleted
    }

    /// Wholesale replace the collection with an imported one. Destructive:
    /// no merge and no dedup against existing data. The caller confirms
    /// with the user before invoking.
    pub fn import_entries(&self, imported: Vec<AngpaoEntry>) {
        let mut entries = self.entries.lock().unwrap();
        info!("Importing {} entries, replacing {}", imported.len(), entries.len());
        *entries = imported;
        self.persist(&entries);
    }

    /// Snapshot of the current collection, most-recent-first.
    pub fn entries(&self) -> Vec<AngpaoEntry> {
        self.entries.lock().unwrap().clone()
    }

    // Derived reads: full recomputation over the current snapshot on
    // every call. No incremental aggregation or invalidation.

    pub fn total_amount(&self) -> i64 {
        stats::total_amount(&self.entries.lock().unwrap())
    }

    pub fn today_entries(&self) -> Vec<AngpaoEntry> {
        stats::today_entries(&self.entries.lock().unwrap())
    }

    pub fn rankings(&self) -> Vec<RankingEntry> {
        stats::rankings(&self.entries.lock().unwrap())
    }

    pub fn category_breakdown(&self) -> Vec<CategoryBreakdown> {
        stats::category_breakdown(&self.entries.lock().unwrap())
    }

    pub fn daily_totals(&self) -> Vec<DailyTotal> {
        stats::daily_totals(&self.entries.lock().unwrap())
    }

    pub fn projection(&self) -> i64 {
        stats::projection(&self.entries.lock().unwrap())
    }

    pub fn daily_average(&self) -> i64 {
        stats::daily_average(&self.entries.lock().unwrap())
    }

    pub fn biggest_angpao(&self) -> Option<AngpaoEntry> {
        stats::biggest_angpao(&self.entries.lock().unwrap()).cloned()
    }

    pub fn recent_contacts(&self) -> Vec<String> {
        stats::recent_contacts(&self.entries.lock().unwrap(), stats::RECENT_CONTACTS_LIMIT)
    }

    /// Best-effort write-through. The in-memory state has already changed;
    /// a storage failure is diagnostic only and must not block the caller.
    fn persist(&self, entries: &[AngpaoEntry]) {
        if let Err(e) = self.entry_repository.save_entries(entries) {
            warn!("Failed to persist entries (continuing in-memory): {e}");
        }
    }
}
