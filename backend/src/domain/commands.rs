//! Domain-level command and query types.
//!
//! These structs are the inputs to the domain services. A UI layer maps
//! its form state onto these before calling in; they are not serialized
//! or exposed outside the process.

pub mod entries {
    use shared::Category;

    /// Input for recording a new entry.
    #[derive(Debug, Clone)]
    pub struct AddEntryCommand {
        /// Gift amount; must be positive, rejected at the save boundary otherwise
        pub amount: i64,
        /// Giver name; trimmed, must be non-empty after trimming
        pub from: String,
        pub category: Category,
        /// Day index override; defaults to today's chor, falling back to 1
        /// outside the festival window
        pub chor: Option<u8>,
        /// Optional note; dropped entirely when it trims to empty
        pub note: Option<String>,
    }

    /// Partial update for an existing entry: only the fields present are
    /// applied. `id` and `created_at` never change.
    ///
    /// `note` is doubly optional: `None` leaves the note alone,
    /// `Some(None)` clears it, `Some(Some(text))` replaces it.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateEntryCommand {
        pub amount: Option<i64>,
        pub from: Option<String>,
        pub category: Option<Category>,
        pub chor: Option<u8>,
        pub note: Option<Option<String>>,
    }
}

pub mod queue {
    use shared::Category;

    /// Input for converting a queued (unopened) angpao into a recorded
    /// entry once the amount is known. The giver name carries over from
    /// the queued item.
    #[derive(Debug, Clone)]
    pub struct OpenQueuedCommand {
        pub queued_id: String,
        pub amount: i64,
        pub category: Category,
        pub chor: Option<u8>,
        pub note: Option<String>,
    }
}
