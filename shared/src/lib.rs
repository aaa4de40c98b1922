use serde::{Deserialize, Serialize};
use std::fmt;

/// Angpao entry ID in format: "angpao-<epoch_millis>-<hex_suffix>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AngpaoEntry {
    pub id: String,
    /// Gift amount in whole currency units (always positive)
    pub amount: i64,
    /// Giver name, trimmed at entry time (free text)
    pub from: String,
    /// Relationship of the giver
    pub category: Category,
    /// Festival day index, 1..=15 ("chor")
    pub chor: u8,
    /// Calendar date of the gift (ISO 8601, YYYY-MM-DD)
    pub date: String,
    /// Creation timestamp in epoch milliseconds, used only for recency ordering
    pub created_at: i64,
    /// Optional free-text note; absent rather than empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Fixed classification of the giver's relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Paternal side of the family
    Father,
    /// Maternal side of the family
    Mother,
    Friends,
    Others,
}

impl Category {
    /// All categories in canonical display order
    pub fn all() -> [Category; 4] {
        [
            Category::Father,
            Category::Mother,
            Category::Friends,
            Category::Others,
        ]
    }

    pub fn label_en(&self) -> &'static str {
        match self {
            Category::Father => "Father's Side",
            Category::Mother => "Mother's Side",
            Category::Friends => "Friends",
            Category::Others => "Others",
        }
    }

    pub fn label_zh(&self) -> &'static str {
        match self {
            Category::Father => "父方",
            Category::Mother => "母方",
            Category::Friends => "朋友",
            Category::Others => "其他",
        }
    }
}

/// UI language preference, persisted alongside the entry data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

/// A received-but-unopened angpao: only a photo and the giver are known
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedAngpao {
    pub id: String,
    /// Opaque encoded image blob (e.g. a data URL); never interpreted here
    pub photo: String,
    pub from: String,
    pub created_at: i64,
}

/// Per-giver aggregate used by the rankings screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub name: String,
    pub total: i64,
    pub count: usize,
    /// Largest single amount received from this giver
    pub biggest: i64,
}

/// Per-category aggregate used by the breakdown chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: Category,
    pub total: i64,
    /// Share of the grand total, rounded to whole percent
    pub percentage: u32,
    pub count: usize,
}

/// One slot of the 15-day cumulative series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub chor: u8,
    /// Calendar date for this chor (ISO 8601, YYYY-MM-DD)
    pub date: String,
    pub total: i64,
    /// Running sum of totals from chor 1 through this one
    pub cumulative: i64,
    pub count: usize,
}

impl AngpaoEntry {
    /// Generate a unique entry ID from the creation timestamp.
    /// Format: angpao-<epoch_millis>-<hex_suffix>
    pub fn generate_id(epoch_millis: i64) -> String {
        format!("angpao-{}-{}", epoch_millis, random_hex_suffix(4))
    }

    /// Parse an entry ID to extract its creation timestamp.
    pub fn parse_id(id: &str) -> Result<i64, EntryIdError> {
        parse_prefixed_id(id, "angpao")
    }

    /// Extract the epoch timestamp embedded in this entry's ID.
    pub fn extract_timestamp(&self) -> Result<i64, EntryIdError> {
        Self::parse_id(&self.id)
    }
}

impl QueuedAngpao {
    /// Generate a unique queued-item ID from the creation timestamp.
    /// Format: queued-<epoch_millis>-<hex_suffix>
    pub fn generate_id(epoch_millis: i64) -> String {
        format!("queued-{}-{}", epoch_millis, random_hex_suffix(4))
    }

    /// Parse a queued-item ID to extract its creation timestamp.
    pub fn parse_id(id: &str) -> Result<i64, EntryIdError> {
        parse_prefixed_id(id, "queued")
    }
}

fn parse_prefixed_id(id: &str, prefix: &str) -> Result<i64, EntryIdError> {
    let parts: Vec<&str> = id.split('-').collect();
    if parts.len() != 3 || parts[0] != prefix {
        return Err(EntryIdError::InvalidFormat);
    }
    parts[1]
        .parse::<i64>()
        .map_err(|_| EntryIdError::InvalidTimestamp)
}

/// Derive a short hex suffix from the clock's sub-millisecond bits.
fn random_hex_suffix(len: usize) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    format!("{:0len$x}", nanos % (16_u128.pow(len as u32)), len = len)
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntryIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for EntryIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryIdError::InvalidFormat => write!(f, "Invalid entry ID format"),
            EntryIdError::InvalidTimestamp => write!(f, "Invalid timestamp in entry ID"),
        }
    }
}

impl std::error::Error for EntryIdError {}
