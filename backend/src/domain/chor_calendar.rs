//! Festival calendar domain logic for the angpao tracker.
//!
//! Maps calendar dates to the 1..15 day index ("chor") of the festival
//! window and back. The table is fixed at build time for one festival
//! year; changing year means shipping a new table, by design. Out-of-range
//! lookups are `None`, never errors.

use chrono::{Local, NaiveDate};
use shared::Language;

/// First day of the tracked window (chor 1..=15).
pub const FIRST_CHOR: u8 = 1;
/// Last day of the tracked window (the Lantern Festival).
pub const LAST_CHOR: u8 = 15;

/// Calendar dates for chor 1..15, CNY 2025: Jan 29 through Feb 12.
/// Index 0 holds chor 1.
const CHOR_DATES: [&str; 15] = [
    "2025-01-29",
    "2025-01-30",
    "2025-01-31",
    "2025-02-01",
    "2025-02-02",
    "2025-02-03",
    "2025-02-04",
    "2025-02-05",
    "2025-02-06",
    "2025-02-07",
    "2025-02-08",
    "2025-02-09",
    "2025-02-10",
    "2025-02-11",
    "2025-02-12",
];

/// Traditional Chinese day labels, 初一 through 十五.
const CHOR_LABELS_ZH: [&str; 15] = [
    "初一", "初二", "初三", "初四", "初五", "初六", "初七", "初八", "初九", "初十", "十一",
    "十二", "十三", "十四", "十五 (元宵)",
];

/// Map a calendar date to its chor. `None` when the date falls outside
/// the festival window.
pub fn chor_for_date(date: NaiveDate) -> Option<u8> {
    let iso = date.format("%Y-%m-%d").to_string();
    chor_for_date_str(&iso)
}

/// Map an ISO `YYYY-MM-DD` date string to its chor.
pub fn chor_for_date_str(iso_date: &str) -> Option<u8> {
    CHOR_DATES
        .iter()
        .position(|d| *d == iso_date)
        .map(|idx| idx as u8 + 1)
}

/// Chor for the current local date, `None` outside the festival window.
pub fn today_chor() -> Option<u8> {
    chor_for_date(Local::now().date_naive())
}

/// ISO date string for a chor, `None` for out-of-range indices.
pub fn date_for_chor(chor: u8) -> Option<&'static str> {
    if !(FIRST_CHOR..=LAST_CHOR).contains(&chor) {
        return None;
    }
    Some(CHOR_DATES[chor as usize - 1])
}

/// All chors of the window in order, 1 through 15.
pub fn all_chors() -> impl Iterator<Item = u8> {
    FIRST_CHOR..=LAST_CHOR
}

/// Traditional Chinese label for a chor (初一 … 十五).
pub fn chor_label_zh(chor: u8) -> Option<&'static str> {
    if !(FIRST_CHOR..=LAST_CHOR).contains(&chor) {
        return None;
    }
    Some(CHOR_LABELS_ZH[chor as usize - 1])
}

/// Short display date for a chor in the given language, e.g. "Jan 29" or
/// "1月29日".
pub fn format_chor_date(chor: u8, language: Language) -> Option<String> {
    let iso = date_for_chor(chor)?;
    let date = NaiveDate::parse_from_str(iso, "%Y-%m-%d").ok()?;
    let formatted = match language {
        Language::En => date.format("%b %-d").to_string(),
        Language::Zh => date.format("%-m月%-d日").to_string(),
    };
    Some(formatted)
}
