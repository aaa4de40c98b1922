//! Statistics engine for the angpao tracker.
//!
//! Every function here is pure: it reads one immutable snapshot of the
//! entry collection and returns a freshly computed value. There is no
//! caching or shared state; callers recompute on every read, which is
//! cheap at the expected scale of tens to low hundreds of entries.
//!
//! Empty input always yields the identity value (0, empty, or `None`) —
//! nothing in this module errors or panics on unusual data.
//!
//! Ties in `rankings`, `category_breakdown`, and `biggest_angpao` resolve
//! to first occurrence in the snapshot: grouping preserves first-encounter
//! order and the descending sorts are stable.

use std::collections::{HashMap, HashSet};

use shared::{AngpaoEntry, Category, CategoryBreakdown, DailyTotal, RankingEntry};

use crate::domain::chor_calendar::{all_chors, date_for_chor, today_chor};

/// Number of days in the tracked festival window.
pub const FESTIVAL_DAYS: u8 = 15;

/// Default cap for [`recent_contacts`].
pub const RECENT_CONTACTS_LIMIT: usize = 10;

/// Sum of all entry amounts.
pub fn total_amount(entries: &[AngpaoEntry]) -> i64 {
    entries.iter().map(|e| e.amount).sum()
}

/// Entries recorded for a specific chor, in snapshot order.
pub fn entries_for_chor(entries: &[AngpaoEntry], chor: u8) -> Vec<AngpaoEntry> {
    entries.iter().filter(|e| e.chor == chor).cloned().collect()
}

/// Entries recorded for today's chor; empty when the festival window is
/// not active.
pub fn today_entries(entries: &[AngpaoEntry]) -> Vec<AngpaoEntry> {
    match today_chor() {
        Some(chor) => entries_for_chor(entries, chor),
        None => Vec::new(),
    }
}

/// Per-giver totals sorted by total descending.
///
/// Givers are grouped by exact name match; names are trimmed at entry
/// time, not here.
pub fn rankings(entries: &[AngpaoEntry]) -> Vec<RankingEntry> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<&str, (i64, usize, i64)> = HashMap::new();

    for entry in entries {
        let group = groups.entry(&entry.from).or_insert_with(|| {
            order.push(entry.from.clone());
            (0, 0, 0)
        });
        group.0 += entry.amount;
        group.1 += 1;
        group.2 = group.2.max(entry.amount);
    }

    let mut result: Vec<RankingEntry> = order
        .into_iter()
        .map(|name| {
            let (total, count, biggest) = groups[name.as_str()];
            RankingEntry {
                name,
                total,
                count,
                biggest,
            }
        })
        .collect();

    // Stable sort keeps first-encounter order for equal totals
    result.sort_by(|a, b| b.total.cmp(&a.total));
    result
}

/// Per-category totals with whole-percent shares, sorted by total
/// descending. Empty when the grand total is 0 so there is never a
/// division by zero.
pub fn category_breakdown(entries: &[AngpaoEntry]) -> Vec<CategoryBreakdown> {
    let grand_total = total_amount(entries);
    if grand_total == 0 {
        return Vec::new();
    }

    let mut order: Vec<Category> = Vec::new();
    let mut groups: HashMap<Category, (i64, usize)> = HashMap::new();

    for entry in entries {
        let group = groups.entry(entry.category).or_insert_with(|| {
            order.push(entry.category);
            (0, 0)
        });
        group.0 += entry.amount;
        group.1 += 1;
    }

    let mut result: Vec<CategoryBreakdown> = order
        .into_iter()
        .map(|category| {
            let (total, count) = groups[&category];
            CategoryBreakdown {
                category,
                total,
                percentage: (total as f64 / grand_total as f64 * 100.0).round() as u32,
                count,
            }
        })
        .collect();

    result.sort_by(|a, b| b.total.cmp(&a.total));
    result
}

/// Daily totals for the whole window: always exactly 15 records, chor 1
/// through 15 in order. Days without entries have zero total/count and
/// carry the prior cumulative value forward.
pub fn daily_totals(entries: &[AngpaoEntry]) -> Vec<DailyTotal> {
    let mut per_day: HashMap<u8, (i64, usize)> = HashMap::new();
    for entry in entries {
        let day = per_day.entry(entry.chor).or_insert((0, 0));
        day.0 += entry.amount;
        day.1 += 1;
    }

    let mut cumulative = 0;
    all_chors()
        .map(|chor| {
            let (total, count) = per_day.get(&chor).copied().unwrap_or((0, 0));
            cumulative += total;
            DailyTotal {
                chor,
                date: date_for_chor(chor).unwrap_or_default().to_string(),
                total,
                cumulative,
                count,
            }
        })
        .collect()
}

/// Number of distinct chors with at least one entry.
fn distinct_chor_count(entries: &[AngpaoEntry]) -> usize {
    entries.iter().map(|e| e.chor).collect::<HashSet<_>>().len()
}

/// Linear projection of the total across all 15 days: the average over
/// tracked days extrapolated to the full window. A flat extrapolation,
/// not a regression. 0 when there are no entries.
pub fn projection(entries: &[AngpaoEntry]) -> i64 {
    if entries.is_empty() {
        return 0;
    }
    let days_tracked = distinct_chor_count(entries);
    let daily_avg = total_amount(entries) as f64 / days_tracked as f64;
    (daily_avg * f64::from(FESTIVAL_DAYS)).round() as i64
}

/// Average amount per tracked day (distinct chors, not entry count),
/// rounded to whole units. 0 when there are no entries.
pub fn daily_average(entries: &[AngpaoEntry]) -> i64 {
    if entries.is_empty() {
        return 0;
    }
    let days_tracked = distinct_chor_count(entries);
    (total_amount(entries) as f64 / days_tracked as f64).round() as i64
}

/// Entry with the largest amount; the first one encountered wins on ties.
pub fn biggest_angpao(entries: &[AngpaoEntry]) -> Option<&AngpaoEntry> {
    let mut best: Option<&AngpaoEntry> = None;
    for entry in entries {
        match best {
            Some(current) if entry.amount <= current.amount => {}
            _ => best = Some(entry),
        }
    }
    best
}

/// Unique giver names ordered by most recent use (first occurrence after
/// sorting by creation time descending), capped at `limit`.
pub fn recent_contacts(entries: &[AngpaoEntry], limit: usize) -> Vec<String> {
    let mut sorted: Vec<&AngpaoEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut seen: HashSet<&str> = HashSet::new();
    let mut result = Vec::new();
    for entry in sorted {
        if result.len() >= limit {
            break;
        }
        if seen.insert(&entry.from) {
            result.push(entry.from.clone());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(amount: i64, from: &str, category: Category, chor: u8, created_at: i64) -> AngpaoEntry {
        AngpaoEntry {
            id: AngpaoEntry::generate_id(created_at),
            amount,
            from: from.to_string(),
            category,
            chor,
            date: date_for_chor(chor).unwrap_or("2025-01-29").to_string(),
            created_at,
            note: None,
        }
    }

    /// Scenario: two gifts from the same giver on two days.
    fn uncle_tan_entries() -> Vec<AngpaoEntry> {
        vec![
            entry(100, "Uncle Tan", Category::Father, 1, 1_000),
            entry(50, "Uncle Tan", Category::Father, 2, 2_000),
        ]
    }

    #[test]
    fn test_total_amount() {
        assert_eq!(total_amount(&[]), 0);
        assert_eq!(total_amount(&uncle_tan_entries()), 150);
    }

    #[test]
    fn test_single_giver_scenario() {
        let entries = uncle_tan_entries();

        let rankings = rankings(&entries);
        assert_eq!(
            rankings,
            vec![RankingEntry {
                name: "Uncle Tan".to_string(),
                total: 150,
                count: 2,
                biggest: 100,
            }]
        );

        // 150 over 2 tracked days
        assert_eq!(daily_average(&entries), 75);
        assert_eq!(projection(&entries), 1125);
    }

    #[test]
    fn test_empty_collection_yields_identities() {
        let entries: Vec<AngpaoEntry> = Vec::new();
        assert_eq!(total_amount(&entries), 0);
        assert!(rankings(&entries).is_empty());
        assert!(category_breakdown(&entries).is_empty());
        assert_eq!(projection(&entries), 0);
        assert_eq!(daily_average(&entries), 0);
        assert!(biggest_angpao(&entries).is_none());
        assert!(recent_contacts(&entries, RECENT_CONTACTS_LIMIT).is_empty());

        let totals = daily_totals(&entries);
        assert_eq!(totals.len(), 15);
        assert!(totals.iter().all(|d| d.total == 0 && d.count == 0 && d.cumulative == 0));
    }

    #[test]
    fn test_daily_totals_sparse_days() {
        // Amounts 10 and 20 on chor 1, 30 on chor 3
        let entries = vec![
            entry(10, "A", Category::Friends, 1, 1),
            entry(20, "B", Category::Friends, 1, 2),
            entry(30, "C", Category::Friends, 3, 3),
        ];

        let totals = daily_totals(&entries);
        assert_eq!(totals.len(), 15);
        assert_eq!((totals[0].total, totals[0].cumulative, totals[0].count), (30, 30, 2));
        // Empty day inherits the cumulative value
        assert_eq!((totals[1].total, totals[1].cumulative, totals[1].count), (0, 30, 0));
        assert_eq!((totals[2].total, totals[2].cumulative, totals[2].count), (30, 60, 1));
        assert_eq!(totals[14].cumulative, 60);

        // 2 distinct tracked days
        assert_eq!(daily_average(&entries), 30);
    }

    #[test]
    fn test_daily_totals_always_covers_window() {
        let entries = uncle_tan_entries();
        let totals = daily_totals(&entries);
        let chors: Vec<u8> = totals.iter().map(|d| d.chor).collect();
        assert_eq!(chors, (1..=15).collect::<Vec<u8>>());
        assert_eq!(totals[14].cumulative, total_amount(&entries));
        assert_eq!(totals[0].date, "2025-01-29");
        assert_eq!(totals[14].date, "2025-02-12");
    }

    #[test]
    fn test_rankings_sum_matches_total() {
        let entries = vec![
            entry(100, "Uncle Tan", Category::Father, 1, 1),
            entry(60, "Aunt Mei", Category::Mother, 1, 2),
            entry(40, "Uncle Tan", Category::Father, 2, 3),
            entry(5, "Ben", Category::Friends, 3, 4),
        ];
        let rankings = rankings(&entries);
        let sum: i64 = rankings.iter().map(|r| r.total).sum();
        assert_eq!(sum, total_amount(&entries));

        // Sorted descending by total
        assert_eq!(rankings[0].name, "Uncle Tan");
        assert_eq!(rankings[0].total, 140);
        assert_eq!(rankings[1].name, "Aunt Mei");
        assert_eq!(rankings[2].name, "Ben");
    }

    #[test]
    fn test_rankings_tie_keeps_first_occurrence_order() {
        let entries = vec![
            entry(50, "Second", Category::Friends, 1, 1),
            entry(50, "First", Category::Friends, 1, 2),
        ];
        // "Second" appears first in the snapshot, so it wins the tie
        let ranked = rankings(&entries);
        let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Second", "First"]);
    }

    #[test]
    fn test_rankings_names_are_case_sensitive() {
        let entries = vec![
            entry(10, "uncle tan", Category::Father, 1, 1),
            entry(10, "Uncle Tan", Category::Father, 1, 2),
        ];
        assert_eq!(rankings(&entries).len(), 2);
    }

    #[test]
    fn test_category_breakdown_totals_and_percentages() {
        let entries = vec![
            entry(70, "A", Category::Father, 1, 1),
            entry(20, "B", Category::Mother, 1, 2),
            entry(10, "C", Category::Friends, 2, 3),
        ];
        let breakdown = category_breakdown(&entries);
        assert_eq!(breakdown.len(), 3);
        assert_eq!(breakdown[0].category, Category::Father);
        assert_eq!(breakdown[0].percentage, 70);
        assert_eq!(breakdown[1].percentage, 20);
        assert_eq!(breakdown[2].percentage, 10);

        let sum: i64 = breakdown.iter().map(|b| b.total).sum();
        assert_eq!(sum, total_amount(&entries));
    }

    #[test]
    fn test_category_breakdown_percentage_rounding_slack() {
        // 3 equal thirds: 33 + 33 + 33 = 99, one unit below 100
        let entries = vec![
            entry(10, "A", Category::Father, 1, 1),
            entry(10, "B", Category::Mother, 1, 2),
            entry(10, "C", Category::Friends, 1, 3),
        ];
        let breakdown = category_breakdown(&entries);
        let percent_sum: u32 = breakdown.iter().map(|b| b.percentage).sum();
        let categories = breakdown.len() as u32;
        assert!(percent_sum >= 100 - (categories - 1));
        assert!(percent_sum <= 100 + (categories - 1));
    }

    #[test]
    fn test_biggest_angpao_first_max_wins() {
        let first = entry(200, "First", Category::Father, 1, 1);
        let entries = vec![
            first.clone(),
            entry(200, "Second", Category::Mother, 2, 2),
            entry(100, "Third", Category::Friends, 3, 3),
        ];
        assert_eq!(biggest_angpao(&entries), Some(&first));
    }

    #[test]
    fn test_projection_uses_distinct_days_not_max_chor() {
        // Entries only on chor 10: one tracked day, not ten
        let entries = vec![
            entry(30, "A", Category::Friends, 10, 1),
            entry(30, "B", Category::Friends, 10, 2),
        ];
        assert_eq!(daily_average(&entries), 60);
        assert_eq!(projection(&entries), 900);
    }

    #[test]
    fn test_projection_rounds_half_up() {
        // 100 over 3 days = 33.33../day → projection 500, average 33
        let entries = vec![
            entry(40, "A", Category::Friends, 1, 1),
            entry(30, "B", Category::Friends, 2, 2),
            entry(30, "C", Category::Friends, 3, 3),
        ];
        assert_eq!(projection(&entries), 500);
        assert_eq!(daily_average(&entries), 33);
    }

    #[test]
    fn test_recent_contacts_unique_most_recent_first() {
        let entries = vec![
            entry(10, "Old", Category::Friends, 1, 100),
            entry(10, "Repeat", Category::Friends, 1, 200),
            entry(10, "Newest", Category::Friends, 2, 400),
            entry(10, "Repeat", Category::Friends, 2, 300),
        ];
        let contacts = recent_contacts(&entries, RECENT_CONTACTS_LIMIT);
        assert_eq!(contacts, vec!["Newest", "Repeat", "Old"]);
    }

    #[test]
    fn test_recent_contacts_respects_limit() {
        let entries: Vec<AngpaoEntry> = (0..20)
            .map(|i| entry(10, &format!("Giver {i}"), Category::Others, 1, i))
            .collect();
        let contacts = recent_contacts(&entries, 10);
        assert_eq!(contacts.len(), 10);
        assert_eq!(contacts[0], "Giver 19");

        // No duplicates even with repeated givers
        let repeated: Vec<AngpaoEntry> =
            (0..20).map(|i| entry(10, "Same", Category::Others, 1, i)).collect();
        assert_eq!(recent_contacts(&repeated, 10), vec!["Same"]);
    }

    #[test]
    fn test_entries_for_chor() {
        let entries = uncle_tan_entries();
        assert_eq!(entries_for_chor(&entries, 1).len(), 1);
        assert_eq!(entries_for_chor(&entries, 1)[0].amount, 100);
        assert!(entries_for_chor(&entries, 9).is_empty());
    }

    #[test]
    fn test_engine_is_idempotent() {
        let entries = vec![
            entry(100, "Uncle Tan", Category::Father, 1, 1),
            entry(60, "Aunt Mei", Category::Mother, 2, 2),
            entry(60, "Ben", Category::Friends, 2, 3),
        ];
        assert_eq!(rankings(&entries), rankings(&entries));
        assert_eq!(category_breakdown(&entries), category_breakdown(&entries));
        assert_eq!(daily_totals(&entries), daily_totals(&entries));
        assert_eq!(projection(&entries), projection(&entries));
        assert_eq!(recent_contacts(&entries, 10), recent_contacts(&entries, 10));
    }
}
