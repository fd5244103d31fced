//! Read-side views over the ledger.
//!
//! Everything here recomputes from the full ledger on each call; there is no
//! cached total to keep in sync.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::ledger::Ledger;

/// Length of the trailing "this week" window, today included.
pub const WEEK_WINDOW_DAYS: i64 = 7;

/// Totals shown on the overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub today: NaiveDate,
    pub today_minutes: i64,
    pub week_start: NaiveDate,
    pub week_minutes: i64,
    pub session_count: usize,
    pub subjects: Vec<String>,
}

/// Sum of durations recorded on `date`, saturating at `i64::MAX`.
pub fn total_minutes(ledger: &Ledger, date: NaiveDate) -> i64 {
    ledger
        .iter()
        .filter(|s| s.date == date)
        .map(|s| s.duration_minutes)
        .fold(0, i64::saturating_add)
}

/// Sum of durations with `start <= date <= end`.
///
/// An inverted window is empty.
pub fn total_minutes_in_window(ledger: &Ledger, start: NaiveDate, end: NaiveDate) -> i64 {
    ledger
        .iter()
        .filter(|s| s.date >= start && s.date <= end)
        .map(|s| s.duration_minutes)
        .fold(0, i64::saturating_add)
}

/// The trailing week ending on `today`: `today - 6 ..= today`.
///
/// Not aligned to calendar weeks.
pub fn week_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(WEEK_WINDOW_DAYS - 1), today)
}

pub fn total_minutes_this_week(ledger: &Ledger, today: NaiveDate) -> i64 {
    let (start, end) = week_window(today);
    total_minutes_in_window(ledger, start, end)
}

/// Unique subjects in first-seen (ledger) order.
pub fn distinct_subjects(ledger: &Ledger) -> Vec<String> {
    let mut seen = HashSet::new();
    ledger
        .iter()
        .filter(|s| seen.insert(s.subject.as_str()))
        .map(|s| s.subject.to_string())
        .collect()
}

pub fn summarize(ledger: &Ledger, today: NaiveDate) -> Summary {
    let (week_start, week_end) = week_window(today);
    Summary {
        today,
        today_minutes: total_minutes(ledger, today),
        week_start,
        week_minutes: total_minutes_in_window(ledger, week_start, week_end),
        session_count: ledger.len(),
        subjects: distinct_subjects(ledger),
    }
}
