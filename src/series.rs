//! Chart-ready series derived from the expense collection
//!
//! Like the dashboard metrics, these are pure functions over a collection
//! snapshot and are rebuilt in full whenever the underlying data changes.

use chrono::Datelike;

use crate::models::{CategorySlice, ExpenseRecord, MonthlyPoint, TrendPoint};
use crate::reports::totals_by;

/// Per-category totals over the full collection, in first-appearance order.
/// Categories with no spending are absent rather than listed at zero.
pub fn category_series(records: &[ExpenseRecord]) -> Vec<CategorySlice> {
    totals_by(records, |r| r.category)
        .into_iter()
        .map(|(category, total)| CategorySlice { category, total })
        .collect()
}

/// Day-by-day totals for one calendar month, zero-filled from day 1 through
/// `days`. Callers rendering the current month pass today's day of month so
/// the trend stops at the present rather than running to month end.
pub fn daily_trend(
    records: &[ExpenseRecord],
    year: i32,
    month: u32,
    days: u32,
) -> Vec<TrendPoint> {
    (1..=days)
        .map(|day| {
            let total = records
                .iter()
                .filter(|r| r.date.year() == year && r.date.month() == month && r.date.day() == day)
                .map(|r| r.amount)
                .sum();
            TrendPoint { day, total }
        })
        .collect()
}

/// Month-by-month totals in ascending chronological order, truncated to the
/// most recent six months that have any spending. Months with no records do
/// not appear, so the series may span gaps.
pub fn monthly_series(records: &[ExpenseRecord]) -> Vec<MonthlyPoint> {
    let mut totals = totals_by(records, |r| r.date.format("%Y-%m").to_string());
    // "YYYY-MM" keys sort lexicographically in chronological order
    totals.sort_by(|a, b| a.0.cmp(&b.0));
    let skip = totals.len().saturating_sub(6);
    totals
        .into_iter()
        .skip(skip)
        .map(|(month, total)| MonthlyPoint { month, total })
        .collect()
}
