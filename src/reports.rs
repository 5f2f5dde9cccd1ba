//! Dashboard metrics and descriptive statistics
//!
//! Every function here is a pure, read-only consumer of a collection
//! snapshot (`Database::list_expenses` output, storage order). Derived views
//! are recomputed from the full collection after each mutation; nothing is
//! cached or patched incrementally.
//!
//! Tie-breaking is deliberate: totals accumulate in first-appearance order
//! over the snapshot, and maxima keep the first entry encountered, so results
//! are deterministic for any given storage order.

use chrono::{Datelike, NaiveDate};

use crate::models::{Category, DashboardSummary, ExpenseRecord, ExpenseStats};

/// Sum amounts grouped by an arbitrary key, preserving first-appearance order
pub(crate) fn totals_by<K, F>(records: &[ExpenseRecord], key: F) -> Vec<(K, f64)>
where
    K: PartialEq,
    F: Fn(&ExpenseRecord) -> K,
{
    let mut totals: Vec<(K, f64)> = Vec::new();
    for record in records {
        let k = key(record);
        match totals.iter_mut().find(|(existing, _)| *existing == k) {
            Some((_, total)) => *total += record.amount,
            None => totals.push((k, record.amount)),
        }
    }
    totals
}

/// First entry holding the maximum total (strict comparison, so ties keep
/// the earliest entry)
fn first_max<K>(totals: &[(K, f64)]) -> Option<&(K, f64)> {
    let mut best: Option<&(K, f64)> = None;
    for entry in totals {
        match best {
            Some(current) if entry.1 > current.1 => best = Some(entry),
            None => best = Some(entry),
            _ => {}
        }
    }
    best
}

/// Sum over the full collection. Zero for an empty collection and invariant
/// under reordering.
pub fn total(records: &[ExpenseRecord]) -> f64 {
    records.iter().map(|r| r.amount).sum()
}

/// Sum over one calendar month
pub fn monthly_total(records: &[ExpenseRecord], year: i32, month: u32) -> f64 {
    records
        .iter()
        .filter(|r| r.date.year() == year && r.date.month() == month)
        .map(|r| r.amount)
        .sum()
}

/// Running daily average for the month of the reference date: the month's
/// total divided by the current day of month. Skewed early in a month by
/// construction; day-of-month is at least 1 so division is always defined.
pub fn daily_average(records: &[ExpenseRecord], today: NaiveDate) -> f64 {
    monthly_total(records, today.year(), today.month()) / f64::from(today.day())
}

/// Category with the highest summed amount over the full collection
pub fn top_category(records: &[ExpenseRecord]) -> Option<Category> {
    let totals = totals_by(records, |r| r.category);
    first_max(&totals).map(|(category, _)| *category)
}

/// The four dashboard stat-card values, with `today` as the reference date
pub fn dashboard(records: &[ExpenseRecord], today: NaiveDate) -> DashboardSummary {
    DashboardSummary {
        total: total(records),
        monthly_total: monthly_total(records, today.year(), today.month()),
        daily_average: daily_average(records, today),
        top_category: top_category(records),
    }
}

/// Descriptive statistics over the full collection
///
/// An empty collection yields the zeroed/`None` sentinel struct, never an
/// error.
pub fn descriptive_stats(records: &[ExpenseRecord]) -> ExpenseStats {
    let mut highest: Option<&ExpenseRecord> = None;
    for record in records {
        match highest {
            Some(current) if record.amount > current.amount => highest = Some(record),
            None => highest = Some(record),
            _ => {}
        }
    }

    let day_totals = totals_by(records, |r| r.date);

    let average = if records.is_empty() {
        0.0
    } else {
        total(records) / records.len() as f64
    };

    ExpenseStats {
        highest_expense: highest.cloned(),
        highest_spending_day: first_max(&day_totals).map(|(date, _)| *date),
        most_expensive_category: top_category(records),
        average_expense: average,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, amount: f64, category: Category, date: &str) -> ExpenseRecord {
        ExpenseRecord {
            id,
            user_id: 1,
            description: format!("expense {}", id),
            amount,
            category,
            date: date.parse().unwrap(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_total_empty_and_reorder_invariant() {
        assert_eq!(total(&[]), 0.0);

        let mut records = vec![
            record(1, 10.0, Category::Shopping, "2025-09-01"),
            record(2, 20.0, Category::Travel, "2025-09-02"),
            record(3, 5.5, Category::Other, "2025-08-30"),
        ];
        let forward = total(&records);
        records.reverse();
        assert_eq!(total(&records), forward);
        assert!((forward - 35.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_monthly_total_scopes_to_calendar_month() {
        let records = vec![
            record(1, 100.0, Category::FoodDining, "2025-09-15"),
            record(2, 50.0, Category::FoodDining, "2025-08-15"),
            record(3, 25.0, Category::Travel, "2025-09-01"),
        ];
        assert_eq!(monthly_total(&records, 2025, 9), 125.0);
        assert_eq!(monthly_total(&records, 2025, 8), 50.0);
        assert_eq!(monthly_total(&records, 2025, 7), 0.0);
    }

    #[test]
    fn test_daily_average_divides_by_day_of_month() {
        let records = vec![
            record(1, 120.0, Category::FoodDining, "2025-09-03"),
            record(2, 30.0, Category::Shopping, "2025-09-10"),
        ];
        let today: NaiveDate = "2025-09-15".parse().unwrap();
        let avg = daily_average(&records, today);
        assert!((avg - 150.0 / 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_category_tie_keeps_first_encountered() {
        // Snapshot is storage order (newest first); Travel appears before
        // Shopping and they tie, so Travel wins.
        let records = vec![
            record(3, 40.0, Category::Travel, "2025-09-03"),
            record(2, 40.0, Category::Shopping, "2025-09-02"),
            record(1, 10.0, Category::Other, "2025-09-01"),
        ];
        assert_eq!(top_category(&records), Some(Category::Travel));
    }

    #[test]
    fn test_top_category_empty_is_none() {
        assert_eq!(top_category(&[]), None);
    }

    #[test]
    fn test_dashboard_scenario() {
        // Spec scenario: Food & Dining 120 + Transportation 20 in month M
        let records = vec![
            record(2, 20.0, Category::Transportation, "2025-09-05"),
            record(1, 120.0, Category::FoodDining, "2025-09-02"),
        ];
        let today: NaiveDate = "2025-09-10".parse().unwrap();
        let summary = dashboard(&records, today);
        assert_eq!(summary.monthly_total, 140.0);
        assert_eq!(summary.top_category, Some(Category::FoodDining));
        assert!((summary.daily_average - 14.0).abs() < 1e-9);
    }

    #[test]
    fn test_descriptive_stats_empty_sentinel() {
        let stats = descriptive_stats(&[]);
        assert!(stats.highest_expense.is_none());
        assert!(stats.highest_spending_day.is_none());
        assert!(stats.most_expensive_category.is_none());
        assert_eq!(stats.average_expense, 0.0);
    }

    #[test]
    fn test_descriptive_stats_populated() {
        let records = vec![
            record(3, 15.0, Category::Entertainment, "2025-09-02"),
            record(2, 60.0, Category::Travel, "2025-09-02"),
            record(1, 25.0, Category::FoodDining, "2025-09-01"),
        ];
        let stats = descriptive_stats(&records);
        assert_eq!(stats.highest_expense.as_ref().map(|r| r.id), Some(2));
        // 2025-09-02 totals 75.0 vs 25.0
        assert_eq!(
            stats.highest_spending_day,
            Some("2025-09-02".parse().unwrap())
        );
        assert_eq!(stats.most_expensive_category, Some(Category::Travel));
        assert!((stats.average_expense - 100.0 / 3.0).abs() < 1e-9);
    }
}
