//! Savings tip generation
//!
//! A fixed, ordered rule set evaluated against the expense collection. The
//! first four rules look at spending patterns; the fifth is an encouragement
//! fallback emitted only when none of the others fire. Tips are advisory
//! text, never mutations.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Category, ExpenseRecord};

/// Monthly dining spend above which the dining tip fires
const DINING_THRESHOLD: f64 = 100.0;
/// Monthly transportation spend above which the transit tip fires
const TRANSPORT_THRESHOLD: f64 = 80.0;
/// Monthly entertainment spend above which the entertainment tip fires
const ENTERTAINMENT_THRESHOLD: f64 = 50.0;
/// Assumed achievable reduction on dining spend
const DINING_SAVINGS_RATE: f64 = 0.3;

/// Description substrings that mark an expense as a recurring subscription
const SUBSCRIPTION_KEYWORDS: [&str; 3] = ["subscription", "netflix", "spotify"];

/// Kinds of savings tips that can be generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipKind {
    /// Dining spend is high this month
    Dining,
    /// Transportation spend is high this month
    Transportation,
    /// Entertainment spend is high this month
    Entertainment,
    /// Recurring subscription charges were found
    Subscriptions,
    /// Nothing to flag; keep logging expenses
    Encouragement,
}

impl TipKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipKind::Dining => "dining",
            TipKind::Transportation => "transportation",
            TipKind::Entertainment => "entertainment",
            TipKind::Subscriptions => "subscriptions",
            TipKind::Encouragement => "encouragement",
        }
    }
}

impl fmt::Display for TipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One piece of savings advice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tip {
    pub kind: TipKind,
    pub title: String,
    pub message: String,
    /// Estimated monthly saving, where the rule can quantify one
    pub savings_estimate: Option<f64>,
}

fn monthly_category_total(
    records: &[ExpenseRecord],
    year: i32,
    month: u32,
    category: Category,
) -> f64 {
    records
        .iter()
        .filter(|r| r.date.year() == year && r.date.month() == month && r.category == category)
        .map(|r| r.amount)
        .sum()
}

/// Run the rule set over the collection for the month given by `year`/`month`
///
/// Rules 1 through 3 are scoped to that month; the subscription scan covers
/// the whole collection regardless of date. Output order matches rule order.
pub fn savings_tips(records: &[ExpenseRecord], year: i32, month: u32) -> Vec<Tip> {
    let mut tips = Vec::new();

    let dining = monthly_category_total(records, year, month, Category::FoodDining);
    if dining > DINING_THRESHOLD {
        let estimate = dining * DINING_SAVINGS_RATE;
        tips.push(Tip {
            kind: TipKind::Dining,
            title: "Reduce Dining Out".to_string(),
            message: format!(
                "You've spent ${:.2} on dining this month. Cooking at home more often could save you ${:.2}.",
                dining, estimate
            ),
            savings_estimate: Some(estimate),
        });
    }

    let transport = monthly_category_total(records, year, month, Category::Transportation);
    if transport > TRANSPORT_THRESHOLD {
        tips.push(Tip {
            kind: TipKind::Transportation,
            title: "Transportation Savings".to_string(),
            message: format!(
                "You've spent ${:.2} on transportation this month. Consider carpooling or public transit.",
                transport
            ),
            savings_estimate: None,
        });
    }

    let entertainment = monthly_category_total(records, year, month, Category::Entertainment);
    if entertainment > ENTERTAINMENT_THRESHOLD {
        tips.push(Tip {
            kind: TipKind::Entertainment,
            title: "Entertainment Budget".to_string(),
            message: format!(
                "You've spent ${:.2} on entertainment this month. Look for free local events.",
                entertainment
            ),
            savings_estimate: None,
        });
    }

    let subscription_total: f64 = records
        .iter()
        .filter(|r| {
            let description = r.description.to_lowercase();
            SUBSCRIPTION_KEYWORDS
                .iter()
                .any(|keyword| description.contains(keyword))
        })
        .map(|r| r.amount)
        .sum();
    if subscription_total > 0.0 {
        tips.push(Tip {
            kind: TipKind::Subscriptions,
            title: "Review Subscriptions".to_string(),
            message: format!(
                "You have ${:.2} in subscription services. Cancel any you don't use regularly.",
                subscription_total
            ),
            savings_estimate: None,
        });
    }

    if tips.is_empty() {
        tips.push(Tip {
            kind: TipKind::Encouragement,
            title: "Keep Tracking!".to_string(),
            message: "Your spending looks balanced. Keep logging expenses to stay on top of it."
                .to_string(),
            savings_estimate: None,
        });
    }

    tips
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, description: &str, amount: f64, category: Category, date: &str) -> ExpenseRecord {
        ExpenseRecord {
            id,
            user_id: 1,
            description: description.to_string(),
            amount,
            category,
            date: date.parse().unwrap(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_dining_tip_with_estimate() {
        // Spec scenario: 120 dining + 20 transportation in the month
        let records = vec![
            record(2, "Bus pass", 20.0, Category::Transportation, "2025-09-05"),
            record(1, "Restaurants", 120.0, Category::FoodDining, "2025-09-02"),
        ];
        let tips = savings_tips(&records, 2025, 9);
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].kind, TipKind::Dining);
        assert_eq!(tips[0].savings_estimate, Some(36.0));
    }

    #[test]
    fn test_thresholds_are_strict() {
        let records = vec![
            record(1, "Restaurants", 100.0, Category::FoodDining, "2025-09-02"),
            record(2, "Gas", 80.0, Category::Transportation, "2025-09-03"),
            record(3, "Cinema", 50.0, Category::Entertainment, "2025-09-04"),
        ];
        let tips = savings_tips(&records, 2025, 9);
        // Spending exactly at a threshold does not fire the rule
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].kind, TipKind::Encouragement);
    }

    #[test]
    fn test_rules_scoped_to_given_month() {
        let records = vec![record(
            1,
            "Restaurants",
            500.0,
            Category::FoodDining,
            "2025-08-15",
        )];
        let tips = savings_tips(&records, 2025, 9);
        assert_eq!(tips[0].kind, TipKind::Encouragement);
    }

    #[test]
    fn test_subscription_scan_ignores_month() {
        let records = vec![record(
            1,
            "Netflix renewal",
            15.0,
            Category::Entertainment,
            "2024-01-01",
        )];
        let tips = savings_tips(&records, 2025, 9);
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].kind, TipKind::Subscriptions);
        assert!(tips[0].message.contains("$15.00"));
    }

    #[test]
    fn test_subscription_keyword_match_is_case_insensitive() {
        let records = vec![
            record(1, "SPOTIFY Premium", 10.0, Category::Entertainment, "2025-09-01"),
            record(2, "Gym subscription", 30.0, Category::Healthcare, "2025-09-02"),
        ];
        let tips = savings_tips(&records, 2025, 9);
        assert_eq!(tips[0].kind, TipKind::Subscriptions);
        assert!(tips[0].message.contains("$40.00"));
    }

    #[test]
    fn test_encouragement_only_when_all_rules_silent() {
        let tips = savings_tips(&[], 2025, 9);
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].kind, TipKind::Encouragement);

        let records = vec![record(
            1,
            "Restaurants",
            150.0,
            Category::FoodDining,
            "2025-09-02",
        )];
        let tips = savings_tips(&records, 2025, 9);
        assert!(tips.iter().all(|t| t.kind != TipKind::Encouragement));
    }

    #[test]
    fn test_tip_order_matches_rule_order() {
        let records = vec![
            record(1, "Netflix", 20.0, Category::Entertainment, "2025-09-01"),
            record(2, "Concert", 60.0, Category::Entertainment, "2025-09-02"),
            record(3, "Gas", 90.0, Category::Transportation, "2025-09-03"),
            record(4, "Restaurants", 150.0, Category::FoodDining, "2025-09-04"),
        ];
        let tips = savings_tips(&records, 2025, 9);
        let kinds: Vec<TipKind> = tips.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TipKind::Dining,
                TipKind::Transportation,
                TipKind::Entertainment,
                TipKind::Subscriptions,
            ]
        );
    }
}
