//! Domain models for Tally

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    /// Unique; stored and compared exactly as entered
    pub email: String,
    /// Argon2 PHC string, never the plaintext password
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// The active login session. At most one exists per running instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: i64,
    pub user_name: String,
}

/// Expense categories. Closed set; records never carry a label outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodDining,
    Transportation,
    Shopping,
    Entertainment,
    #[serde(rename = "Bills & Utilities")]
    BillsUtilities,
    Healthcare,
    Travel,
    Education,
    Other,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 9] = [
        Self::FoodDining,
        Self::Transportation,
        Self::Shopping,
        Self::Entertainment,
        Self::BillsUtilities,
        Self::Healthcare,
        Self::Travel,
        Self::Education,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FoodDining => "Food & Dining",
            Self::Transportation => "Transportation",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::BillsUtilities => "Bills & Utilities",
            Self::Healthcare => "Healthcare",
            Self::Travel => "Travel",
            Self::Education => "Education",
            Self::Other => "Other",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Food & Dining" => Ok(Self::FoodDining),
            "Transportation" => Ok(Self::Transportation),
            "Shopping" => Ok(Self::Shopping),
            "Entertainment" => Ok(Self::Entertainment),
            "Bills & Utilities" => Ok(Self::BillsUtilities),
            "Healthcare" => Ok(Self::Healthcare),
            "Travel" => Ok(Self::Travel),
            "Education" => Ok(Self::Education),
            "Other" => Ok(Self::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single expense entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Unique within the owning user's collection only, not globally
    pub id: i64,
    pub user_id: i64,
    pub description: String,
    /// Positive amount; stored as entered, display rounds to 2 decimals
    pub amount: f64,
    pub category: Category,
    pub date: NaiveDate,
    /// Free text, may be empty
    pub notes: String,
}

/// Field set for creating an expense, and for replacing one on update
/// (every field except the id)
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub description: String,
    pub amount: f64,
    pub category: Category,
    pub date: NaiveDate,
    pub notes: String,
}

/// The four dashboard stat-card values
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    /// Sum over the full collection
    pub total: f64,
    /// Sum over the current calendar month
    pub monthly_total: f64,
    /// Running average: monthly total divided by the current day of month
    pub daily_average: f64,
    /// Highest-spending category over the full collection, None when empty
    pub top_category: Option<Category>,
}

/// Descriptive statistics over a full collection.
/// All fields report the empty sentinel (None / 0.0) for an empty collection.
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseStats {
    pub highest_expense: Option<ExpenseRecord>,
    pub highest_spending_day: Option<NaiveDate>,
    pub most_expensive_category: Option<Category>,
    pub average_expense: f64,
}

/// One slice of the category pie chart
#[derive(Debug, Clone, Serialize)]
pub struct CategorySlice {
    pub category: Category,
    pub total: f64,
}

/// One point of the daily spending line chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// Day of month, 1-based
    pub day: u32,
    pub total: f64,
}

/// One bar of the monthly spending chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPoint {
    /// Year-month key in `YYYY-MM` form
    pub month: String,
    pub total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_category_round_trip() {
        for cat in Category::ALL {
            assert_eq!(Category::from_str(cat.as_str()).unwrap(), cat);
        }
    }

    #[test]
    fn test_category_rejects_unknown_label() {
        assert!(Category::from_str("Groceries").is_err());
        assert!(Category::from_str("food & dining").is_err());
    }

    #[test]
    fn test_category_serde_uses_display_labels() {
        let json = serde_json::to_string(&Category::FoodDining).unwrap();
        assert_eq!(json, "\"Food & Dining\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::FoodDining);
    }
}
