//! Tally Core Library
//!
//! Expense data and analytics engine for a personal expense tracker:
//! - Per-user expense record store with pooled in-memory SQLite
//! - Filtered, sorted views over a user's collection
//! - Dashboard aggregates and descriptive statistics
//! - Chart-ready category, daily, and monthly series
//! - Rule-based savings tips
//! - Registration, login, and session handling

pub mod auth;
pub mod db;
pub mod error;
pub mod insights;
pub mod models;
pub mod reports;
pub mod series;

pub use auth::{password_strength, Authenticator, PasswordStrength, Registration};
pub use db::{Database, ExpenseFilter};
pub use error::{Error, Result};
pub use insights::{savings_tips, Tip, TipKind};
pub use models::{
    Category, CategorySlice, DashboardSummary, ExpenseRecord, ExpenseStats, MonthlyPoint,
    NewExpense, Session, TrendPoint, User,
};
pub use reports::{daily_average, dashboard, descriptive_stats, monthly_total, top_category, total};
pub use series::{category_series, daily_trend, monthly_series};
