//! Expense filter builder for constructing dynamic queries
//!
//! Builds the WHERE clause and parameters for the filtered transaction view.
//! All active predicates are combined with AND; the fixed ORDER BY returns
//! the most recent date first and falls back to insertion order, so records
//! sharing a date keep their original relative order.

use chrono::NaiveDate;

use super::Database;
use crate::error::Result;
use crate::models::{Category, ExpenseRecord};

/// Builder for a filtered view over one user's collection
///
/// The lifetime `'query` represents how long the search text must remain
/// valid.
pub struct ExpenseFilter<'query> {
    user_id: i64,
    search: Option<&'query str>,
    category: Option<Category>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
}

/// Result of building a filter - contains SQL components and parameters
pub struct FilterResult {
    /// WHERE clause including the "WHERE" keyword
    pub where_clause: String,
    /// ORDER BY clause including the "ORDER BY" keyword
    pub order_clause: &'static str,
    /// Parameters for the query (boxed for rusqlite compatibility)
    pub params: Vec<Box<dyn rusqlite::ToSql>>,
}

impl<'query> ExpenseFilter<'query> {
    /// Create a filter scoped to one user's collection
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            search: None,
            category: None,
            date_from: None,
            date_to: None,
        }
    }

    /// Set search text (case-insensitive substring over description,
    /// category, and notes; blank disables)
    pub fn search(mut self, query: Option<&'query str>) -> Self {
        self.search = query;
        self
    }

    /// Set exact category match
    pub fn category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    /// Set inclusive lower date bound
    pub fn date_from(mut self, from: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self
    }

    /// Set inclusive upper date bound
    pub fn date_to(mut self, to: Option<NaiveDate>) -> Self {
        self.date_to = to;
        self
    }

    /// Build the filter components
    pub fn build(self) -> FilterResult {
        let mut conditions = vec!["e.user_id = ?".to_string()];
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(self.user_id)];

        // Search filter (description, category, and notes; ANY field matches).
        // LIKE is already case-insensitive for ASCII. Wildcard characters in
        // the user's text must match literally, hence the ESCAPE clause.
        if let Some(q) = self.search {
            if !q.trim().is_empty() {
                conditions.push(
                    "(e.description LIKE ? ESCAPE '\\' \
                     OR e.category LIKE ? ESCAPE '\\' \
                     OR e.notes LIKE ? ESCAPE '\\')"
                        .to_string(),
                );
                let escaped = q
                    .trim()
                    .replace('\\', "\\\\")
                    .replace('%', "\\%")
                    .replace('_', "\\_");
                let pattern = format!("%{}%", escaped);
                params.push(Box::new(pattern.clone()));
                params.push(Box::new(pattern.clone()));
                params.push(Box::new(pattern));
            }
        }

        // Category filter (exact)
        if let Some(cat) = self.category {
            conditions.push("e.category = ?".to_string());
            params.push(Box::new(cat.as_str().to_string()));
        }

        // Date bounds. ISO date text compares lexicographically, which
        // matches chronological order.
        if let Some(from) = self.date_from {
            conditions.push("e.date >= ?".to_string());
            params.push(Box::new(from.to_string()));
        }
        if let Some(to) = self.date_to {
            conditions.push("e.date <= ?".to_string());
            params.push(Box::new(to.to_string()));
        }

        FilterResult {
            where_clause: format!("WHERE {}", conditions.join(" AND ")),
            order_clause: "ORDER BY e.date DESC, e.seq DESC",
            params,
        }
    }
}

impl FilterResult {
    /// Get parameter references for query execution
    pub fn params_refs(&self) -> Vec<&dyn rusqlite::ToSql> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }
}

impl Database {
    /// Filtered, sorted view of a user's collection
    ///
    /// An empty result is a valid outcome, not an error; the consumer renders
    /// an empty-state indicator.
    pub fn search_expenses(&self, filter: ExpenseFilter<'_>) -> Result<Vec<ExpenseRecord>> {
        let conn = self.conn()?;
        let filter = filter.build();

        let sql = format!(
            r#"
            SELECT e.id, e.user_id, e.description, e.amount, e.category, e.date, e.notes
            FROM expenses e
            {}
            {}
            "#,
            filter.where_clause, filter.order_clause
        );

        let mut stmt = conn.prepare(&sql)?;
        let params_refs = filter.params_refs();

        let expenses = stmt
            .query_map(params_refs.as_slice(), |row| Self::row_to_expense(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(expenses)
    }
}
