//! Expense record CRUD
//!
//! Record ids are assigned `max(existing) + 1` within the owning user's
//! collection (1 when empty). Deleting the highest id therefore frees it for
//! the next create; collections on different users never interact.

use rusqlite::{params, OptionalExtension};

use super::Database;
use crate::error::{Error, Result};
use crate::models::{Category, ExpenseRecord, NewExpense};

impl Database {
    /// Create an expense for a user
    ///
    /// Validates before touching the store: the operation either fully
    /// applies or leaves the collection untouched.
    pub fn create_expense(&self, user_id: i64, new: &NewExpense) -> Result<ExpenseRecord> {
        validate(new)?;

        let conn = self.conn()?;
        let id: i64 = conn.query_row(
            "SELECT COALESCE(MAX(id), 0) + 1 FROM expenses WHERE user_id = ?",
            params![user_id],
            |row| row.get(0),
        )?;

        conn.execute(
            r#"
            INSERT INTO expenses (user_id, id, description, amount, category, date, notes)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                id,
                new.description,
                new.amount,
                new.category.as_str(),
                new.date.to_string(),
                new.notes,
            ],
        )?;

        tracing::debug!(user_id, id, "Expense created");

        Ok(ExpenseRecord {
            id,
            user_id,
            description: new.description.clone(),
            amount: new.amount,
            category: new.category,
            date: new.date,
            notes: new.notes.clone(),
        })
    }

    /// Quick-add path: date defaults to today, notes start empty
    pub fn quick_create_expense(
        &self,
        user_id: i64,
        description: &str,
        amount: f64,
        category: Category,
    ) -> Result<ExpenseRecord> {
        self.create_expense(
            user_id,
            &NewExpense {
                description: description.to_string(),
                amount,
                category,
                date: chrono::Local::now().date_naive(),
                notes: String::new(),
            },
        )
    }

    /// Replace every field of an expense except its id
    pub fn update_expense(
        &self,
        user_id: i64,
        id: i64,
        fields: &NewExpense,
    ) -> Result<ExpenseRecord> {
        validate(fields)?;

        let conn = self.conn()?;
        let updated = conn.execute(
            r#"
            UPDATE expenses
            SET description = ?, amount = ?, category = ?, date = ?, notes = ?
            WHERE user_id = ? AND id = ?
            "#,
            params![
                fields.description,
                fields.amount,
                fields.category.as_str(),
                fields.date.to_string(),
                fields.notes,
                user_id,
                id,
            ],
        )?;

        if updated == 0 {
            return Err(Error::NotFound(format!("Expense not found: {}", id)));
        }

        Ok(ExpenseRecord {
            id,
            user_id,
            description: fields.description.clone(),
            amount: fields.amount,
            category: fields.category,
            date: fields.date,
            notes: fields.notes.clone(),
        })
    }

    /// Delete an expense by id
    pub fn delete_expense(&self, user_id: i64, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM expenses WHERE user_id = ? AND id = ?",
            params![user_id, id],
        )?;

        if deleted == 0 {
            return Err(Error::NotFound(format!("Expense not found: {}", id)));
        }

        tracing::debug!(user_id, id, "Expense deleted");
        Ok(())
    }

    /// Get a single expense by id
    pub fn get_expense(&self, user_id: i64, id: i64) -> Result<Option<ExpenseRecord>> {
        let conn = self.conn()?;
        conn.query_row(
            r#"
            SELECT id, user_id, description, amount, category, date, notes
            FROM expenses WHERE user_id = ? AND id = ?
            "#,
            params![user_id, id],
            |row| Self::row_to_expense(row),
        )
        .optional()
        .map_err(Into::into)
    }

    /// Full unfiltered collection in storage order (most recently added first)
    ///
    /// Unknown users simply have an empty collection; this is not an error.
    pub fn list_expenses(&self, user_id: i64) -> Result<Vec<ExpenseRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, user_id, description, amount, category, date, notes
            FROM expenses WHERE user_id = ?
            ORDER BY seq DESC
            "#,
        )?;

        let expenses = stmt
            .query_map(params![user_id], |row| Self::row_to_expense(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(expenses)
    }

    /// Count a user's expenses
    pub fn count_expenses(&self, user_id: i64) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM expenses WHERE user_id = ?",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Helper to convert a row to ExpenseRecord
    /// Column order: id, user_id, description, amount, category, date, notes
    pub(crate) fn row_to_expense(row: &rusqlite::Row) -> rusqlite::Result<ExpenseRecord> {
        let category_str: String = row.get(4)?;
        let date_str: String = row.get(5)?;
        Ok(ExpenseRecord {
            id: row.get(0)?,
            user_id: row.get(1)?,
            description: row.get(2)?,
            amount: row.get(3)?,
            category: category_str.parse().unwrap_or(Category::Other),
            date: chrono::NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").unwrap_or_default(),
            notes: row.get(6)?,
        })
    }
}

/// Validate an expense payload before any mutation
fn validate(new: &NewExpense) -> Result<()> {
    if new.description.trim().is_empty() {
        return Err(Error::Validation("Description is required".to_string()));
    }
    if !new.amount.is_finite() || new.amount <= 0.0 {
        return Err(Error::Validation(
            "Amount must be a positive number".to_string(),
        ));
    }
    Ok(())
}
