//! User directory operations

use rusqlite::{params, OptionalExtension};

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::User;

impl Database {
    /// Insert a user and return the assigned id
    ///
    /// `password_hash` must already be an argon2 PHC string; this layer never
    /// sees plaintext credentials. Fails on duplicate email (UNIQUE column).
    pub fn create_user(
        &self,
        full_name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO users (full_name, email, password_hash) VALUES (?, ?, ?)",
            params![full_name, email, password_hash],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Get a user by id
    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id, full_name, email, password_hash, created_at FROM users WHERE id = ?",
            params![id],
            |row| Self::row_to_user(row),
        )
        .optional()
        .map_err(Into::into)
    }

    /// Look up a user by email (exact match, case-sensitive as entered)
    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id, full_name, email, password_hash, created_at FROM users WHERE email = ?",
            params![email],
            |row| Self::row_to_user(row),
        )
        .optional()
        .map_err(Into::into)
    }

    /// List all registered users, oldest first
    pub fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, full_name, email, password_hash, created_at FROM users ORDER BY id",
        )?;
        let users = stmt
            .query_map([], |row| Self::row_to_user(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(users)
    }

    fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
        let created_at_str: String = row.get(4)?;
        Ok(User {
            id: row.get(0)?,
            full_name: row.get(1)?,
            email: row.get(2)?,
            password_hash: row.get(3)?,
            created_at: parse_datetime(&created_at_str),
        })
    }
}
