//! Account registration, login, and session tracking
//!
//! `Authenticator` is the gate in front of the per-user expense data: store
//! and engine calls take a user id that callers obtain from the active
//! session. Passwords are hashed with Argon2id and a per-user random salt;
//! plaintext never touches the store.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use regex::Regex;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{Session, User};

/// Minimum password length accepted at registration
const MIN_PASSWORD_LEN: usize = 8;

/// Input to [`Authenticator::register`]
#[derive(Debug, Clone)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub accepted_terms: bool,
}

/// Password strength as a 0 to 5 score with a display label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrength {
    pub score: u8,
}

impl PasswordStrength {
    pub fn label(&self) -> &'static str {
        match self.score {
            0 | 1 => "Weak",
            2 | 3 => "Fair",
            4 => "Good",
            _ => "Strong",
        }
    }
}

/// Score a candidate password: one point each for length, lowercase,
/// uppercase, digit, and symbol
pub fn password_strength(password: &str) -> PasswordStrength {
    let mut score = 0u8;
    if password.len() >= MIN_PASSWORD_LEN {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_lowercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        score += 1;
    }
    PasswordStrength { score }
}

fn email_regex() -> Result<Regex> {
    Ok(Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")?)
}

fn meets_password_policy(password: &str) -> bool {
    password.len() >= MIN_PASSWORD_LEN
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Credential(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| Error::Credential(format!("Stored hash is malformed: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Authentication service over a shared [`Database`] handle
pub struct Authenticator {
    db: Database,
    session: Option<Session>,
}

impl Authenticator {
    pub fn new(db: Database) -> Self {
        Self { db, session: None }
    }

    /// Create a new account and return its user record
    ///
    /// Validation runs in a fixed order and reports the first failure only.
    pub fn register(&self, registration: &Registration) -> Result<User> {
        let full_name = registration.full_name.trim();
        // Emails are stored and compared exactly as entered
        let email = registration.email.trim();

        if full_name.is_empty()
            || email.is_empty()
            || registration.password.is_empty()
            || registration.confirm_password.is_empty()
        {
            return Err(Error::Validation("All fields are required".to_string()));
        }
        if !email_regex()?.is_match(email) {
            return Err(Error::Validation(
                "Please enter a valid email address".to_string(),
            ));
        }
        if registration.password != registration.confirm_password {
            return Err(Error::Validation("Passwords do not match".to_string()));
        }
        if !meets_password_policy(&registration.password) {
            return Err(Error::Validation(
                "Password must be at least 8 characters with uppercase, lowercase, and a number"
                    .to_string(),
            ));
        }
        if !registration.accepted_terms {
            return Err(Error::Validation(
                "You must accept the terms to continue".to_string(),
            ));
        }
        if self.db.get_user_by_email(email)?.is_some() {
            return Err(Error::Validation(
                "An account with this email already exists".to_string(),
            ));
        }

        let password_hash = hash_password(&registration.password)?;
        let user_id = self.db.create_user(full_name, email, &password_hash)?;
        tracing::info!(user_id, "registered new account");

        self.db
            .get_user(user_id)?
            .ok_or_else(|| Error::NotFound(format!("User not found: {}", user_id)))
    }

    /// Verify credentials and start a session
    ///
    /// Unknown email and wrong password produce the same error, so a caller
    /// cannot probe which accounts exist.
    pub fn login(&mut self, email: &str, password: &str) -> Result<Session> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(Error::Validation("All fields are required".to_string()));
        }
        if !email_regex()?.is_match(email) {
            return Err(Error::Validation(
                "Please enter a valid email address".to_string(),
            ));
        }

        let user = match self.db.get_user_by_email(email)? {
            Some(user) => user,
            None => return Err(Error::Auth("Invalid email or password".to_string())),
        };
        if !verify_password(password, &user.password_hash)? {
            return Err(Error::Auth("Invalid email or password".to_string()));
        }

        let session = Session {
            user_id: user.id,
            user_name: user.full_name,
        };
        self.session = Some(session.clone());
        tracing::info!(user_id = session.user_id, "login succeeded");
        Ok(session)
    }

    /// Drop the active session, if any
    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!(user_id = session.user_id, "logged out");
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }
}
