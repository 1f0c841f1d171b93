use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for User {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            username: row.get("username")?,
            password_hash: row.get("password_hash")?,
            created_at: row.get("created_at")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub password: String,
}

pub const MIN_PASSWORD_LEN: usize = 6;

impl CreateUser {
    /// Returns the message to show when the registration form is unusable.
    pub fn validation_error(&self) -> Option<&'static str> {
        if self.username.trim().is_empty() {
            return Some("Username is required");
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Some("Password must be at least 6 characters");
        }
        None
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}
