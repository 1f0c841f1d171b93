use chrono::Utc;
use rusqlite::OptionalExtension;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{FromSqliteRow, User};
use crate::session::SESSION_TTL_DAYS;

/// Login sessions backing the session cookie. Unrelated to workout sessions.
#[derive(Clone)]
pub struct LoginSessionRepository {
    pool: DbPool,
}

impl LoginSessionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a new login session for a user. Returns the session token.
    pub async fn create(&self, user_id: &str) -> Result<String> {
        let pool = self.pool.clone();
        let token = Uuid::new_v4().to_string();
        let user_id = user_id.to_string();
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(SESSION_TTL_DAYS);
        let token_clone = token.clone();

        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO login_sessions (token, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
                rusqlite::params![token_clone, user_id, now, expires_at],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(token)
    }

    /// Find the user owning a valid (non-expired) session.
    /// Lazily deletes the session if it has expired.
    pub async fn find_user(&self, token: &str) -> Result<Option<User>> {
        let pool = self.pool.clone();
        let token = token.to_string();
        let now = Utc::now();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let expires_at: Option<chrono::DateTime<Utc>> = conn
                .query_row(
                    "SELECT expires_at FROM login_sessions WHERE token = ?",
                    [&token],
                    |row| row.get(0),
                )
                .optional()?;

            match expires_at {
                Some(expires_at) if expires_at <= now => {
                    conn.execute("DELETE FROM login_sessions WHERE token = ?", [&token])?;
                    Ok(None)
                }
                Some(_) => {
                    let mut stmt = conn.prepare(
                        "SELECT u.* FROM users u
                         JOIN login_sessions s ON s.user_id = u.id
                         WHERE s.token = ?",
                    )?;
                    let user = stmt.query_row([&token], User::from_row).optional()?;
                    Ok(user)
                }
                None => Ok(None),
            }
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Delete a single session (logout).
    pub async fn delete(&self, token: &str) -> Result<()> {
        let pool = self.pool.clone();
        let token = token.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            conn.execute("DELETE FROM login_sessions WHERE token = ?", [&token])?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Batch delete all expired sessions. Returns how many were removed.
    pub async fn cleanup_expired(&self) -> Result<usize> {
        let pool = self.pool.clone();
        let now = Utc::now();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let removed = conn.execute(
                "DELETE FROM login_sessions WHERE expires_at <= ?",
                rusqlite::params![now],
            )?;
            Ok(removed)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
