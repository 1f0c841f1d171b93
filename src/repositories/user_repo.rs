use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use rusqlite::{ErrorCode, OptionalExtension};
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{FromSqliteRow, User};

/// Account storage. Usernames are stored trimmed and compared exactly.
#[derive(Clone)]
pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Number of registered accounts, used to send a fresh install to registration.
    pub async fn count(&self) -> Result<i64> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
            Ok(count)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let username = username.trim().to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM users WHERE username = ?)",
                [&username],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let pool = self.pool.clone();
        let username = username.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let user = conn
                .query_row(
                    "SELECT * FROM users WHERE username = ?",
                    [&username],
                    User::from_row,
                )
                .optional()?;
            Ok(user)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Hashes the password and stores a new account. A username that is
    /// already registered comes back as a validation error.
    pub async fn create(&self, username: &str, password: &str) -> Result<User> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.trim().to_string(),
            password_hash: hash_password(password)?,
            created_at: Utc::now(),
        };

        let pool = self.pool.clone();
        let row = user.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO users (id, username, password_hash, created_at) VALUES (?, ?, ?, ?)",
                rusqlite::params![row.id, row.username, row.password_hash, row.created_at],
            )
            .map_err(|e| match e.sqlite_error_code() {
                Some(ErrorCode::ConstraintViolation) => {
                    AppError::Validation("Username already exists".to_string())
                }
                _ => AppError::Database(e),
            })?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(user)
    }

    /// Returns the account when the username exists and the password matches.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>> {
        let Some(user) = self.find_by_username(username.trim()).await? else {
            return Ok(None);
        };
        let matches = verify_password(password, &user.password_hash)?;
        Ok(matches.then_some(user))
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AppError::PasswordHash)
}

fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|_| AppError::PasswordHash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;
    use crate::migrations::run_migrations_for_tests;

    fn setup_test_db() -> DbPool {
        let pool = create_memory_pool().expect("Failed to create test database");
        run_migrations_for_tests(&pool).expect("Failed to run migrations");
        pool
    }

    #[tokio::test]
    async fn test_create_trims_and_hashes() {
        let repo = UserRepository::new(setup_test_db());

        let user = repo.create("  alice ", "secret123").await.unwrap();
        assert_eq!(user.username, "alice");
        assert_ne!(user.password_hash, "secret123");

        assert!(repo.username_exists("alice").await.unwrap());
        assert!(repo.username_exists(" alice").await.unwrap());
        assert!(!repo.username_exists("bob").await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_a_validation_error() {
        let repo = UserRepository::new(setup_test_db());

        repo.create("alice", "secret123").await.unwrap();
        let result = repo.create("alice", "another1").await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_authenticate() {
        let repo = UserRepository::new(setup_test_db());
        let alice = repo.create("alice", "secret123").await.unwrap();

        let found = repo.authenticate(" alice ", "secret123").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(alice.id));
        assert!(repo.authenticate("alice", "wrong").await.unwrap().is_none());
        assert!(repo.authenticate("bob", "secret123").await.unwrap().is_none());
    }
}
