use chrono::Utc;
use rusqlite::OptionalExtension;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{FromSqliteRow, UpdateProfile, UserProfile};

#[derive(Clone)]
pub struct ProfileRepository {
    pool: DbPool,
}

impl ProfileRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_user(&self, user_id: &str) -> Result<Option<UserProfile>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM user_profiles WHERE user_id = ?")?;
            let result = stmt.query_row([&user_id], UserProfile::from_row).optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Insert or replace the user's profile fields.
    pub async fn upsert(&self, user_id: &str, profile: UpdateProfile) -> Result<()> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        let now = Utc::now();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO user_profiles (id, user_id, full_name, age, height, goal, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                 ON CONFLICT(user_id) DO UPDATE SET
                     full_name = excluded.full_name,
                     age = excluded.age,
                     height = excluded.height,
                     goal = excluded.goal,
                     updated_at = excluded.updated_at",
                rusqlite::params![
                    Uuid::new_v4().to_string(),
                    user_id,
                    profile.full_name,
                    profile.age,
                    profile.height,
                    profile.goal,
                    now,
                    now
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
