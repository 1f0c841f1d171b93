use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{BodyWeightEntry, FromSqliteRow};

#[derive(Clone)]
pub struct BodyWeightRepository {
    pool: DbPool,
}

impl BodyWeightRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: &str, date: NaiveDate, weight: f64) -> Result<BodyWeightEntry> {
        let entry = BodyWeightEntry {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            date,
            weight,
            created_at: Utc::now(),
        };
        let entry_clone = entry.clone();

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO body_weight_tracking (id, user_id, date, weight, created_at)
                 VALUES (?, ?, ?, ?, ?)",
                rusqlite::params![
                    entry_clone.id,
                    entry_clone.user_id,
                    entry_clone.date,
                    entry_clone.weight,
                    entry_clone.created_at
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(entry)
    }

    /// Weight history, oldest first.
    pub async fn find_by_user(&self, user_id: &str) -> Result<Vec<BodyWeightEntry>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT * FROM body_weight_tracking WHERE user_id = ? ORDER BY date, rowid",
            )?;
            let entries = stmt
                .query_map([&user_id], BodyWeightEntry::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(entries)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn delete(&self, id: &str, user_id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "DELETE FROM body_weight_tracking WHERE id = ? AND user_id = ?",
                rusqlite::params![id, user_id],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
