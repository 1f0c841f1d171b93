use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};

#[derive(Clone)]
pub struct CheckinRepository {
    pool: DbPool,
}

impl CheckinRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Checked-in dates within `[start, end]`, ascending.
    pub async fn find_dates_in_range(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<NaiveDate>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT date FROM workout_checkins
                 WHERE user_id = ? AND date >= ? AND date <= ?
                 ORDER BY date",
            )?;
            let dates = stmt
                .query_map(rusqlite::params![user_id, start, end], |row| row.get(0))?
                .collect::<rusqlite::Result<Vec<NaiveDate>>>()?;
            Ok(dates)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Flip the check-in for a date. Returns true when the date is now marked.
    pub async fn toggle(&self, user_id: &str, date: NaiveDate) -> Result<bool> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let removed = conn.execute(
                "DELETE FROM workout_checkins WHERE user_id = ? AND date = ?",
                rusqlite::params![user_id, date],
            )?;
            if removed > 0 {
                return Ok(false);
            }

            conn.execute(
                "INSERT INTO workout_checkins (id, user_id, date, created_at) VALUES (?, ?, ?, ?)",
                rusqlite::params![Uuid::new_v4().to_string(), user_id, date, Utc::now()],
            )?;
            Ok(true)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
