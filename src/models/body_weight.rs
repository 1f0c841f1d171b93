use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::form::deserialize_optional_f64;
use super::FromSqliteRow;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyWeightEntry {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDate,
    pub weight: f64,
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for BodyWeightEntry {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            date: row.get("date")?,
            weight: row.get("weight")?,
            created_at: row.get("created_at")?,
        })
    }
}

impl BodyWeightEntry {
    pub fn date_display(&self) -> String {
        self.date.format("%d/%m/%Y").to_string()
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateBodyWeight {
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub weight: Option<f64>,
}

impl CreateBodyWeight {
    /// The weight to record, or the message explaining why there is none.
    pub fn weight(&self) -> Result<f64, &'static str> {
        match self.weight {
            None => Err("Enter your current weight"),
            Some(w) if !w.is_finite() || w <= 0.0 => Err("Weight must be greater than zero"),
            Some(w) => Ok(w),
        }
    }
}
