use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::form::deserialize_optional_i32;
use super::FromSqliteRow;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseSet {
    pub id: String,
    pub exercise_id: String,
    pub set_number: i32,
    pub reps: i32,
    pub weight: f64,
    pub rest_time: Option<i32>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for ExerciseSet {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            exercise_id: row.get("exercise_id")?,
            set_number: row.get("set_number")?,
            reps: row.get("reps")?,
            weight: row.get("weight")?,
            rest_time: row.get("rest_time")?,
            completed_at: row.get("completed_at")?,
            created_at: row.get("created_at")?,
        })
    }
}

impl ExerciseSet {
    pub fn volume(&self) -> f64 {
        self.weight * f64::from(self.reps)
    }
}

pub(crate) fn validate_set(reps: i32, weight: f64) -> Result<(), &'static str> {
    if reps < 0 {
        return Err("Reps cannot be negative");
    }
    if !weight.is_finite() || weight < 0.0 {
        return Err("Weight cannot be negative");
    }
    Ok(())
}

pub(crate) fn validate_rest_time(rest_time: Option<i32>) -> Result<(), &'static str> {
    match rest_time {
        Some(t) if t < 0 => Err("Rest time cannot be negative"),
        _ => Ok(()),
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateExerciseSet {
    pub reps: i32,
    pub weight: f64,
    #[serde(default, deserialize_with = "deserialize_optional_i32")]
    pub rest_time: Option<i32>,
}

impl CreateExerciseSet {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_set(self.reps, self.weight)?;
        validate_rest_time(self.rest_time)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateExerciseSet {
    pub reps: i32,
    pub weight: f64,
}

impl UpdateExerciseSet {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_set(self.reps, self.weight)
    }
}
