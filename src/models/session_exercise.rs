use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::{ExerciseSet, FromSqliteRow};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionExercise {
    pub id: String,
    pub session_id: String,
    pub exercise_name: String,
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for SessionExercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            session_id: row.get("session_id")?,
            exercise_name: row.get("exercise_name")?,
            created_at: row.get("created_at")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExerciseWithSets {
    pub id: String,
    pub session_id: String,
    pub exercise_name: String,
    pub sets: Vec<ExerciseSet>,
}

impl ExerciseWithSets {
    pub fn new(exercise: SessionExercise, sets: Vec<ExerciseSet>) -> Self {
        Self {
            id: exercise.id,
            session_id: exercise.session_id,
            exercise_name: exercise.exercise_name,
            sets,
        }
    }

    pub fn total_volume(&self) -> f64 {
        self.sets.iter().map(|s| s.volume()).sum()
    }
}

#[derive(Debug, Deserialize)]
pub struct ExerciseNameForm {
    pub name: String,
}

impl ExerciseNameForm {
    pub fn trimmed(&self) -> Option<&str> {
        Some(self.name.trim()).filter(|n| !n.is_empty())
    }
}
