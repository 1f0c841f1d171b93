use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::form::{deserialize_optional_date, deserialize_optional_string};
use super::{muscle_group, ExerciseWithSets, FromSqliteRow};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub date: NaiveDate,
    pub muscle_group: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for WorkoutSession {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            name: row.get("name")?,
            date: row.get("date")?,
            muscle_group: row.get("muscle_group")?,
            created_at: row.get("created_at")?,
        })
    }
}

impl WorkoutSession {
    /// Day-first rendering used in listings, search and CSV export.
    pub fn date_display(&self) -> String {
        self.date.format("%d/%m/%Y").to_string()
    }

    pub fn muscle_group_label(&self) -> String {
        self.muscle_group
            .as_deref()
            .map(|g| muscle_group::display_name(g).to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

/// A session with its exercises and their sets, as shown in the history.
#[derive(Debug, Clone, Serialize)]
pub struct SessionWithExercises {
    #[serde(flatten)]
    pub session: WorkoutSession,
    pub exercises: Vec<ExerciseWithSets>,
}

impl SessionWithExercises {
    pub fn set_count(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    pub fn total_volume(&self) -> f64 {
        self.exercises.iter().map(|e| e.total_volume()).sum()
    }
}

fn validate_session_fields(name: &str, muscle_group: Option<&str>) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Session name is required");
    }
    if let Some(group) = muscle_group {
        if !muscle_group::is_valid(group) {
            return Err("Unknown muscle group");
        }
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct CreateWorkoutSession {
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub muscle_group: Option<String>,
}

impl CreateWorkoutSession {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_session_fields(&self.name, self.muscle_group.as_deref())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateWorkoutSession {
    pub name: String,
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub muscle_group: Option<String>,
}

impl UpdateWorkoutSession {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_session_fields(&self.name, self.muscle_group.as_deref())
    }
}
