//! JSON payload for registering a complete session (exercises and sets) in
//! one request.

use chrono::NaiveDate;
use serde::Deserialize;

use super::exercise_set::{validate_rest_time, validate_set};
use super::muscle_group;

#[derive(Debug, Deserialize)]
pub struct NewSessionRequest {
    pub name: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub muscle_group: Option<String>,
    #[serde(default)]
    pub exercises: Vec<NewExercise>,
}

#[derive(Debug, Deserialize)]
pub struct NewExercise {
    pub name: String,
    #[serde(default)]
    pub sets: Vec<NewSet>,
}

#[derive(Debug, Deserialize)]
pub struct NewSet {
    pub reps: i32,
    pub weight: f64,
    #[serde(default)]
    pub rest_time: Option<i32>,
}

impl NewSessionRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Session name is required".to_string());
        }
        if let Some(group) = self.muscle_group.as_deref().filter(|g| !g.is_empty()) {
            if !muscle_group::is_valid(group) {
                return Err(format!("Unknown muscle group: {}", group));
            }
        }
        if self.exercises.is_empty() {
            return Err("Add at least one exercise".to_string());
        }
        for exercise in &self.exercises {
            if exercise.name.trim().is_empty() || exercise.sets.is_empty() {
                return Err("Every exercise needs a name and at least one set".to_string());
            }
            for set in &exercise.sets {
                validate_set(set.reps, set.weight)
                    .and_then(|()| validate_rest_time(set.rest_time))
                    .map_err(|e| format!("{} ({})", e, exercise.name.trim()))?;
            }
        }
        Ok(())
    }

    /// Blank muscle group strings are treated as absent.
    pub fn muscle_group(&self) -> Option<&str> {
        self.muscle_group.as_deref().filter(|g| !g.is_empty())
    }
}
