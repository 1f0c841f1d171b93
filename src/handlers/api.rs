use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use super::today;
use crate::error::{AppError, Result};
use crate::middleware::ApiAuthUser;
use crate::models::{ExerciseWithSets, NewSessionRequest, SessionWithExercises};
use crate::repositories::WorkoutRepository;

#[derive(Clone)]
pub struct ApiState {
    pub workout_repo: WorkoutRepository,
}

pub async fn list_sessions(
    State(state): State<ApiState>,
    ApiAuthUser(auth_user): ApiAuthUser,
) -> Result<Json<Vec<SessionWithExercises>>> {
    let sessions = state
        .workout_repo
        .find_sessions_with_exercises(&auth_user.id)
        .await?;
    Ok(Json(sessions))
}

/// Registers a session with all of its exercises and sets. Rows are written
/// one by one; a failure part way leaves the earlier rows in place.
pub async fn create_session(
    State(state): State<ApiState>,
    ApiAuthUser(auth_user): ApiAuthUser,
    Json(request): Json<NewSessionRequest>,
) -> Result<impl IntoResponse> {
    if let Err(message) = request.validate() {
        tracing::warn!("Rejected session registration: {}", message);
        return Err(AppError::Validation(message));
    }

    let session = state
        .workout_repo
        .create_session(
            &auth_user.id,
            &request.name,
            request.date.unwrap_or_else(today),
            request.muscle_group(),
        )
        .await?;

    let mut exercises = Vec::with_capacity(request.exercises.len());
    for new_exercise in &request.exercises {
        let exercise = state
            .workout_repo
            .add_exercise(&session.id, &new_exercise.name)
            .await?;

        let mut sets = Vec::with_capacity(new_exercise.sets.len());
        for (number, new_set) in (1..).zip(&new_exercise.sets) {
            let set = state
                .workout_repo
                .create_set(
                    &exercise.id,
                    number,
                    new_set.reps,
                    new_set.weight,
                    new_set.rest_time,
                )
                .await?;
            sets.push(set);
        }

        exercises.push(ExerciseWithSets::new(exercise, sets));
    }

    Ok((
        StatusCode::CREATED,
        Json(SessionWithExercises { session, exercises }),
    ))
}
