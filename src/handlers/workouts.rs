use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use super::{render, today};
use crate::error::{AppError, Result};
use crate::export;
use crate::middleware::AuthUser;
use crate::models::{
    muscle_group, CreateExerciseSet, CreateWorkoutSession, ExerciseNameForm, ExerciseSet,
    ExerciseWithSets, MuscleOption, SessionExercise, SessionWithExercises, UpdateExerciseSet,
    UpdateWorkoutSession, WorkoutSession,
};
use crate::repositories::WorkoutRepository;
use crate::stats::{self, format_kg, ExerciseStats, PersonalRecords};

#[derive(Clone)]
pub struct WorkoutsState {
    pub workout_repo: WorkoutRepository,
}

/// An exercise as listed in the history, with its stats and PR badge.
struct HistoryExercise {
    name: String,
    sets: Vec<ExerciseSet>,
    stats: ExerciseStats,
    pr_label: String,
    holds_pr: bool,
}

struct HistorySession {
    session: WorkoutSession,
    exercises: Vec<HistoryExercise>,
    set_count: usize,
    volume: String,
    is_latest: bool,
}

impl HistorySession {
    fn new(entry: SessionWithExercises, prs: &PersonalRecords, is_latest: bool) -> Self {
        let set_count = entry.set_count();
        let volume = format_kg(entry.total_volume());
        let exercises = entry
            .exercises
            .into_iter()
            .map(|exercise| HistoryExercise {
                stats: stats::exercise_stats(&exercise),
                pr_label: prs.label(&exercise.exercise_name),
                holds_pr: prs.is_record_holder(&exercise),
                name: exercise.exercise_name,
                sets: exercise.sets,
            })
            .collect();
        Self {
            session: entry.session,
            exercises,
            set_count,
            volume,
            is_latest,
        }
    }
}

/// An exercise on the session page with the weight suggested for its next set.
struct SessionExerciseView {
    exercise: ExerciseWithSets,
    stats: ExerciseStats,
    suggestion: Option<String>,
}

// Templates
#[derive(Template)]
#[template(path = "workouts/list.html")]
struct WorkoutsListTemplate {
    user: AuthUser,
    query: String,
    sessions: Vec<HistorySession>,
    total: usize,
    pr_count: usize,
}

#[derive(Template)]
#[template(path = "workouts/new.html")]
struct NewWorkoutTemplate {
    user: AuthUser,
    name: String,
    date: String,
    muscle_groups: Vec<MuscleOption>,
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "workouts/show.html")]
struct ShowWorkoutTemplate {
    user: AuthUser,
    workout: WorkoutSession,
    exercises: Vec<SessionExerciseView>,
    set_count: usize,
    volume: String,
}

#[derive(Template)]
#[template(path = "workouts/edit.html")]
struct EditWorkoutTemplate {
    user: AuthUser,
    workout: WorkoutSession,
    name: String,
    date: String,
    muscle_groups: Vec<MuscleOption>,
    error: Option<String>,
}

// Query params
#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    q: String,
}

// Handlers
pub async fn list(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Response> {
    let sessions = state
        .workout_repo
        .find_sessions_with_exercises(&auth_user.id)
        .await?;
    let total = sessions.len();

    // Records always span the whole history, not just the matches.
    let prs = stats::personal_records(&sessions);
    let sessions = stats::filter_sessions(sessions, &query.q)
        .into_iter()
        .enumerate()
        .map(|(i, entry)| HistorySession::new(entry, &prs, i == 0))
        .collect();

    render(&WorkoutsListTemplate {
        user: auth_user,
        query: query.q.trim().to_string(),
        sessions,
        total,
        pr_count: prs.len(),
    })
}

pub async fn new_page(auth_user: AuthUser) -> Result<Response> {
    render(&NewWorkoutTemplate {
        user: auth_user,
        name: String::new(),
        date: today().format("%F").to_string(),
        muscle_groups: muscle_group::options(None),
        error: None,
    })
}

pub async fn create(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Form(form): Form<CreateWorkoutSession>,
) -> Result<Response> {
    let date = form.date.unwrap_or_else(today);

    if let Err(message) = form.validate() {
        return render(&NewWorkoutTemplate {
            user: auth_user,
            name: form.name,
            date: date.format("%F").to_string(),
            muscle_groups: muscle_group::options(form.muscle_group.as_deref()),
            error: Some(message.to_string()),
        });
    }

    let workout = state
        .workout_repo
        .create_session(&auth_user.id, &form.name, date, form.muscle_group.as_deref())
        .await?;

    Ok(Redirect::to(&format!("/workouts/{}", workout.id)).into_response())
}

pub async fn show(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Response> {
    let entry = state
        .workout_repo
        .find_session_with_exercises(&id, &auth_user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))?;

    let set_count = entry.set_count();
    let volume = format_kg(entry.total_volume());

    let mut exercises = Vec::with_capacity(entry.exercises.len());
    for exercise in entry.exercises {
        let last_weight = state
            .workout_repo
            .find_last_weight(&auth_user.id, &exercise.exercise_name, &id)
            .await?;
        exercises.push(SessionExerciseView {
            stats: stats::exercise_stats(&exercise),
            suggestion: stats::suggested_weight(last_weight).map(format_kg),
            exercise,
        });
    }

    render(&ShowWorkoutTemplate {
        user: auth_user,
        workout: entry.session,
        exercises,
        set_count,
        volume,
    })
}

pub async fn edit_page(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Response> {
    let workout = find_owned_session(&state, &id, &auth_user).await?;

    render(&EditWorkoutTemplate {
        user: auth_user,
        name: workout.name.clone(),
        date: workout.date.format("%F").to_string(),
        muscle_groups: muscle_group::options(workout.muscle_group.as_deref()),
        workout,
        error: None,
    })
}

pub async fn update(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    Form(form): Form<UpdateWorkoutSession>,
) -> Result<Response> {
    let workout = find_owned_session(&state, &id, &auth_user).await?;

    if let Err(message) = form.validate() {
        return render(&EditWorkoutTemplate {
            user: auth_user,
            workout,
            name: form.name,
            date: form.date.format("%F").to_string(),
            muscle_groups: muscle_group::options(form.muscle_group.as_deref()),
            error: Some(message.to_string()),
        });
    }

    state
        .workout_repo
        .update_session(
            &id,
            &auth_user.id,
            &form.name,
            form.date,
            form.muscle_group.as_deref(),
        )
        .await?;

    Ok(Redirect::to(&format!("/workouts/{}", id)).into_response())
}

pub async fn delete(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Response> {
    if !state.workout_repo.delete_session(&id, &auth_user.id).await? {
        return Err(AppError::NotFound("Workout not found".to_string()));
    }
    Ok(Redirect::to("/workouts").into_response())
}

pub async fn delete_all(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
) -> Result<Response> {
    let deleted = state.workout_repo.delete_all_sessions(&auth_user.id).await?;
    tracing::info!("Deleted {} sessions for user {}", deleted, auth_user.username);
    Ok(Redirect::to("/workouts").into_response())
}

pub async fn export_csv(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
) -> Result<Response> {
    let sessions = state
        .workout_repo
        .find_sessions_with_exercises(&auth_user.id)
        .await?;
    let body = export::sessions_to_csv(&sessions)?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export::export_filename(today())
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

// Exercises
pub async fn add_exercise(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path(session_id): Path<String>,
    Form(form): Form<ExerciseNameForm>,
) -> Result<Response> {
    find_owned_session(&state, &session_id, &auth_user).await?;

    let name = form
        .trimmed()
        .ok_or_else(|| AppError::Validation("Exercise name is required".to_string()))?;
    state.workout_repo.add_exercise(&session_id, name).await?;

    Ok(redirect_to_session(&session_id))
}

pub async fn rename_exercise(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path((session_id, exercise_id)): Path<(String, String)>,
    Form(form): Form<ExerciseNameForm>,
) -> Result<Response> {
    find_owned_exercise(&state, &session_id, &exercise_id, &auth_user).await?;

    let name = form
        .trimmed()
        .ok_or_else(|| AppError::Validation("Exercise name is required".to_string()))?;
    state
        .workout_repo
        .rename_exercise(&exercise_id, &auth_user.id, name)
        .await?;

    Ok(redirect_to_session(&session_id))
}

pub async fn delete_exercise(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path((session_id, exercise_id)): Path<(String, String)>,
) -> Result<Response> {
    find_owned_exercise(&state, &session_id, &exercise_id, &auth_user).await?;

    state
        .workout_repo
        .delete_exercise(&exercise_id, &auth_user.id)
        .await?;

    Ok(redirect_to_session(&session_id))
}

// Sets
pub async fn add_set(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path((session_id, exercise_id)): Path<(String, String)>,
    Form(form): Form<CreateExerciseSet>,
) -> Result<Response> {
    find_owned_exercise(&state, &session_id, &exercise_id, &auth_user).await?;
    form.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    state
        .workout_repo
        .add_set(&exercise_id, form.reps, form.weight, form.rest_time)
        .await?;

    Ok(redirect_to_session(&session_id))
}

pub async fn update_set(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path((session_id, set_id)): Path<(String, String)>,
    Form(form): Form<UpdateExerciseSet>,
) -> Result<Response> {
    form.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    if !state
        .workout_repo
        .update_set(&set_id, &auth_user.id, form.reps, form.weight)
        .await?
    {
        return Err(AppError::NotFound("Set not found".to_string()));
    }

    Ok(redirect_to_session(&session_id))
}

pub async fn delete_set(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path((session_id, set_id)): Path<(String, String)>,
) -> Result<Response> {
    if !state.workout_repo.delete_set(&set_id, &auth_user.id).await? {
        return Err(AppError::NotFound("Set not found".to_string()));
    }

    Ok(redirect_to_session(&session_id))
}

// Helpers
async fn find_owned_session(
    state: &WorkoutsState,
    id: &str,
    auth_user: &AuthUser,
) -> Result<WorkoutSession> {
    state
        .workout_repo
        .find_session(id, &auth_user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))
}

async fn find_owned_exercise(
    state: &WorkoutsState,
    session_id: &str,
    exercise_id: &str,
    auth_user: &AuthUser,
) -> Result<SessionExercise> {
    state
        .workout_repo
        .find_exercise(exercise_id, &auth_user.id)
        .await?
        .filter(|exercise| exercise.session_id == session_id)
        .ok_or_else(|| AppError::NotFound("Exercise not found".to_string()))
}

fn redirect_to_session(session_id: &str) -> Response {
    Redirect::to(&format!("/workouts/{}", session_id)).into_response()
}
