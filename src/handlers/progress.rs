use askama::Template;
use axum::{
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;

use super::render;
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::repositories::WorkoutRepository;
use crate::stats::{self, ProgressPoint, CHART_HEIGHT, CHART_WIDTH};

#[derive(Clone)]
pub struct ProgressState {
    pub workout_repo: WorkoutRepository,
}

struct ExerciseOption {
    name: String,
    selected: bool,
}

#[derive(Template)]
#[template(path = "progress/index.html")]
struct ProgressTemplate {
    user: AuthUser,
    exercises: Vec<ExerciseOption>,
    selected: Option<String>,
    points: Vec<ProgressPoint>,
    chart_points: String,
    chart_width: f64,
    chart_height: f64,
}

#[derive(Deserialize)]
pub struct ProgressQuery {
    exercise: Option<String>,
}

pub async fn index(
    State(state): State<ProgressState>,
    auth_user: AuthUser,
    Query(query): Query<ProgressQuery>,
) -> Result<Response> {
    let names = state.workout_repo.find_exercise_names(&auth_user.id).await?;

    // Fall back to the first exercise when nothing (or something unknown) is picked.
    let selected = query
        .exercise
        .filter(|name| names.contains(name))
        .or_else(|| names.first().cloned());

    let points = match &selected {
        Some(name) => {
            let sessions = state
                .workout_repo
                .find_sessions_with_exercises(&auth_user.id)
                .await?;
            stats::progression(&sessions, name)
        }
        None => Vec::new(),
    };
    let weights: Vec<f64> = points.iter().map(|p| p.max_weight).collect();

    let exercises = names
        .into_iter()
        .map(|name| ExerciseOption {
            selected: selected.as_deref() == Some(name.as_str()),
            name,
        })
        .collect();

    render(&ProgressTemplate {
        user: auth_user,
        exercises,
        selected,
        chart_points: stats::chart_points(&weights),
        points,
        chart_width: CHART_WIDTH,
        chart_height: CHART_HEIGHT,
    })
}
