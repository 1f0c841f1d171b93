use askama::Template;
use axum::{
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;

use super::{render, today};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::models::WorkoutSession;
use crate::repositories::WorkoutRepository;
use crate::stats::{self, Period, PeriodSummary};

/// Number of sessions listed under the summary.
const RECENT_LIMIT: i64 = 5;

#[derive(Clone)]
pub struct DashboardState {
    pub workout_repo: WorkoutRepository,
}

#[derive(Template)]
#[template(path = "dashboard/index.html")]
struct DashboardTemplate {
    user: AuthUser,
    period: Period,
    range_label: String,
    summary: PeriodSummary,
    recent_workouts: Vec<WorkoutSession>,
}

#[derive(Deserialize)]
pub struct DashboardQuery {
    period: Option<String>,
}

pub async fn index(
    State(state): State<DashboardState>,
    auth_user: AuthUser,
    Query(query): Query<DashboardQuery>,
) -> Result<Response> {
    let period = Period::parse(query.period.as_deref());
    let (start, end) = period.range(today());

    let sessions = state
        .workout_repo
        .find_sessions_in_range(&auth_user.id, start, end)
        .await?;
    let summary = stats::summarize(&sessions);
    let recent_workouts = state
        .workout_repo
        .find_recent_sessions(&auth_user.id, RECENT_LIMIT)
        .await?;

    render(&DashboardTemplate {
        user: auth_user,
        period,
        range_label: format!("{} - {}", start.format("%d/%m/%Y"), end.format("%d/%m/%Y")),
        summary,
        recent_workouts,
    })
}
