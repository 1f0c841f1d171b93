use askama::Template;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};

use super::{render, today};
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{BodyWeightEntry, CreateBodyWeight, UpdateProfile, UserProfile};
use crate::repositories::{BodyWeightRepository, ProfileRepository};
use crate::stats::{self, WeightTrend, CHART_HEIGHT, CHART_WIDTH};

#[derive(Clone)]
pub struct ProfileState {
    pub profile_repo: ProfileRepository,
    pub body_weight_repo: BodyWeightRepository,
}

#[derive(Template)]
#[template(path = "profile/index.html")]
struct ProfileTemplate {
    user: AuthUser,
    full_name: String,
    age: String,
    height: String,
    goal: String,
    history: Vec<BodyWeightEntry>,
    trend: Option<WeightTrend>,
    chart_points: String,
    chart_width: f64,
    chart_height: f64,
    error: Option<String>,
}

impl ProfileTemplate {
    fn new(
        user: AuthUser,
        profile: UserProfile,
        history: Vec<BodyWeightEntry>,
        error: Option<String>,
    ) -> Self {
        let weights: Vec<f64> = history.iter().map(|e| e.weight).collect();
        let trend = stats::weight_trend(&history);
        // A single point is not a trend.
        let chart_points = if trend.is_some() {
            stats::chart_points(&weights)
        } else {
            String::new()
        };

        Self {
            user,
            full_name: profile.full_name.unwrap_or_default(),
            age: profile.age.map(|a| a.to_string()).unwrap_or_default(),
            height: profile.height.map(|h| h.to_string()).unwrap_or_default(),
            goal: profile.goal.unwrap_or_default(),
            history,
            trend,
            chart_points,
            chart_width: CHART_WIDTH,
            chart_height: CHART_HEIGHT,
            error,
        }
    }
}

pub async fn index(State(state): State<ProfileState>, auth_user: AuthUser) -> Result<Response> {
    render_page(&state, auth_user, None).await
}

pub async fn update(
    State(state): State<ProfileState>,
    auth_user: AuthUser,
    Form(form): Form<UpdateProfile>,
) -> Result<Response> {
    if let Err(message) = form.validate() {
        return render_page(&state, auth_user, Some(message.to_string())).await;
    }

    state.profile_repo.upsert(&auth_user.id, form).await?;
    Ok(Redirect::to("/profile").into_response())
}

pub async fn add_weight(
    State(state): State<ProfileState>,
    auth_user: AuthUser,
    Form(form): Form<CreateBodyWeight>,
) -> Result<Response> {
    let weight = match form.weight() {
        Ok(weight) => weight,
        Err(message) => return render_page(&state, auth_user, Some(message.to_string())).await,
    };

    state
        .body_weight_repo
        .create(&auth_user.id, today(), weight)
        .await?;
    Ok(Redirect::to("/profile").into_response())
}

pub async fn delete_weight(
    State(state): State<ProfileState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Response> {
    if !state.body_weight_repo.delete(&id, &auth_user.id).await? {
        return Err(AppError::NotFound("Weight entry not found".to_string()));
    }
    Ok(Redirect::to("/profile").into_response())
}

async fn render_page(
    state: &ProfileState,
    auth_user: AuthUser,
    error: Option<String>,
) -> Result<Response> {
    let profile = state
        .profile_repo
        .find_by_user(&auth_user.id)
        .await?
        .unwrap_or_default();
    let history = state.body_weight_repo.find_by_user(&auth_user.id).await?;

    render(&ProfileTemplate::new(auth_user, profile, history, error))
}
