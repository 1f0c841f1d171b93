use askama::Template;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use super::{render, today};
use crate::calendar::{self, month_key, MonthView};
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::ToggleCheckin;
use crate::repositories::CheckinRepository;
use crate::stats::last_day_of_month;

#[derive(Clone)]
pub struct CalendarState {
    pub checkin_repo: CheckinRepository,
}

#[derive(Template)]
#[template(path = "calendar/index.html")]
struct CalendarTemplate {
    user: AuthUser,
    month: MonthView,
}

#[derive(Deserialize)]
pub struct CalendarQuery {
    month: Option<String>,
}

pub async fn index(
    State(state): State<CalendarState>,
    auth_user: AuthUser,
    Query(query): Query<CalendarQuery>,
) -> Result<Response> {
    let first = calendar::parse_month(query.month.as_deref());
    let checked = state
        .checkin_repo
        .find_dates_in_range(&auth_user.id, first, last_day_of_month(first))
        .await?;

    render(&CalendarTemplate {
        user: auth_user,
        month: calendar::month_view(first, &checked, today()),
    })
}

pub async fn toggle(
    State(state): State<CalendarState>,
    auth_user: AuthUser,
    Form(form): Form<ToggleCheckin>,
) -> Result<Response> {
    if !calendar::is_calendar_date(form.date) {
        return Err(AppError::Validation(format!(
            "Date {} is outside the calendar",
            form.date
        )));
    }

    let marked = state.checkin_repo.toggle(&auth_user.id, form.date).await?;
    tracing::debug!("Check-in on {} is now {}", form.date, marked);

    Ok(Redirect::to(&format!("/calendar?month={}", month_key(form.date))).into_response())
}
