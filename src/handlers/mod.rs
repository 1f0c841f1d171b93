pub mod api;
pub mod auth;
pub mod calendar;
pub mod dashboard;
pub mod health;
pub mod profile;
pub mod progress;
pub mod workouts;

use askama::Template;
use axum::response::{Html, IntoResponse, Response};

use crate::error::{AppError, Result};

pub(crate) fn render<T: Template>(template: &T) -> Result<Response> {
    Ok(Html(
        template
            .render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    )
    .into_response())
}

pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
