#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use tower::ServiceExt;

use gymlog::db::{create_memory_pool, DbPool};
use gymlog::migrations::run_migrations_for_tests;
use gymlog::models::{ExerciseSet, SessionExercise, User, WorkoutSession};
use gymlog::repositories::{LoginSessionRepository, UserRepository, WorkoutRepository};

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub fn create_test_app(pool: DbPool) -> Router {
    gymlog::routes::app(&pool)
}

pub async fn create_test_user(pool: &DbPool, username: &str, password: &str) -> User {
    let user_repo = UserRepository::new(pool.clone());
    user_repo.create(username, password).await.unwrap()
}

pub async fn create_session_cookie(pool: &DbPool, user: &User) -> String {
    let login_sessions = LoginSessionRepository::new(pool.clone());
    let token = login_sessions.create(&user.id).await.unwrap();
    format!("session={}", token)
}

/// Registers a user and returns it with a ready-to-send Cookie header value.
pub async fn logged_in_user(pool: &DbPool, username: &str) -> (User, String) {
    let user = create_test_user(pool, username, "password123").await;
    let cookie = create_session_cookie(pool, &user).await;
    (user, cookie)
}

pub fn extract_cookie_header(set_cookie: &str) -> String {
    // Extract just the cookie name=value part for use in Cookie header
    set_cookie.split(';').next().unwrap_or("").to_string()
}

// Request helpers
pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(app: &Router, uri: &str, cookie: Option<&str>, form: &str) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::from(form.to_string())).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    cookie: Option<&str>,
    json: serde_json::Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::from(json.to_string())).unwrap())
        .await
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&body).to_string()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

// Test data creation helpers
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub async fn create_test_workout(
    pool: &DbPool,
    user_id: &str,
    name: &str,
    date: NaiveDate,
    muscle_group: Option<&str>,
) -> WorkoutSession {
    let workout_repo = WorkoutRepository::new(pool.clone());
    workout_repo
        .create_session(user_id, name, date, muscle_group)
        .await
        .unwrap()
}

pub async fn create_test_exercise(pool: &DbPool, session_id: &str, name: &str) -> SessionExercise {
    let workout_repo = WorkoutRepository::new(pool.clone());
    workout_repo.add_exercise(session_id, name).await.unwrap()
}

pub async fn create_test_set(pool: &DbPool, exercise_id: &str, reps: i32, weight: f64) -> ExerciseSet {
    let workout_repo = WorkoutRepository::new(pool.clone());
    workout_repo
        .add_set(exercise_id, reps, weight, None)
        .await
        .unwrap()
}
