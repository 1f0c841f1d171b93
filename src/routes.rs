use axum::{
    routing::{get, post},
    Extension, Router,
};

use crate::db::DbPool;
use crate::handlers::{api, auth, calendar, dashboard, health, profile, progress, workouts};
use crate::repositories::{
    BodyWeightRepository, CheckinRepository, LoginSessionRepository, ProfileRepository,
    UserRepository, WorkoutRepository,
};

pub struct AppStates {
    pub auth: auth::AuthState,
    pub dashboard: dashboard::DashboardState,
    pub workouts: workouts::WorkoutsState,
    pub api: api::ApiState,
    pub progress: progress::ProgressState,
    pub calendar: calendar::CalendarState,
    pub profile: profile::ProfileState,
}

impl AppStates {
    pub fn new(pool: &DbPool) -> Self {
        // Create repositories
        let user_repo = UserRepository::new(pool.clone());
        let login_session_repo = LoginSessionRepository::new(pool.clone());
        let workout_repo = WorkoutRepository::new(pool.clone());

        Self {
            auth: auth::AuthState {
                user_repo,
                login_session_repo,
            },
            dashboard: dashboard::DashboardState {
                workout_repo: workout_repo.clone(),
            },
            workouts: workouts::WorkoutsState {
                workout_repo: workout_repo.clone(),
            },
            api: api::ApiState {
                workout_repo: workout_repo.clone(),
            },
            progress: progress::ProgressState { workout_repo },
            calendar: calendar::CalendarState {
                checkin_repo: CheckinRepository::new(pool.clone()),
            },
            profile: profile::ProfileState {
                profile_repo: ProfileRepository::new(pool.clone()),
                body_weight_repo: BodyWeightRepository::new(pool.clone()),
            },
        }
    }
}

/// Full application router over a migrated pool.
pub fn app(pool: &DbPool) -> Router {
    create_router(
        AppStates::new(pool),
        LoginSessionRepository::new(pool.clone()),
    )
}

pub fn create_router(states: AppStates, login_sessions: LoginSessionRepository) -> Router {
    Router::new()
        // Dashboard
        .route("/", get(dashboard::index))
        .with_state(states.dashboard)
        // Auth routes
        .route(
            "/auth/login",
            get(auth::login_page).post(auth::login_submit),
        )
        .route(
            "/auth/register",
            get(auth::register_page).post(auth::register_submit),
        )
        .route("/auth/logout", post(auth::logout))
        .with_state(states.auth)
        // Workout routes
        .route("/workouts", get(workouts::list).post(workouts::create))
        .route("/workouts/new", get(workouts::new_page))
        .route("/workouts/export.csv", get(workouts::export_csv))
        .route("/workouts/delete-all", post(workouts::delete_all))
        .route("/workouts/{id}", get(workouts::show).post(workouts::update))
        .route("/workouts/{id}/edit", get(workouts::edit_page))
        .route("/workouts/{id}/delete", post(workouts::delete))
        .route("/workouts/{id}/exercises", post(workouts::add_exercise))
        .route(
            "/workouts/{id}/exercises/{exercise_id}",
            post(workouts::rename_exercise),
        )
        .route(
            "/workouts/{id}/exercises/{exercise_id}/delete",
            post(workouts::delete_exercise),
        )
        .route(
            "/workouts/{id}/exercises/{exercise_id}/sets",
            post(workouts::add_set),
        )
        .route("/workouts/{id}/sets/{set_id}", post(workouts::update_set))
        .route(
            "/workouts/{id}/sets/{set_id}/delete",
            post(workouts::delete_set),
        )
        .with_state(states.workouts)
        // JSON API
        .route(
            "/api/sessions",
            get(api::list_sessions).post(api::create_session),
        )
        .with_state(states.api)
        // Progress
        .route("/progress", get(progress::index))
        .with_state(states.progress)
        // Calendar check-ins
        .route("/calendar", get(calendar::index))
        .route("/calendar/toggle", post(calendar::toggle))
        .with_state(states.calendar)
        // Profile and body weight
        .route("/profile", get(profile::index).post(profile::update))
        .route("/profile/weights", post(profile::add_weight))
        .route("/profile/weights/{id}/delete", post(profile::delete_weight))
        .with_state(states.profile)
        .route("/health", get(health::check))
        // Login session lookup for the auth extractors
        .layer(Extension(login_sessions))
}
