mod common;

use axum::http::StatusCode;
use chrono::{Days, Local};

#[tokio::test]
async fn test_dashboard_shows_week_summary() {
    let pool = common::setup_test_db();
    let (user, cookie) = common::logged_in_user(&pool, "lifter").await;
    let today = Local::now().date_naive();

    let workout = common::create_test_workout(&pool, &user.id, "Legs", today, Some("legs")).await;
    let squat = common::create_test_exercise(&pool, &workout.id, "Squat").await;
    common::create_test_set(&pool, &squat.id, 5, 110.0).await;
    common::create_test_set(&pool, &squat.id, 5, 100.0).await;

    // Far outside both the week and the month
    let old = today - Days::new(90);
    let ancient = common::create_test_workout(&pool, &user.id, "Ancient", old, Some("chest")).await;
    let bench = common::create_test_exercise(&pool, &ancient.id, "Bench").await;
    common::create_test_set(&pool, &bench.id, 1, 200.0).await;

    let app = common::create_test_app(pool);

    for uri in ["/", "/?period=week", "/?period=month", "/?period=bogus"] {
        let response = common::get(&app, uri, Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        let body = common::body_string(response).await;
        assert!(body.contains("<strong>1</strong>Workouts"), "{}", uri);
        assert!(body.contains("<strong>110 kg</strong>Heaviest set"), "{}", uri);
        assert!(body.contains("<strong>Legs</strong>Top muscle group"), "{}", uri);
        assert!(body.contains("<strong>2</strong>Sets"), "{}", uri);
    }

    let body = common::body_string(common::get(&app, "/?period=month", Some(&cookie)).await).await;
    assert!(body.contains("This month"));
}

#[tokio::test]
async fn test_dashboard_empty_period() {
    let pool = common::setup_test_db();
    let (_, cookie) = common::logged_in_user(&pool, "lifter").await;
    let app = common::create_test_app(pool);

    let body = common::body_string(common::get(&app, "/", Some(&cookie)).await).await;
    assert!(body.contains("This week"));
    assert!(body.contains("<strong>0</strong>Workouts"));
    assert!(body.contains("<strong>-</strong>Top muscle group"));
    assert!(body.contains("No sessions yet"));
}

#[tokio::test]
async fn test_dashboard_lists_five_recent_sessions() {
    let pool = common::setup_test_db();
    let (user, cookie) = common::logged_in_user(&pool, "lifter").await;
    for day in 1..=6 {
        common::create_test_workout(
            &pool,
            &user.id,
            &format!("Session {}", day),
            common::date(2024, 1, day),
            None,
        )
        .await;
    }
    let app = common::create_test_app(pool);

    let body = common::body_string(common::get(&app, "/", Some(&cookie)).await).await;
    assert!(body.contains("Session 6"));
    assert!(body.contains("Session 2"));
    assert!(!body.contains("Session 1<"));
}
