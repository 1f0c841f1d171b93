mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_progress_empty_state() {
    let pool = common::setup_test_db();
    let (_, cookie) = common::logged_in_user(&pool, "lifter").await;
    let app = common::create_test_app(pool);

    let response = common::get(&app, "/progress", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(common::body_string(response)
        .await
        .contains("Log some exercises"));
}

#[tokio::test]
async fn test_progress_series_for_selected_exercise() {
    let pool = common::setup_test_db();
    let (user, cookie) = common::logged_in_user(&pool, "lifter").await;

    let first = common::create_test_workout(&pool, &user.id, "A", common::date(2024, 1, 10), None).await;
    let dl = common::create_test_exercise(&pool, &first.id, "Deadlift").await;
    common::create_test_set(&pool, &dl.id, 5, 130.0).await;
    let press = common::create_test_exercise(&pool, &first.id, "Press").await;
    common::create_test_set(&pool, &press.id, 5, 40.0).await;

    let second = common::create_test_workout(&pool, &user.id, "B", common::date(2024, 2, 1), None).await;
    let dl = common::create_test_exercise(&pool, &second.id, "Deadlift").await;
    common::create_test_set(&pool, &dl.id, 5, 140.0).await;
    common::create_test_set(&pool, &dl.id, 3, 150.0).await;

    let app = common::create_test_app(pool);

    // Defaults to the alphabetically first exercise
    let body = common::body_string(common::get(&app, "/progress", Some(&cookie)).await).await;
    assert!(body.contains("<h2>Deadlift</h2>"));
    assert!(body.contains("<polyline"));
    let older = body.find("10/01/2024").unwrap();
    let newer = body.find("01/02/2024").unwrap();
    assert!(older < newer);
    assert!(body.contains("<td>1150</td>"));

    let body =
        common::body_string(common::get(&app, "/progress?exercise=Press", Some(&cookie)).await).await;
    assert!(body.contains("<h2>Press</h2>"));
    assert!(!body.contains("01/02/2024"));
}
