#![cfg(feature = "http_api")]

use axum::{
    body::{self, Body},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use task_planner::{Goal, Planner, TaskStatus, http_api};
use tower::util::ServiceExt;

fn new_router() -> axum::Router {
    let state = http_api::AppState::new(Planner::offline(14.0));
    http_api::router(state)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn read_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_plan(app: &axum::Router) -> Goal {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/plans",
            json!({ "goal": "Launch the new app", "totalDays": 20, "startDate": "2025-01-06" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await
}

#[tokio::test]
async fn health_reports_ok() {
    let response = new_router().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = read_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn plan_routes_are_not_found_before_generation() {
    let app = new_router();
    for uri in ["/plan", "/plan/days", "/plan/critical-path", "/plan/stats", "/plan/export/csv"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn plan_lifecycle_via_http_api() {
    let app = new_router();
    let goal = create_plan(&app).await;
    assert_eq!(goal.tasks.len(), 12);
    assert_eq!(goal.total_days, 20.0);

    // Current plan is stored
    let response = app.clone().oneshot(get("/plan")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let stored: Goal = read_json(response).await;
    assert_eq!(stored.id, goal.id);

    // Mark the first task done
    let task_id = goal.tasks[0].id;
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/plan/tasks/{task_id}/status"),
            json!({ "status": "completed" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Goal = read_json(response).await;
    assert_eq!(updated.tasks[0].status, TaskStatus::Completed);
    assert_eq!(updated.tasks[0].start_day, goal.tasks[0].start_day);

    // Stats reflect the change
    let response = app.clone().oneshot(get("/plan/stats")).await.unwrap();
    let stats: Value = read_json(response).await;
    assert_eq!(stats["completed"], 1);
    assert_eq!(stats["total_tasks"], 12);

    // Day plans cover day 0 through the budget
    let response = app.clone().oneshot(get("/plan/days")).await.unwrap();
    let days: Vec<Value> = read_json(response).await;
    assert_eq!(days.len(), 21);
}

#[tokio::test]
async fn status_update_rejects_bad_input() {
    let app = new_router();
    let goal = create_plan(&app).await;
    let task_id = goal.tasks[0].id;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/plan/tasks/{task_id}/status"),
            json!({ "status": "paused" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(response).await;
    assert_eq!(body["error"], "invalid_request");

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/plan/tasks/not-a-uuid/status",
            json!({ "status": "completed" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/plan/tasks/{}/status", task_planner::TaskId::new()),
            json!({ "status": "completed" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn oversized_budget_is_capped() {
    let response = new_router()
        .oneshot(json_request(
            "POST",
            "/plans",
            json!({ "goal": "Launch app", "totalDays": 1e9, "startDate": "2025-01-06" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let goal: Goal = read_json(response).await;
    assert_eq!(goal.total_days, task_planner::MAX_TOTAL_DAYS);
}

#[tokio::test]
async fn empty_goal_is_rejected() {
    let response = new_router()
        .oneshot(json_request("POST", "/plans", json!({ "goal": "   " })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn export_sets_content_type_and_file_name() {
    let app = new_router();
    create_plan(&app).await;

    let response = app.clone().oneshot(get("/plan/export/ics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/calendar");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"Launch_the_new_app.ics\""
    );
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&bytes).starts_with("BEGIN:VCALENDAR"));

    let response = app.clone().oneshot(get("/plan/export/pdf")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
