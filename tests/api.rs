// Router-level tests driven through tower's oneshot.

mod common;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::{memory_pool, read_fixture};
use ootp_tournament_stats::api::create_router;
use ootp_tournament_stats::api::handlers::AppState;
use ootp_tournament_stats::config::AppConfig;
use serde_json::Value;
use tower::ServiceExt;

const PASSWORD: &str = "let-me-in";

fn app_with(config: AppConfig) -> Router {
    let state = Arc::new(AppState {
        pool: memory_pool(),
        config,
    });
    create_router(state)
}

fn app() -> Router {
    let mut config = AppConfig::default();
    config.upload.password = Some(PASSWORD.to_string());
    app_with(config)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn create_request(name: &str, password: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/tournaments")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(password) = password {
        builder = builder.header("x-upload-password", password);
    }
    builder
        .body(Body::from(format!(r#"{{"name":"{}"}}"#, name)))
        .unwrap()
}

fn upload_request(id: i64, filename: &str, csv: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/api/tournaments/{}/uploads?filename={}", id, filename))
        .header("x-upload-password", PASSWORD)
        .body(Body::from(csv))
        .unwrap()
}

#[tokio::test]
async fn lists_no_tournaments_initially() {
    let app = app();
    let (status, body) = send(&app, Request::get("/api/tournaments").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn creating_requires_the_password() {
    let app = app();

    let (status, _) = send(&app, create_request("Summer Cup", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, create_request("Summer Cup", Some("wrong"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn upload_then_view_sorted_roster() {
    let app = app();
    let (status, created) = send(&app, create_request("Summer Cup", Some(PASSWORD))).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let (status, report) = send(&app, upload_request(id, "week1.csv", read_fixture("batting_week1.csv"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["kind"], "batting");
    assert_eq!(report["playersAdded"], 2);

    let (status, report) = send(&app, upload_request(id, "again.csv", read_fixture("batting_week1.csv"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(report["category"], "duplicate_file");

    let uri = format!("/api/tournaments/{}?kind=batting&sort_by=AVG&order=desc", id);
    let (status, detail) = send(&app, Request::get(uri).body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["uploadCount"], 1);
    assert!(detail.get("pitching").is_none());
    assert_eq!(detail["batting"][0]["name"], "Jones");
    assert_eq!(detail["batting"][1]["name"], "Smith");
}

#[tokio::test]
async fn upload_rejects_non_csv_names() {
    let app = app();
    let (_, created) = send(&app, create_request("Summer Cup", Some(PASSWORD))).await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(&app, upload_request(id, "stats.txt", read_fixture("batting_week1.csv"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["category"], "invalid_file_type");
}

#[tokio::test]
async fn deleting_removes_the_tournament() {
    let app = app();
    let (_, created) = send(&app, create_request("Summer Cup", Some(PASSWORD))).await;
    let id = created["id"].as_i64().unwrap();

    let delete = Request::delete(format!("/api/tournaments/{}", id))
        .header("x-upload-password", PASSWORD)
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, delete).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Request::get(format!("/api/tournaments/{}", id)).body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_leaderboard_reads() {
    let app = app();

    let (status, body) = send(&app, Request::get("/api/leaderboard?mode=weekly").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "weekly");
    assert_eq!(body["periodKey"], Value::Null);
    assert_eq!(body["entries"], serde_json::json!([]));

    let (status, body) = send(&app, Request::get("/api/leaderboard/all-time").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn production_trigger_requires_credentials() {
    let mut config = AppConfig::default();
    config.server.environment = "production".to_string();
    config.server.cron_secret = Some("s3cret".to_string());
    let app = app_with(config);

    let (status, body) = send(&app, Request::get("/api/cron/leaderboard").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn trigger_failures_are_reported_as_json() {
    // development and no feed configured: runs dry and fails at the fetch step
    let app = app();

    let (status, body) = send(&app, Request::get("/api/cron/leaderboard").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("LEADERBOARD_SOURCE_URL"));
}
