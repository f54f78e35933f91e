use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::ServiceExt;

use mural_admin::board::importer::BoardDataset;
use mural_admin::board::suggestions::{
    board_router, InMemoryStateStorage, RankingMode, ScoringConfig, SuggestionBoardService,
    SuggestionId,
};

fn service_over(
    storage: InMemoryStateStorage,
) -> Arc<SuggestionBoardService<InMemoryStateStorage>> {
    Arc::new(SuggestionBoardService::new(
        storage,
        Arc::new(BoardDataset::sample()),
        ScoringConfig::default(),
    ))
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

fn put_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::to_vec(payload).expect("serialize payload"),
        ))
        .expect("request builds")
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[tokio::test]
async fn board_reflects_admin_actions_end_to_end() {
    let service = service_over(InMemoryStateStorage::default());
    let board_size = service.dataset().len();
    let router = board_router(service);

    let response = router
        .clone()
        .oneshot(put_json(
            "/api/v1/board/suggestions/s-106/roadmap",
            &json!({"roadmap_id": "2026-Q1"}),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(put_json(
            "/api/v1/board/suggestions/s-106/jira",
            &json!({"code": "PLAT-88"}),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(empty_request(
            Method::GET,
            "/api/v1/board/suggestions?sort=votes",
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    let entries = payload.as_array().expect("board payload");
    assert_eq!(entries.len(), board_size);

    let positions: Vec<u64> = entries
        .iter()
        .map(|entry| entry["position"].as_u64().expect("position"))
        .collect();
    assert_eq!(positions, (1..=board_size as u64).collect::<Vec<u64>>());

    let tracked = entries
        .iter()
        .find(|entry| entry["record"]["id"] == json!("s-106"))
        .expect("s-106 on the board");
    assert_eq!(tracked["state"]["in_roadmap"], json!(true));
    assert_eq!(tracked["state"]["jira_task_code"], json!("PLAT-88"));
    assert_eq!(tracked["state"]["development_status"], json!("in-development"));
}

#[tokio::test]
async fn archives_survive_a_service_restart() {
    let storage = InMemoryStateStorage::default();

    let router = board_router(service_over(storage.clone()));
    let response = router
        .oneshot(empty_request(
            Method::PUT,
            "/api/v1/board/suggestions/s-102/archive",
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    // A fresh service over the same storage rehydrates the archive flag.
    let restarted = board_router(service_over(storage));
    let response = restarted
        .oneshot(empty_request(
            Method::GET,
            "/api/v1/board/suggestions/s-102/state",
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["archived"], json!(true));
}

#[tokio::test]
async fn http_updates_notify_store_subscribers() {
    let service = service_over(InMemoryStateStorage::default());

    let events = Arc::new(Mutex::new(Vec::new()));
    let log = events.clone();
    let _subscription = service.store().subscribe(move |id, state| {
        log.lock()
            .expect("event mutex poisoned")
            .push((id.clone(), state.clone()));
    });

    let router = board_router(service);
    let response = router
        .oneshot(empty_request(
            Method::PUT,
            "/api/v1/board/suggestions/s-101/archive",
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let events = events.lock().expect("event mutex poisoned").clone();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, SuggestionId("s-101".to_string()));
    assert_eq!(events[0].1.archived, Some(true));
}

#[test]
fn board_ranking_is_deterministic_for_a_fixed_date() {
    let service = service_over(InMemoryStateStorage::default());
    let today = NaiveDate::from_ymd_opt(2025, 8, 25).expect("valid date");

    let first = service.board_on(RankingMode::Score, false, today);
    let second = service.board_on(RankingMode::Score, false, today);

    assert_eq!(first, second);
    assert!(!first.is_empty());
}
