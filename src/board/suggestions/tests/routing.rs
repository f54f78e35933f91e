use super::common::*;
use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn board_endpoint_serves_the_ranked_list() {
    let (service, _storage) = build_service();
    let router = board_router_with_service(service);

    let response = router
        .oneshot(request(Method::GET, "/api/v1/board/suggestions"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let entries = payload.as_array().expect("array payload");
    assert_eq!(entries.len(), 8);
    assert_eq!(entries[0]["position"], json!(1));

    let first = entries[0]["ranking_score"].as_u64().expect("ranking score");
    let second = entries[1]["ranking_score"].as_u64().expect("ranking score");
    assert!(first >= second);
}

#[tokio::test]
async fn board_accepts_each_documented_sort_key() {
    let (service, _storage) = build_service();
    let router = board_router_with_service(service);

    for key in ["score", "votes", "comments"] {
        let response = router
            .clone()
            .oneshot(request(
                Method::GET,
                &format!("/api/v1/board/suggestions?sort={key}"),
            ))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK, "sort key {key}");
    }
}

#[tokio::test]
async fn board_rejects_unknown_sort_keys() {
    let (service, _storage) = build_service();
    let router = board_router_with_service(service);

    let response = router
        .oneshot(request(
            Method::GET,
            "/api/v1/board/suggestions?sort=priority",
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("unknown sort key"));
}

#[tokio::test]
async fn state_endpoint_serves_defaults_for_untouched_ids() {
    let (service, _storage) = build_service();
    let router = board_router_with_service(service);

    let response = router
        .oneshot(request(
            Method::GET,
            "/api/v1/board/suggestions/s-999/state",
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["suggestion_id"], json!("s-999"));
    assert_eq!(payload["in_roadmap"], json!(false));
    assert_eq!(payload["development_status"], json!("backlog"));
    assert_eq!(payload["archived"], json!(false));
    assert!(payload.get("jira_task_code").is_none());
    assert!(payload.get("roadmap_id").is_none());
}

#[tokio::test]
async fn jira_links_round_trip_over_http() {
    let (service, _storage) = build_service();
    let router = board_router_with_service(service);

    let response = router
        .clone()
        .oneshot(json_request(
            Method::PUT,
            "/api/v1/board/suggestions/s-101/jira",
            &json!({"code": "PLAT-123"}),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["jira_task_code"], json!("PLAT-123"));

    let response = router
        .oneshot(request(
            Method::GET,
            "/api/v1/board/suggestions/s-101/state",
        ))
        .await
        .expect("route executes");

    let payload = read_json_body(response).await;
    assert_eq!(payload["jira_task_code"], json!("PLAT-123"));
}

#[tokio::test]
async fn roadmap_lifecycle_over_http() {
    let (service, _storage) = build_service();
    let router = board_router_with_service(service);

    let response = router
        .clone()
        .oneshot(json_request(
            Method::PUT,
            "/api/v1/board/suggestions/s-102/roadmap",
            &json!({"roadmap_id": "2026-Q1"}),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["in_roadmap"], json!(true));
    assert_eq!(payload["roadmap_id"], json!("2026-Q1"));
    assert_eq!(payload["development_status"], json!("in-development"));

    let response = router
        .oneshot(request(
            Method::DELETE,
            "/api/v1/board/suggestions/s-102/roadmap",
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["in_roadmap"], json!(false));
    assert_eq!(payload["development_status"], json!("backlog"));
    assert!(payload.get("roadmap_id").is_none());
}

#[tokio::test]
async fn archived_suggestions_hide_until_requested() {
    let (service, _storage) = build_service();
    let router = board_router_with_service(service);

    let response = router
        .clone()
        .oneshot(request(
            Method::PUT,
            "/api/v1/board/suggestions/s-104/archive",
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["archived"], json!(true));

    let response = router
        .clone()
        .oneshot(request(Method::GET, "/api/v1/board/suggestions"))
        .await
        .expect("route executes");

    let payload = read_json_body(response).await;
    let entries = payload.as_array().expect("array payload");
    assert_eq!(entries.len(), 7);
    assert!(entries
        .iter()
        .all(|entry| entry["record"]["id"] != json!("s-104")));

    let response = router
        .oneshot(request(
            Method::GET,
            "/api/v1/board/suggestions?include_archived=true",
        ))
        .await
        .expect("route executes");

    let payload = read_json_body(response).await;
    let entries = payload.as_array().expect("array payload");
    assert_eq!(entries.len(), 8);
    let archived = entries
        .iter()
        .find(|entry| entry["record"]["id"] == json!("s-104"))
        .expect("archived entry listed");
    assert_eq!(archived["state"]["archived"], json!(true));
}

#[tokio::test]
async fn unarchiving_restores_board_visibility() {
    let (service, _storage) = build_service();
    let router = board_router_with_service(service);

    let response = router
        .clone()
        .oneshot(request(
            Method::PUT,
            "/api/v1/board/suggestions/s-105/archive",
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(request(
            Method::DELETE,
            "/api/v1/board/suggestions/s-105/archive",
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(request(Method::GET, "/api/v1/board/suggestions"))
        .await
        .expect("route executes");
    let payload = read_json_body(response).await;
    assert_eq!(payload.as_array().expect("array payload").len(), 8);
}

#[tokio::test]
async fn status_updates_take_kebab_case_stages() {
    let (service, _storage) = build_service();
    let router = board_router_with_service(service);

    let response = router
        .oneshot(json_request(
            Method::PUT,
            "/api/v1/board/suggestions/s-106/status",
            &json!({"status": "in-development"}),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["development_status"], json!("in-development"));
}

#[tokio::test]
async fn unknown_status_values_are_rejected() {
    let (service, _storage) = build_service();
    let router = board_router_with_service(service);

    let response = router
        .oneshot(json_request(
            Method::PUT,
            "/api/v1/board/suggestions/s-106/status",
            &json!({"status": "shipping"}),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn score_preview_reports_total_tier_and_breakdown() {
    let (service, _storage) = build_service();
    let router = board_router_with_service(service);

    let profile = serde_json::to_value(enterprise_profile()).expect("serialize profile");
    let response = router
        .oneshot(json_request(Method::POST, "/api/v1/board/score", &profile))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["total"], json!(355));
    assert_eq!(payload["tier"], json!("1"));
    assert_eq!(payload["components"].as_array().expect("components").len(), 8);
}
