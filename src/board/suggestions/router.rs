use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ClientProfile, DevelopmentStatus, SuggestionId};
use super::ranking::RankingMode;
use super::service::SuggestionBoardService;
use super::store::StateStorage;

/// Router builder exposing the suggestion board administration endpoints.
pub fn board_router<S>(service: Arc<SuggestionBoardService<S>>) -> Router
where
    S: StateStorage + 'static,
{
    Router::new()
        .route("/api/v1/board/suggestions", get(board_handler::<S>))
        .route(
            "/api/v1/board/suggestions/:suggestion_id/state",
            get(state_handler::<S>),
        )
        .route(
            "/api/v1/board/suggestions/:suggestion_id/jira",
            put(link_jira_handler::<S>),
        )
        .route(
            "/api/v1/board/suggestions/:suggestion_id/roadmap",
            put(add_roadmap_handler::<S>).delete(remove_roadmap_handler::<S>),
        )
        .route(
            "/api/v1/board/suggestions/:suggestion_id/status",
            put(update_status_handler::<S>),
        )
        .route(
            "/api/v1/board/suggestions/:suggestion_id/archive",
            put(archive_handler::<S>).delete(unarchive_handler::<S>),
        )
        .route("/api/v1/board/score", post(score_preview_handler::<S>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct BoardQuery {
    sort: Option<String>,
    #[serde(default)]
    include_archived: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LinkJiraRequest {
    code: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddRoadmapRequest {
    roadmap_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateStatusRequest {
    status: DevelopmentStatus,
}

pub(crate) async fn board_handler<S>(
    State(service): State<Arc<SuggestionBoardService<S>>>,
    Query(query): Query<BoardQuery>,
) -> Response
where
    S: StateStorage + 'static,
{
    let mode = match query.sort.as_deref() {
        None => RankingMode::default(),
        Some("score") => RankingMode::Score,
        Some("votes") => RankingMode::Votes,
        Some("comments") => RankingMode::Comments,
        Some(other) => {
            let payload = json!({
                "error": format!("unknown sort key '{other}'; expected score, votes, or comments"),
            });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    let entries = service.board(mode, query.include_archived);
    (StatusCode::OK, axum::Json(entries)).into_response()
}

pub(crate) async fn state_handler<S>(
    State(service): State<Arc<SuggestionBoardService<S>>>,
    Path(suggestion_id): Path<String>,
) -> Response
where
    S: StateStorage + 'static,
{
    let id = SuggestionId(suggestion_id);
    let view = service.store().state_view(&id);
    (StatusCode::OK, axum::Json(view)).into_response()
}

pub(crate) async fn link_jira_handler<S>(
    State(service): State<Arc<SuggestionBoardService<S>>>,
    Path(suggestion_id): Path<String>,
    axum::Json(request): axum::Json<LinkJiraRequest>,
) -> Response
where
    S: StateStorage + 'static,
{
    let id = SuggestionId(suggestion_id);
    let state = service.store().link_to_jira(&id, request.code);
    (StatusCode::OK, axum::Json(state.to_view(id))).into_response()
}

pub(crate) async fn add_roadmap_handler<S>(
    State(service): State<Arc<SuggestionBoardService<S>>>,
    Path(suggestion_id): Path<String>,
    axum::Json(request): axum::Json<AddRoadmapRequest>,
) -> Response
where
    S: StateStorage + 'static,
{
    let id = SuggestionId(suggestion_id);
    let state = service.store().add_to_roadmap(&id, request.roadmap_id);
    (StatusCode::OK, axum::Json(state.to_view(id))).into_response()
}

pub(crate) async fn remove_roadmap_handler<S>(
    State(service): State<Arc<SuggestionBoardService<S>>>,
    Path(suggestion_id): Path<String>,
) -> Response
where
    S: StateStorage + 'static,
{
    let id = SuggestionId(suggestion_id);
    let state = service.store().remove_from_roadmap(&id);
    (StatusCode::OK, axum::Json(state.to_view(id))).into_response()
}

pub(crate) async fn update_status_handler<S>(
    State(service): State<Arc<SuggestionBoardService<S>>>,
    Path(suggestion_id): Path<String>,
    axum::Json(request): axum::Json<UpdateStatusRequest>,
) -> Response
where
    S: StateStorage + 'static,
{
    let id = SuggestionId(suggestion_id);
    let state = service
        .store()
        .update_development_status(&id, request.status);
    (StatusCode::OK, axum::Json(state.to_view(id))).into_response()
}

pub(crate) async fn archive_handler<S>(
    State(service): State<Arc<SuggestionBoardService<S>>>,
    Path(suggestion_id): Path<String>,
) -> Response
where
    S: StateStorage + 'static,
{
    let id = SuggestionId(suggestion_id);
    let state = service.store().archive(&id);
    (StatusCode::OK, axum::Json(state.to_view(id))).into_response()
}

pub(crate) async fn unarchive_handler<S>(
    State(service): State<Arc<SuggestionBoardService<S>>>,
    Path(suggestion_id): Path<String>,
) -> Response
where
    S: StateStorage + 'static,
{
    let id = SuggestionId(suggestion_id);
    let state = service.store().unarchive(&id);
    (StatusCode::OK, axum::Json(state.to_view(id))).into_response()
}

pub(crate) async fn score_preview_handler<S>(
    State(service): State<Arc<SuggestionBoardService<S>>>,
    axum::Json(profile): axum::Json<ClientProfile>,
) -> Response
where
    S: StateStorage + 'static,
{
    let score = service.preview_score(&profile);
    (StatusCode::OK, axum::Json(score)).into_response()
}
