use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::board::importer::BoardDataset;
use crate::board::suggestions::{
    board_router, ClientProfile, InMemoryStateStorage, LoyaltyTier, PreventiveStatus,
    PriorityEngine, ScoringConfig, StateStorage, StorageError, SuggestionBoardService,
    SuggestionId, SuggestionRecord, SuggestionState, SuggestionStore,
};

pub(super) fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 25).expect("valid date")
}

pub(super) fn engine() -> PriorityEngine {
    PriorityEngine::default()
}

pub(super) fn sid(raw: &str) -> SuggestionId {
    SuggestionId(raw.to_string())
}

/// Mid-size client outside the enterprise list. Totals 145 under the default
/// rubric as of [`fixed_today`].
pub(super) fn regular_profile() -> ClientProfile {
    ClientProfile {
        company: "Horizonte Net".to_string(),
        contact_email: "produto@horizontenet.example.com".to_string(),
        total_customers: 8_200,
        preventive_status: PreventiveStatus::Attention,
        nps: 9,
        loyalty: LoyaltyTier::None,
        suggestions_submitted: 28,
        tenure_years: 6,
        account_created_on: NaiveDate::from_ymd_opt(2019, 11, 20).expect("valid date"),
    }
}

/// Enterprise client hitting the heavy buckets. Totals 355 under the default
/// rubric as of [`fixed_today`].
pub(super) fn enterprise_profile() -> ClientProfile {
    ClientProfile {
        company: "Alcans Telecom Ltda".to_string(),
        contact_email: "noc@alcans.example.com".to_string(),
        total_customers: 48_000,
        preventive_status: PreventiveStatus::Critical,
        nps: 7,
        loyalty: LoyaltyTier::Full,
        suggestions_submitted: 12,
        tenure_years: 11,
        account_created_on: NaiveDate::from_ymd_opt(2017, 3, 10).expect("valid date"),
    }
}

pub(super) fn record(
    id: &str,
    votes: u32,
    comments: u32,
    client: ClientProfile,
) -> SuggestionRecord {
    SuggestionRecord {
        id: sid(id),
        title: format!("Suggestion {id}"),
        votes,
        comments,
        client,
    }
}

pub(super) fn build_store() -> (
    Arc<SuggestionStore<InMemoryStateStorage>>,
    InMemoryStateStorage,
) {
    let storage = InMemoryStateStorage::default();
    (Arc::new(SuggestionStore::new(storage.clone())), storage)
}

pub(super) fn build_service() -> (
    Arc<SuggestionBoardService<InMemoryStateStorage>>,
    InMemoryStateStorage,
) {
    let storage = InMemoryStateStorage::default();
    let service = SuggestionBoardService::new(
        storage.clone(),
        Arc::new(BoardDataset::sample()),
        ScoringConfig::default(),
    );
    (Arc::new(service), storage)
}

pub(super) fn board_router_with_service(
    service: Arc<SuggestionBoardService<InMemoryStateStorage>>,
) -> axum::Router {
    board_router(service)
}

/// Collects the notifications a subscriber received, in delivery order.
#[derive(Default, Clone)]
pub(super) struct EventLog {
    events: Arc<Mutex<Vec<(SuggestionId, SuggestionState)>>>,
}

impl EventLog {
    pub(super) fn recorder(
        &self,
    ) -> impl Fn(&SuggestionId, &SuggestionState) + Send + Sync + 'static {
        let events = self.events.clone();
        move |id, state| {
            events
                .lock()
                .expect("event mutex poisoned")
                .push((id.clone(), state.clone()));
        }
    }

    pub(super) fn events(&self) -> Vec<(SuggestionId, SuggestionState)> {
        self.events.lock().expect("event mutex poisoned").clone()
    }
}

/// Storage that refuses every call, standing in for an unreachable backend.
pub(super) struct FailingStorage;

impl StateStorage for FailingStorage {
    fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("backend offline".to_string()))
    }

    fn save(&self, _key: &str, _blob: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("backend offline".to_string()))
    }
}

pub(super) fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

pub(super) fn json_request(method: Method, uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::to_vec(payload).expect("serialize payload"),
        ))
        .expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
