mod bus;
mod storage;

pub use bus::Subscription;
pub use storage::{
    FileStateStorage, InMemoryStateStorage, StateStorage, StorageError, STATE_STORAGE_KEY,
};

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::sync::Mutex;

use tracing::{error, warn};

use super::domain::{
    DevelopmentStatus, StatePatch, SuggestionId, SuggestionState, SuggestionStateView,
};
use bus::ChangeBus;

/// Persistent map of suggestion id to administrative state with synchronous
/// change notification.
///
/// Reads never fail: ids nobody has touched resolve to the empty state.
/// `update` merges a patch over the stored state, persists the whole map,
/// then notifies subscribers with the merged result. Updates issued from
/// inside a subscriber callback are queued and delivered once the current
/// notification pass finishes, in order.
pub struct SuggestionStore<S> {
    storage: S,
    states: Mutex<BTreeMap<SuggestionId, SuggestionState>>,
    bus: Arc<ChangeBus>,
    pending: Mutex<VecDeque<(SuggestionId, SuggestionState)>>,
    notifying: AtomicBool,
}

impl<S> SuggestionStore<S>
where
    S: StateStorage,
{
    /// Build a store over `storage`, rehydrating previously persisted states.
    /// A missing, unreadable, or malformed blob starts the board empty.
    pub fn new(storage: S) -> Self {
        let states = match storage.load(STATE_STORAGE_KEY) {
            Ok(Some(blob)) => match serde_json::from_str(&blob) {
                Ok(map) => map,
                Err(error) => {
                    warn!(%error, "discarding malformed suggestion state blob");
                    BTreeMap::new()
                }
            },
            Ok(None) => BTreeMap::new(),
            Err(error) => {
                warn!(%error, "suggestion state storage unavailable; starting empty");
                BTreeMap::new()
            }
        };

        Self {
            storage,
            states: Mutex::new(states),
            bus: ChangeBus::new(),
            pending: Mutex::new(VecDeque::new()),
            notifying: AtomicBool::new(false),
        }
    }

    /// Current state for a suggestion.
    pub fn state(&self, id: &SuggestionId) -> SuggestionState {
        self.states
            .lock()
            .expect("state mutex poisoned")
            .get(id)
            .cloned()
            .unwrap_or_default()
    }

    /// Merge `patch` over the stored state, persist, then notify. Returns the
    /// merged state.
    pub fn update(&self, id: &SuggestionId, patch: StatePatch) -> SuggestionState {
        let (merged, blob) = {
            let mut states = self.states.lock().expect("state mutex poisoned");
            let entry = states.entry(id.clone()).or_default();
            patch.apply_to(entry);
            (entry.clone(), serde_json::to_string(&*states))
        };

        // Persist before notifying so subscribers observe durable state. A
        // failed write keeps the in-memory copy authoritative.
        match blob {
            Ok(blob) => {
                if let Err(error) = self.storage.save(STATE_STORAGE_KEY, &blob) {
                    warn!(%error, suggestion = %id, "failed to persist suggestion states");
                }
            }
            Err(error) => error!(%error, "failed to serialize suggestion states"),
        }

        self.enqueue_notification(id.clone(), merged.clone());
        merged
    }

    pub fn link_to_jira(&self, id: &SuggestionId, code: impl Into<String>) -> SuggestionState {
        self.update(id, StatePatch::link_jira(code))
    }

    pub fn add_to_roadmap(
        &self,
        id: &SuggestionId,
        roadmap_id: impl Into<String>,
    ) -> SuggestionState {
        self.update(id, StatePatch::add_to_roadmap(roadmap_id))
    }

    pub fn remove_from_roadmap(&self, id: &SuggestionId) -> SuggestionState {
        self.update(id, StatePatch::remove_from_roadmap())
    }

    pub fn update_development_status(
        &self,
        id: &SuggestionId,
        status: DevelopmentStatus,
    ) -> SuggestionState {
        self.update(id, StatePatch::development_status(status))
    }

    pub fn archive(&self, id: &SuggestionId) -> SuggestionState {
        self.update(id, StatePatch::archived(true))
    }

    pub fn unarchive(&self, id: &SuggestionId) -> SuggestionState {
        self.update(id, StatePatch::archived(false))
    }

    pub fn has_jira_task(&self, id: &SuggestionId) -> bool {
        self.state(id).jira_task_code.is_some()
    }

    pub fn is_in_roadmap(&self, id: &SuggestionId) -> bool {
        self.state(id).in_roadmap.unwrap_or(false)
    }

    pub fn is_archived(&self, id: &SuggestionId) -> bool {
        self.state(id).archived.unwrap_or(false)
    }

    /// Delivery stage for a suggestion; untouched ids sit in the backlog.
    pub fn development_status(&self, id: &SuggestionId) -> DevelopmentStatus {
        self.state(id).development_status.unwrap_or_default()
    }

    pub fn state_view(&self, id: &SuggestionId) -> SuggestionStateView {
        self.state(id).to_view(id.clone())
    }

    /// Register a callback for committed updates. The returned capability
    /// detaches it again; dropping the capability leaves it attached.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&SuggestionId, &SuggestionState) + Send + Sync + 'static,
    {
        self.bus.register(Arc::new(callback))
    }

    pub fn subscriber_count(&self) -> usize {
        self.bus.subscriber_count()
    }

    /// Queue one delivery and drain the queue unless an outer notification
    /// pass already owns it.
    fn enqueue_notification(&self, id: SuggestionId, state: SuggestionState) {
        self.pending
            .lock()
            .expect("pending mutex poisoned")
            .push_back((id, state));

        if self.notifying.swap(true, Ordering::AcqRel) {
            // A pass further up the stack owns the queue and will deliver
            // this entry before it returns.
            return;
        }

        loop {
            let next = self
                .pending
                .lock()
                .expect("pending mutex poisoned")
                .pop_front();

            match next {
                Some((id, state)) => self.bus.dispatch(&id, &state),
                None => {
                    self.notifying.store(false, Ordering::Release);
                    // An update may race in between the final pop and the
                    // flag release; reclaim the queue if so.
                    let queued = !self
                        .pending
                        .lock()
                        .expect("pending mutex poisoned")
                        .is_empty();
                    if queued && !self.notifying.swap(true, Ordering::AcqRel) {
                        continue;
                    }
                    break;
                }
            }
        }
    }
}
