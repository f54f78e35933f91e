use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use tracing::error;

use super::super::domain::{SuggestionId, SuggestionState};

/// Callback invoked with the merged state after every committed update.
pub type ChangeCallback = dyn Fn(&SuggestionId, &SuggestionState) + Send + Sync;

struct RegisteredSubscriber {
    token: u64,
    callback: Arc<ChangeCallback>,
}

/// Synchronous fan-out of committed state changes.
///
/// Registration order is delivery order. A panicking subscriber is logged and
/// skipped; it never blocks the remaining subscribers or the caller.
pub(crate) struct ChangeBus {
    sequence: AtomicU64,
    subscribers: Mutex<Vec<RegisteredSubscriber>>,
}

impl ChangeBus {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            sequence: AtomicU64::new(1),
            subscribers: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn register(self: &Arc<Self>, callback: Arc<ChangeCallback>) -> Subscription {
        let token = self.sequence.fetch_add(1, Ordering::Relaxed);
        self.subscribers
            .lock()
            .expect("subscriber mutex poisoned")
            .push(RegisteredSubscriber { token, callback });

        Subscription {
            token,
            bus: Arc::downgrade(self),
        }
    }

    fn remove(&self, token: u64) {
        self.subscribers
            .lock()
            .expect("subscriber mutex poisoned")
            .retain(|subscriber| subscriber.token != token);
    }

    /// Deliver one change to every subscriber registered at call time.
    pub(crate) fn dispatch(&self, id: &SuggestionId, state: &SuggestionState) {
        // Snapshot the registry so callbacks run without holding the lock and
        // may subscribe or unsubscribe freely from inside.
        let active: Vec<(u64, Arc<ChangeCallback>)> = {
            let subscribers = self.subscribers.lock().expect("subscriber mutex poisoned");
            subscribers
                .iter()
                .map(|subscriber| (subscriber.token, subscriber.callback.clone()))
                .collect()
        };

        for (token, callback) in active {
            if catch_unwind(AssertUnwindSafe(|| callback(id, state))).is_err() {
                error!(
                    token,
                    suggestion = %id,
                    "suggestion subscriber panicked; continuing with remaining subscribers"
                );
            }
        }
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .expect("subscriber mutex poisoned")
            .len()
    }
}

/// Capability returned by `subscribe`. Calling [`Subscription::unsubscribe`]
/// detaches the callback; further calls are no-ops.
pub struct Subscription {
    token: u64,
    bus: Weak<ChangeBus>,
}

impl Subscription {
    pub fn unsubscribe(&self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.remove(self.token);
        }
    }
}
