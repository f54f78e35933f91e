use std::sync::{Arc, Condvar, Mutex};

use super::{BoardDataset, BoardImportError};

enum CacheSlot {
    Empty,
    Loading,
    Ready(Arc<BoardDataset>),
}

/// Single-flight cache in front of the board dataset import.
///
/// The first caller runs the loader; callers arriving while that load is in
/// flight wait for its outcome rather than launching their own. A failed
/// load empties the slot again so a later call can retry.
pub struct DatasetCache {
    slot: Mutex<CacheSlot>,
    settled: Condvar,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(CacheSlot::Empty),
            settled: Condvar::new(),
        }
    }

    /// Dataset from a previously completed load, if any.
    pub fn cached(&self) -> Option<Arc<BoardDataset>> {
        match &*self.slot.lock().expect("cache mutex poisoned") {
            CacheSlot::Ready(dataset) => Some(dataset.clone()),
            _ => None,
        }
    }

    /// Return the cached dataset, or run `loader` to fill the cache.
    pub fn get_or_load<F>(&self, loader: F) -> Result<Arc<BoardDataset>, BoardImportError>
    where
        F: FnOnce() -> Result<BoardDataset, BoardImportError>,
    {
        let mut slot = self.slot.lock().expect("cache mutex poisoned");
        loop {
            match &*slot {
                CacheSlot::Ready(dataset) => return Ok(dataset.clone()),
                CacheSlot::Loading => {
                    slot = self.settled.wait(slot).expect("cache mutex poisoned");
                }
                CacheSlot::Empty => break,
            }
        }

        *slot = CacheSlot::Loading;
        drop(slot);

        let outcome = loader();

        let mut slot = self.slot.lock().expect("cache mutex poisoned");
        match outcome {
            Ok(dataset) => {
                let dataset = Arc::new(dataset);
                *slot = CacheSlot::Ready(dataset.clone());
                self.settled.notify_all();
                Ok(dataset)
            }
            Err(error) => {
                *slot = CacheSlot::Empty;
                self.settled.notify_all();
                Err(error)
            }
        }
    }
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new()
    }
}
