use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Key under which the whole suggestion state map is persisted.
pub const STATE_STORAGE_KEY: &str = "suggestionStates";

/// Key-value blob store the suggestion store persists through.
pub trait StateStorage: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn save(&self, key: &str, blob: &str) -> Result<(), StorageError>;
}

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage io failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Process-local storage for tests, demos, and stateless deployments.
#[derive(Default, Clone)]
pub struct InMemoryStateStorage {
    blobs: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStateStorage {
    /// Current blob for a key, mainly for assertions and debugging.
    pub fn snapshot(&self, key: &str) -> Option<String> {
        self.blobs
            .lock()
            .expect("storage mutex poisoned")
            .get(key)
            .cloned()
    }
}

impl StateStorage for InMemoryStateStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .blobs
            .lock()
            .expect("storage mutex poisoned")
            .get(key)
            .cloned())
    }

    fn save(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        self.blobs
            .lock()
            .expect("storage mutex poisoned")
            .insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

/// Storage keeping each key in `<dir>/<key>.json`.
pub struct FileStateStorage {
    dir: PathBuf,
}

impl FileStateStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StateStorage for FileStateStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.blob_path(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(StorageError::Io(error)),
        }
    }

    fn save(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.blob_path(key), blob)?;
        Ok(())
    }
}
