use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Display;
use std::sync::Arc;

use crate::error::StoreResult;

/// Logical keys in the persisted state space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// Ordered list of favorite entries
    Favorites,
    /// Theme mode string
    Theme,
}

impl Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreKey::Favorites => write!(f, "favorites"),
            StoreKey::Theme => write!(f, "theme"),
        }
    }
}

/// Raw durable storage of JSON text by key
///
/// Backends may fail; [`PersistentStore`] is the layer that absorbs those failures.
pub trait StorageBackend: Send + Sync {
    /// Returns the stored JSON text for `key`, if any
    fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replaces the JSON text stored under `key`
    fn write(&self, key: &str, json: String) -> StoreResult<()>;

    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Durable key to JSON-value map scoped to the application
///
/// Both operations are total. A failed read looks like an absent value and a
/// failed write is logged and otherwise ignored, so the worst outcome is state
/// falling back to its default on the next start.
#[derive(Clone)]
pub struct PersistentStore {
    backend: Arc<dyn StorageBackend>,
}

impl PersistentStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Retrieves and deserializes the value stored under `key`
    ///
    /// Returns `None` when nothing is stored, the backend fails, or the stored
    /// JSON does not match `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &StoreKey) -> Option<T> {
        let json = match self.backend.read(&key.to_string()) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    key = %key,
                    backend = self.backend.name(),
                    "Store read failed"
                );
                return None;
            }
        };

        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(error = %e, key = %key, "Stored value is unparseable");
                None
            }
        }
    }

    /// Serializes `value` and stores it under `key`
    pub fn set<T: Serialize + ?Sized>(&self, key: &StoreKey, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(j) => j,
            Err(e) => {
                tracing::error!(error = %e, key = %key, "Store serialization error");
                return;
            }
        };

        if let Err(e) = self.backend.write(&key.to_string(), json) {
            tracing::error!(
                error = %e,
                key = %key,
                backend = self.backend.name(),
                "Store write failed, value will not survive a restart"
            );
        }
    }
}
