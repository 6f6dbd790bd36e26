use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::StorageBackend;
use crate::error::StoreResult;

/// Process-local backend, used for tests and for `STORE_BACKEND=memory`
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, json: String) -> StoreResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), json);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
