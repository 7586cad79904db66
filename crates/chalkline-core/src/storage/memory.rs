//! In-memory storage implementation.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::state::WhiteboardState;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for tests and hosts without a persistent store.
#[derive(Default)]
pub struct MemoryStorage {
    states: RwLock<HashMap<String, WhiteboardState>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl Storage for MemoryStorage {
    fn save(&self, key: &str, state: &WhiteboardState) -> BoxFuture<'_, StorageResult<()>> {
        let key = key.to_string();
        let state = state.clone();
        Box::pin(async move {
            self.states.write().map_err(lock_error)?.insert(key, state);
            Ok(())
        })
    }

    fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<WhiteboardState>> {
        let key = key.to_string();
        Box::pin(async move {
            let states = self.states.read().map_err(lock_error)?;
            states.get(&key).cloned().ok_or(StorageError::NotFound(key))
        })
    }

    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>> {
        let key = key.to_string();
        Box::pin(async move {
            self.states.write().map_err(lock_error)?.remove(&key);
            Ok(())
        })
    }

    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let key = key.to_string();
        Box::pin(async move { Ok(self.states.read().map_err(lock_error)?.contains_key(&key)) })
    }
}
