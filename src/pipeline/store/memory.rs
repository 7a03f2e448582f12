use std::collections::HashMap;
use std::sync::RwLock;

use crate::pipeline::schema::Recap;

use super::{SessionStore, StoreError};

/// In-process store for tests and short-lived embedders. Nothing survives
/// the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<String, Recap>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn put(&self, session_id: &str, recap: &Recap) -> Result<(), StoreError> {
        let mut map = self.inner.write().unwrap_or_else(|e| e.into_inner());
        map.insert(session_id.to_string(), recap.clone());
        Ok(())
    }

    fn get(&self, session_id: &str) -> Result<Recap, StoreError> {
        let map = self.inner.read().unwrap_or_else(|e| e.into_inner());
        map.get(session_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(session_id.to_string()))
    }
}
