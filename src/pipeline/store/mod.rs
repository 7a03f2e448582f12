//! Session persistence. The orchestrator takes the store as a trait object
//! so tests and embedders can swap the filesystem out for memory.

use std::io;

use thiserror::Error;

use super::schema::Recap;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no recap stored for session '{0}'")]
    NotFound(String),
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("stored recap could not be encoded or decoded: {0}")]
    Serialization(String),
}

/// Keyed recap storage. `put` on an existing key overwrites; `get` returns
/// the latest value written.
pub trait SessionStore: Send + Sync {
    fn put(&self, session_id: &str, recap: &Recap) -> Result<(), StoreError>;
    fn get(&self, session_id: &str) -> Result<Recap, StoreError>;
}

/// Lets callers keep a handle to a store they also hand to the processor.
impl<S: SessionStore + ?Sized> SessionStore for std::sync::Arc<S> {
    fn put(&self, session_id: &str, recap: &Recap) -> Result<(), StoreError> {
        (**self).put(session_id, recap)
    }

    fn get(&self, session_id: &str) -> Result<Recap, StoreError> {
        (**self).get(session_id)
    }
}
