//! Shared test utilities for the muse-feed test suite.

use std::sync::Arc;

use crate::storage::MemoryStorage;
use crate::store::PostStore;
use crate::types::PostDraft;

/// A store over a fresh in-memory medium, plus a handle to that medium so
/// tests can inspect or corrupt it directly.
pub fn mem_store() -> (PostStore, MemoryStorage) {
    let storage = MemoryStorage::new();
    (PostStore::new(Arc::new(storage.clone())), storage)
}

/// A valid draft with a placeholder artwork payload.
pub fn draft(name: &str, prompt: &str) -> PostDraft {
    PostDraft {
        name: name.to_string(),
        prompt: prompt.to_string(),
        photo: "data:image/svg+xml;base64,AA==".to_string(),
    }
}
