//! The post store: a durable, newest-first feed over a storage port.
//!
//! The whole feed is one JSON array under a single key ([`FEED_KEY`]).
//! Reading parses the full array; creating a post prepends and writes the
//! full array back. There is no partial update and no transaction: the
//! medium offers whole-value replacement only.
//!
//! ## The lost-update race
//!
//! Two store instances pointed at the same medium can interleave their
//! read-modify-write cycles: both read an N-post feed, both prepend, both
//! write — and the second write silently discards the first prepend
//! (last-writer-wins on the full collection). This is a deliberate,
//! documented property of a medium with no compare-and-swap primitive, not
//! a bug to paper over; `tests/feed_flow.rs` pins it. Within one instance
//! the creation flow's busy flag prevents re-entrant submissions, which is
//! the only mutual exclusion the original design has.

use crate::storage::{StorageError, StoragePort};
use crate::types::{ImageResource, Post, PostDraft};
use chrono::Utc;
use std::sync::Arc;
use std::sync::mpsc::Receiver;
use thiserror::Error;

/// The single storage key holding the serialized feed.
pub const FEED_KEY: &str = "posts";

#[derive(Error, Debug)]
pub enum StoreError {
    /// A draft field was missing or blank. Carries the first offending
    /// field name; nothing was written.
    #[error("{0} must not be blank")]
    Validation(&'static str),
    /// The stored feed failed to parse. Callers that prefer availability
    /// over strictness use [`PostStore::posts_or_empty`], which downgrades
    /// this to an empty feed and logs the anomaly.
    #[error("stored feed is not valid JSON: {0}")]
    CorruptStorage(#[from] serde_json::Error),
    /// The medium rejected the read or write. Quota errors are surfaced
    /// as-is and never retried — storage pressure won't resolve itself.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Ordered post collection over an injected [`StoragePort`].
///
/// Cheap to clone; clones share the port, not any cached state. The store
/// keeps no in-memory copy of the feed — every operation goes to the medium.
#[derive(Clone)]
pub struct PostStore {
    port: Arc<dyn StoragePort>,
}

impl PostStore {
    pub fn new(port: Arc<dyn StoragePort>) -> Self {
        Self { port }
    }

    /// Read the full feed, newest-first. An unwritten medium is an empty
    /// feed; an unparseable one is [`StoreError::CorruptStorage`].
    pub fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        match self.port.read(FEED_KEY)? {
            None => Ok(Vec::new()),
            Some(raw) => Ok(serde_json::from_str(&raw)?),
        }
    }

    /// [`Self::list_posts`], with corrupt storage downgraded to an empty
    /// feed. The anomaly is logged, not swallowed silently.
    pub fn posts_or_empty(&self) -> Result<Vec<Post>, StoreError> {
        match self.list_posts() {
            Err(StoreError::CorruptStorage(e)) => {
                log::warn!("stored feed is corrupt, treating as empty: {e}");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Validate a draft, assign id and timestamp, prepend, persist, signal.
    ///
    /// Fails with [`StoreError::Validation`] naming the first blank field,
    /// in which case nothing is written. A corrupt existing feed is treated
    /// as empty (and logged), so the write recovers the medium. The write
    /// replaces the whole collection; see the module docs for the
    /// cross-instance race this implies.
    pub fn create_post(&self, draft: &PostDraft) -> Result<Post, StoreError> {
        validate(draft)?;

        let mut posts = self.posts_or_empty()?;
        let post = Post {
            id: next_id(posts.first()),
            name: draft.name.trim().to_string(),
            prompt: draft.prompt.trim().to_string(),
            photo: ImageResource::new(draft.photo.clone()),
            created_at: Utc::now(),
        };
        posts.insert(0, post.clone());

        let json = serde_json::to_string_pretty(&posts)?;
        self.port.write(FEED_KEY, &json)?;
        log::debug!("persisted post {} ({} total)", post.id, posts.len());
        Ok(post)
    }

    /// Subscribe to feed changes. Payload-free wake-ups; re-read to learn
    /// the new state. The writer's own subscribers are woken too.
    pub fn subscribe(&self) -> Receiver<()> {
        self.port.subscribe(FEED_KEY)
    }
}

/// Reject the first missing/blank field, in draft order.
fn validate(draft: &PostDraft) -> Result<(), StoreError> {
    if draft.name.trim().is_empty() {
        return Err(StoreError::Validation("name"));
    }
    if draft.prompt.trim().is_empty() {
        return Err(StoreError::Validation("prompt"));
    }
    if draft.photo.trim().is_empty() {
        return Err(StoreError::Validation("photo"));
    }
    Ok(())
}

/// Timestamp-derived id, bumped past the newest existing id so ids stay
/// strictly increasing even when two posts land in the same millisecond.
/// The feed file is user-editable JSON, so the bump saturates rather than
/// trusting the stored id to leave headroom.
fn next_id(newest: Option<&Post>) -> String {
    let now = Utc::now().timestamp_millis();
    let floor = newest
        .and_then(|p| p.id.parse::<i64>().ok())
        .map_or(i64::MIN, |newest_id| newest_id.saturating_add(1));
    now.max(floor).to_string()
}
