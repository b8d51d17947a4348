//! Shared types for the feed pipeline.
//!
//! These types are serialized to JSON inside the storage medium (the feed
//! lives as one JSON array under a single key) and must keep their wire shape
//! stable: field names are camelCase (`createdAt`) so an existing feed file
//! written by older builds keeps parsing.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("resource is not a base64 data URI")]
    NotBase64,
    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// A self-contained, fetch-free image: a `data:<media-type>;base64,<payload>`
/// URI. The payload renders anywhere a URI is accepted — no file on disk, no
/// network — which is what lets a whole post travel as one JSON value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageResource(String);

impl ImageResource {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Declared media type, e.g. `image/svg+xml`. `None` when the URI is not
    /// a data URI or declares no type.
    pub fn media_type(&self) -> Option<&str> {
        let rest = self.0.strip_prefix("data:")?;
        let meta = rest.split_once(',').map(|(m, _)| m).unwrap_or(rest);
        let media_type = meta.split(';').next().unwrap_or("");
        if media_type.is_empty() {
            None
        } else {
            Some(media_type)
        }
    }

    /// Raw base64 payload after `;base64,`, if present.
    pub fn payload(&self) -> Option<&str> {
        self.0.split_once(";base64,").map(|(_, p)| p)
    }

    /// Decode the base64 payload into bytes.
    pub fn decode(&self) -> Result<Vec<u8>, ResourceError> {
        let payload = self.payload().ok_or(ResourceError::NotBase64)?;
        Ok(BASE64.decode(payload)?)
    }
}

impl fmt::Display for ImageResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One persisted creation in the feed.
///
/// Immutable once constructed: [`crate::store::PostStore::create_post`] is the
/// only constructor, and nothing in the crate mutates a stored post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique, monotonically increasing id derived from the creation
    /// timestamp (millisecond precision, bumped on same-millisecond writes).
    pub id: String,
    /// Author display name. Non-blank after trimming.
    pub name: String,
    /// The generation input. Non-blank after trimming.
    pub prompt: String,
    /// The generated artwork as a self-contained data URI.
    pub photo: ImageResource,
    /// Creation time, set by the store.
    pub created_at: DateTime<Utc>,
}

/// User-supplied input for a new post, before validation.
///
/// `photo` is the raw URI string as given; it only becomes an
/// [`ImageResource`] once the store has accepted the draft.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub name: String,
    pub prompt: String,
    pub photo: String,
}
