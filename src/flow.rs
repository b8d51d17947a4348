//! The interactive creation flow: generate, then submit.
//!
//! Wraps the store and synthesizer with the state discipline the UI needs:
//!
//! ```text
//! Idle -> Validating -> Persisting -> Notifying -> Idle     (success)
//! Idle -> Validating -> Idle                                (rejected draft)
//! Idle -> Persisting -> Idle                                (storage failure)
//! ```
//!
//! Each operation carries a busy flag (an atomic test-and-set) that rejects
//! triggers while an operation of the same kind is in flight — the
//! equivalent of disabling the submit button. A flow is shared by all the
//! triggers of one surface (`&self` methods, `Sync`), so a second trigger
//! firing mid-generation observes [`FlowError::Busy`]. It is per-flow mutual
//! exclusion only, not a lock: it cannot and does not guard against another
//! store instance racing on the same medium. The flag is released on every
//! exit path, success or failure, so the flow always returns to a
//! re-triggerable idle state.
//!
//! Generation inserts a configurable simulated-latency wait standing in for
//! a real backend round trip. It is purely cosmetic; tests run with zero.

use crate::store::{PostStore, StoreError};
use crate::synth::{self, SynthError};
use crate::types::{ImageResource, Post, PostDraft};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    /// An operation of the same kind is already in flight in this flow.
    #[error("an operation is already in flight")]
    Busy,
    #[error(transparent)]
    Synth(#[from] SynthError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One surface's creation flow. The flow (and its busy flags) belongs to a
/// single interactive surface; only the storage medium is shared between
/// surfaces.
pub struct CreationFlow {
    store: PostStore,
    latency: Duration,
    generating: AtomicBool,
    submitting: AtomicBool,
}

impl CreationFlow {
    pub fn new(store: PostStore, latency: Duration) -> Self {
        Self {
            store,
            latency,
            generating: AtomicBool::new(false),
            submitting: AtomicBool::new(false),
        }
    }

    /// Synthesize artwork for `prompt`, after the simulated backend wait.
    ///
    /// Rejects with [`FlowError::Busy`] while a generation is in flight.
    /// On failure no artifact exists anywhere — the flow is back at idle
    /// with nothing stored.
    pub fn generate<R: Rng>(
        &self,
        prompt: &str,
        rng: &mut R,
    ) -> Result<ImageResource, FlowError> {
        if self.generating.swap(true, Ordering::AcqRel) {
            return Err(FlowError::Busy);
        }
        log::debug!("generate: simulating backend latency ({:?})", self.latency);
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        let result = synth::synthesize(prompt, rng);
        self.generating.store(false, Ordering::Release);
        Ok(result?)
    }

    /// Validate and persist a finished draft as a post.
    ///
    /// Validation and persistence both live in the store; this wrapper adds
    /// the busy-flag discipline and the state logging. The store signals
    /// subscribers itself as part of a successful write.
    pub fn submit(&self, draft: &PostDraft) -> Result<Post, FlowError> {
        if self.submitting.swap(true, Ordering::AcqRel) {
            return Err(FlowError::Busy);
        }
        log::debug!("submit: validating and persisting draft by '{}'", draft.name);
        let result = self.store.create_post(draft);
        self.submitting.store(false, Ordering::Release);
        match &result {
            Ok(post) => log::debug!("submit: persisted post {}", post.id),
            Err(e) => log::debug!("submit: rejected ({e})"),
        }
        Ok(result?)
    }
}
