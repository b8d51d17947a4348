//! # Muse Feed
//!
//! A local-first community feed for generated artwork. A user supplies a
//! name and a text prompt, receives a synthesized image artifact, and
//! publishes the pair as a post into a durably persisted feed shared by
//! every view of the same storage — no server anywhere.
//!
//! # Architecture: Store, Signal, Synthesize
//!
//! The feed lives as **one JSON array under one storage key**. Every reader
//! parses the whole array; every writer replaces it wholesale and fires a
//! payload-free change signal so other views re-read. The medium — not any
//! process — is the single source of truth:
//!
//! ```text
//! CreationFlow ── synthesize ──> ImageResource (data: URI, no fetch needed)
//!      │
//!      └── submit ──> PostStore ── read/prepend/write ──> StoragePort
//!                          │                                  │
//!                          └── subscribe <── change signal ───┘
//! ```
//!
//! This shape has three consequences worth knowing up front:
//!
//! - **Self-contained posts**: artwork is embedded in the post as a base64
//!   data URI, so a feed entry never dangles — copy the JSON, keep the image.
//! - **No transactions**: the medium offers whole-value replacement only.
//!   Two store instances racing on the same medium can lose an update
//!   (last-writer-wins); see [`store`] for why this is accepted rather
//!   than hidden.
//! - **Signals are wake-ups, not data**: subscribers re-read the key. A
//!   reader that misses a signal just sees the latest state next read.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | `Post`, `PostDraft`, and the `ImageResource` data-URI wrapper |
//! | [`storage`] | The `StoragePort` capability, in-memory and file-backed ports, change-signal hub |
//! | [`store`] | The newest-first post collection: list, create, subscribe |
//! | [`synth`] | Prompt → SVG artifact synthesis (maud markup, palette-randomized) |
//! | [`suggest`] | "Surprise me" corpus sampling with a bounded no-repeat loop |
//! | [`corpus`] | Built-in prompt corpus and the one-per-line override file |
//! | [`download`] | Media-type classification and `download-<id>.<ext>` saving |
//! | [`flow`] | The creation state machine: busy flags, simulated latency |
//! | [`config`] | `muse-feed.toml` loading, validation, stock config |
//! | [`output`] | CLI display — pure `format_*` functions with `print_*` wrappers |
//!
//! # Design Decisions
//!
//! ## Maud For SVG
//!
//! Artwork is generated as SVG through [Maud](https://maud.lambda.xyz/), a
//! compile-time markup macro, rather than string concatenation. Malformed
//! markup is a build error, and prompt text is escaped automatically — a
//! prompt is user input going straight into a document.
//!
//! ## Storage As An Injected Capability
//!
//! Nothing touches the medium directly: [`store::PostStore`] depends on the
//! [`storage::StoragePort`] trait. This keeps the durable medium swappable
//! (files in production, shared memory in tests) and makes the documented
//! lost-update race directly reproducible — two stores over one cloned
//! [`storage::MemoryStorage`] interleave exactly like two independent views
//! over one shared medium.
//!
//! ## Randomness Is A Parameter
//!
//! The suggester and the synthesizer both take an `impl Rng`. Production
//! passes `thread_rng()`; tests pass a seeded `StdRng` and assert exact
//! output. There is no hidden global entropy in the library.

pub mod config;
pub mod corpus;
pub mod download;
pub mod flow;
pub mod output;
pub mod storage;
pub mod store;
pub mod suggest;
pub mod synth;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
