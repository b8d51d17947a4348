//! Storage ports: the durable key-value medium behind the feed.
//!
//! The feed has no server. The storage medium itself is the single source of
//! truth, shared by every store instance that points at it, and each instance
//! holds only a transient, possibly stale, in-memory view. Rather than reach
//! for a global, everything above this module depends on the [`StoragePort`]
//! capability:
//!
//! - `read(key)` — full current value, `None` if never written
//! - `write(key, value)` — replace the whole value
//! - `subscribe(key)` — a wake-up channel that fires after any write
//!
//! ## Change signal
//!
//! The signal is fire-and-forget broadcast: subscribers receive a payload-free
//! `()` and must re-read the key themselves. Every subscriber is notified,
//! including ones owned by the writer itself, so a writer's own views refresh
//! without a round trip through the medium. Delivery is best-effort — a
//! dropped receiver is silently pruned, and a reader that misses a signal
//! simply observes the latest state on its next read.
//!
//! Two implementations:
//!
//! - [`MemoryStorage`] — `Mutex<HashMap>` behind an `Arc`; clones share state,
//!   which lets tests run two independent stores against one medium and
//!   interleave their read-modify-write cycles.
//! - [`FileStorage`] — one file per key in a data directory. Signals reach
//!   in-process subscribers only; another process's write is picked up on the
//!   next read, matching the no-delivery-guarantee contract above.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage quota exhausted: {0}")]
    Quota(io::Error),
    #[error("IO error: {0}")]
    Io(io::Error),
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::StorageFull | io::ErrorKind::QuotaExceeded => Self::Quota(e),
            _ => Self::Io(e),
        }
    }
}

/// Abstract durable key-value medium with a per-key change signal.
pub trait StoragePort: Send + Sync {
    /// Read the full current value of `key`. An absent key is `Ok(None)`.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the whole value of `key`, then signal every subscriber.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Subscribe to writes on `key`. The receiver gets a payload-free
    /// wake-up per write; re-read the key to learn the new state.
    fn subscribe(&self, key: &str) -> Receiver<()>;
}

/// Per-key subscriber lists shared by both port implementations.
#[derive(Default)]
struct SignalHub {
    subscribers: Mutex<HashMap<String, Vec<Sender<()>>>>,
}

impl SignalHub {
    fn subscribe(&self, key: &str) -> Receiver<()> {
        let (tx, rx) = mpsc::channel();
        self.subscribers
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_default()
            .push(tx);
        rx
    }

    /// Wake every live subscriber of `key`; prune the dead ones.
    fn publish(&self, key: &str) {
        let mut subscribers = self.subscribers.lock().unwrap();
        if let Some(senders) = subscribers.get_mut(key) {
            let before = senders.len();
            senders.retain(|tx| tx.send(()).is_ok());
            let dropped = before - senders.len();
            if dropped > 0 {
                log::debug!("pruned {dropped} disconnected subscriber(s) of '{key}'");
            }
        }
    }
}

/// In-memory port. Clones share the same underlying map and subscriber hub.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    values: Mutex<HashMap<String, String>>,
    hub: SignalHub,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoragePort for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.inner.values.lock().unwrap().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner
            .values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self.inner.hub.publish(key);
        Ok(())
    }

    fn subscribe(&self, key: &str) -> Receiver<()> {
        self.inner.hub.subscribe(key)
    }
}

/// File-backed port: each key is `<data_dir>/<key>.json`.
///
/// The data directory is created lazily on first write, so a read-only
/// command against a fresh directory sees an empty medium instead of
/// creating state.
pub struct FileStorage {
    dir: PathBuf,
    hub: SignalHub,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            hub: SignalHub::default(),
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StoragePort for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.key_path(key), value)?;
        self.hub.publish(key);
        Ok(())
    }

    fn subscribe(&self, key: &str) -> Receiver<()> {
        self.hub.subscribe(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::TryRecvError;
    use tempfile::TempDir;

    #[test]
    fn storage_full_and_quota_kinds_classify_as_quota() {
        for kind in [io::ErrorKind::StorageFull, io::ErrorKind::QuotaExceeded] {
            let e = StorageError::from(io::Error::new(kind, "medium full"));
            assert!(matches!(e, StorageError::Quota(_)), "kind {kind:?}");
        }
    }

    #[test]
    fn other_io_kinds_classify_as_io() {
        let e = StorageError::from(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(matches!(e, StorageError::Io(_)));
    }

    #[test]
    fn memory_read_absent_key_is_none() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read("posts").unwrap(), None);
    }

    #[test]
    fn memory_write_then_read() {
        let storage = MemoryStorage::new();
        storage.write("posts", "[]").unwrap();
        assert_eq!(storage.read("posts").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn memory_clones_share_state() {
        let a = MemoryStorage::new();
        let b = a.clone();
        a.write("posts", "[1]").unwrap();
        assert_eq!(b.read("posts").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn write_wakes_every_subscriber_including_writers_own() {
        let storage = MemoryStorage::new();
        let own = storage.subscribe("posts");
        let other = storage.clone().subscribe("posts");

        storage.write("posts", "[]").unwrap();

        assert!(own.try_recv().is_ok());
        assert!(other.try_recv().is_ok());
    }

    #[test]
    fn signal_is_scoped_to_the_written_key() {
        let storage = MemoryStorage::new();
        let rx = storage.subscribe("posts");
        storage.write("something-else", "x").unwrap();
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn dropped_subscriber_does_not_break_publish() {
        let storage = MemoryStorage::new();
        drop(storage.subscribe("posts"));
        let live = storage.subscribe("posts");

        storage.write("posts", "[]").unwrap();
        assert!(live.try_recv().is_ok());
    }

    #[test]
    fn file_read_absent_key_is_none() {
        let tmp = TempDir::new().unwrap();
        let storage = FileStorage::new(tmp.path());
        assert_eq!(storage.read("posts").unwrap(), None);
    }

    #[test]
    fn file_write_then_read_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let storage = FileStorage::new(tmp.path().join("data"));
        storage.write("posts", "[{\"id\":\"1\"}]").unwrap();
        assert_eq!(
            storage.read("posts").unwrap().as_deref(),
            Some("[{\"id\":\"1\"}]")
        );
        assert!(tmp.path().join("data/posts.json").exists());
    }

    #[test]
    fn file_write_signals_in_process_subscribers() {
        let tmp = TempDir::new().unwrap();
        let storage = FileStorage::new(tmp.path());
        let rx = storage.subscribe("posts");
        storage.write("posts", "[]").unwrap();
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn two_file_storages_share_via_the_filesystem() {
        // A second instance sees the first's write on read, but gets no
        // signal — exactly the cross-process contract.
        let tmp = TempDir::new().unwrap();
        let writer = FileStorage::new(tmp.path());
        let reader = FileStorage::new(tmp.path());
        let rx = reader.subscribe("posts");

        writer.write("posts", "[]").unwrap();

        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
        assert_eq!(reader.read("posts").unwrap().as_deref(), Some("[]"));
    }
}
