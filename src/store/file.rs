//! File-backed store - the single source of truth for every repository.
//!
//! One `FileStore` owns one JSON file. Shared reads hand out defensive
//! copies of a slot; a mutation holds the exclusive lock across the whole
//! read-modify-write-persist sequence, so per-slot writes are linearisable
//! even if a future version runs operations concurrently.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde_json::Value;

use super::document::{self, Document, Slot};
use crate::error::{Error, Result};

/// Lifecycle of the backing file.
///
/// The third state from the design - `Corrupt` - has no variant here: an
/// unrecognised file fails [`FileStore::open`] and the process never gets
/// a store to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// No file on disk yet. Nothing is written until the first mutation.
    Fresh,
    /// File present and adopted.
    Loaded,
}

#[derive(Debug)]
struct Inner {
    document: Document,
    state: State,
}

/// The shared JSON document store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: RwLock<Inner>,
}

impl FileStore {
    /// Open the store at `path`, creating the parent directory if needed.
    ///
    /// An absent file yields the canonical empty document in memory; a
    /// legacy bare-array file is adopted as the `banks` slot; any other
    /// content fails with [`Error::CorruptStore`] and is left untouched
    /// on disk.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let (document, state) = if path.exists() {
            let text = fs::read_to_string(&path)?;
            let document = document::parse(&text).map_err(|detail| Error::CorruptStore {
                path: path.clone(),
                detail,
            })?;
            (document, State::Loaded)
        } else {
            (Document::default(), State::Fresh)
        };

        Ok(Self {
            path,
            inner: RwLock::new(Inner { document, state }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True until the first successful mutation writes the file.
    pub fn is_fresh(&self) -> bool {
        self.inner.read().state == State::Fresh
    }

    /// Defensive copy of one slot's current contents.
    pub fn read(&self, slot: Slot) -> Vec<Value> {
        self.inner.read().document.slot(slot).clone()
    }

    /// One more than the highest `id` field currently in the slot, or 1.
    ///
    /// Derived from live data on every call, so a restart rebuilds the
    /// counter deterministically. Ids freed by deletion below the live
    /// maximum are never handed out again.
    pub fn allocate_id(&self, slot: Slot) -> i64 {
        self.inner
            .read()
            .document
            .slot(slot)
            .iter()
            .filter_map(|record| record.get("id").and_then(Value::as_i64))
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Apply `f` to a mutable view of one slot under the exclusive lock.
    ///
    /// When `f` returns `Ok`, the entire document is rewritten to disk
    /// before the lock is released. When `f` returns `Err` - or the write
    /// itself fails - the in-memory slot is restored and the file is left
    /// as it was. `f` must not call back into the store; any validation or
    /// id allocation belongs before this call.
    pub fn mutate<T>(&self, slot: Slot, f: impl FnOnce(&mut Vec<Value>) -> Result<T>) -> Result<T> {
        let mut inner = self.inner.write();
        let before = inner.document.slot(slot).clone();

        match f(inner.document.slot_mut(slot)) {
            Ok(value) => match save(&self.path, &inner.document) {
                Ok(()) => {
                    inner.state = State::Loaded;
                    Ok(value)
                }
                Err(err) => {
                    *inner.document.slot_mut(slot) = before;
                    Err(err)
                }
            },
            Err(err) => {
                *inner.document.slot_mut(slot) = before;
                Err(err)
            }
        }
    }
}

/// Serialise the whole document and swap it into place.
///
/// Pretty-printed with two-space indentation, keys in the stable
/// `banks` / `customers` / `users` order. Written to a sibling `.tmp`
/// path and renamed over the target, so an interrupted write cannot
/// leave a truncated file behind.
fn save(path: &Path, document: &Document) -> Result<()> {
    let json = serde_json::to_string_pretty(document).map_err(Error::encoding)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
