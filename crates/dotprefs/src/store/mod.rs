//! # Preferences Store
//!
//! [`Prefs`] is a flat, ordered map from dot-path keys to JSON values that
//! persists itself on every mutation.
//!
//! ## Building the Initial State
//!
//! 1. **Defaults**: the nested `defaults` object is flattened
//!    (`{"window": {"width": 600}}` → `window.width = 600`). A property name
//!    that would make a malformed key (`""`, `"foo."`) is logged and skipped.
//! 2. **Overlay**: persisted entries are laid over the defaults. A persisted
//!    value replaces the default in place; keys only found on disk are
//!    appended in file order; keys only found in defaults stay.
//!
//! Loading never fails. A missing backing file is the normal first-run case;
//! an unreadable or corrupt one is logged and ignored, leaving the defaults.
//!
//! ## Lookups
//!
//! - `get("window.width")` returns the leaf stored at that exact key.
//! - `get("window")` with no leaf of its own rebuilds `{"width": .., "height": ..}`
//!   from every key below `window.`.
//! - `get("foo.")` never matches `foo`: the separator is not trimmed.
//!
//! ## Writes
//!
//! `set`, `delete` and `clear` change the in-memory map and then save the
//! whole map through the backend before returning. If the save fails the
//! error is returned and the in-memory change stays: memory and disk then
//! differ until the next successful save.
//!
//! `set` keeps the key space a tree. Writing `window` drops stale keys below
//! `window.`, and writing `window.width` drops a leaf stored at `window`.
//! Overwritten keys keep their position; new keys are appended.
//!
//! ## Concurrency
//!
//! Single process, single owner. Two stores on one file are last-writer-wins;
//! there is no locking.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one JSON file, written atomically.
//! - [`mem_backend::MemBackend`]: in memory, for tests; can simulate write failures.

use crate::error::{PrefsError, Result};
use crate::flatten::{
    ancestors, flatten, flatten_at, is_valid_key, is_within, strip_parent, unflatten,
};
use crate::options::PrefsOptions;
use crate::paths::{self, UserDataDir};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, warn};

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

use backend::PrefsBackend;
use fs_backend::FsBackend;

pub struct Prefs<B: PrefsBackend = FsBackend> {
    backend: B,
    entries: Map<String, Value>,
}

impl Prefs<FsBackend> {
    /// Opens a file-backed store. Without `file_path` the backing file goes
    /// into the default application's user data directory.
    pub fn open(options: PrefsOptions) -> Self {
        Self::open_with(options, paths::default_user_data_dir)
    }

    /// Opens a file-backed store inside the data directory of `app`.
    pub fn for_app(app: &UserDataDir, options: PrefsOptions) -> Self {
        Self::open_with(options, || app.resolve())
    }

    /// Opens a file-backed store, calling `resolve_dir` for the directory
    /// only if `options.file_path` is unset.
    pub fn open_with<F>(options: PrefsOptions, resolve_dir: F) -> Self
    where
        F: FnOnce() -> PathBuf,
    {
        let dir = options.resolve_dir(resolve_dir);
        let backend = FsBackend::new(dir, options.file_name());
        Self::with_backend(backend, &options.defaults)
    }

    /// Absolute path of the backing file.
    pub fn file_path(&self) -> PathBuf {
        self.backend.path()
    }
}

impl<B: PrefsBackend> Prefs<B> {
    pub fn with_backend(backend: B, defaults: &Value) -> Self {
        let mut entries = Map::new();
        for (key, value) in flatten(defaults) {
            if is_valid_key(&key) {
                entries.insert(key, value);
            } else {
                warn!(key = %key, "Skipping default with malformed key");
            }
        }

        match backend.load() {
            Ok(Some(persisted)) => {
                debug!(
                    path = %backend.location(),
                    persisted = persisted.len(),
                    "Loaded preferences"
                );
                for (key, value) in persisted {
                    entries.insert(key, value);
                }
            }
            Ok(None) => {
                debug!(path = %backend.location(), "No persisted preferences; using defaults");
            }
            Err(e) => {
                warn!(
                    path = %backend.location(),
                    error = %e,
                    "Ignoring unreadable preferences; using defaults"
                );
            }
        }

        Self { backend, entries }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Looks up `key` as a leaf, then as a prefix of deeper keys.
    pub fn get(&self, key: &str) -> Option<Value> {
        if key.is_empty() {
            return None;
        }
        if let Some(value) = self.entries.get(key) {
            return Some(value.clone());
        }
        unflatten(self.iter(), Some(key))
    }

    /// Every entry rebuilt into one nested object.
    pub fn get_all(&self) -> Value {
        unflatten(self.iter(), None).unwrap_or_else(|| Value::Object(Map::new()))
    }

    /// [`get`](Self::get), deserialized into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let value = self.get(key).map(serde_json::from_value).transpose()?;
        Ok(value)
    }

    pub fn has(&self, key: &str) -> bool {
        !key.is_empty()
            && (self.entries.contains_key(key)
                || self.entries.keys().any(|k| strip_parent(k, key).is_some()))
    }

    /// Stores `value` under `key`, replacing whatever lived at or below it.
    ///
    /// Nothing changes when `key`, or any path the value's property names
    /// would produce below it, is malformed.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        if !is_valid_key(key) {
            return Err(PrefsError::InvalidKey(key.to_string()));
        }
        let value = value.into();
        let incoming = flatten_at(key, &value);
        if let Some((bad, _)) = incoming.iter().find(|(k, _)| !is_valid_key(k)) {
            return Err(PrefsError::InvalidKey(bad.clone()));
        }

        for ancestor in ancestors(key) {
            self.entries.shift_remove(ancestor);
        }
        {
            let fresh: HashSet<&str> = incoming.iter().map(|(k, _)| k.as_str()).collect();
            self.entries
                .retain(|k, _| !is_within(k, key) || fresh.contains(k.as_str()));
        }

        for (k, v) in incoming {
            self.entries.insert(k, v);
        }

        debug!(key, "Set preference");
        self.persist()
    }

    /// Serializes `value` and stores it like [`set`](Self::set).
    pub fn set_as<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.set(key, value)
    }

    /// Removes the leaf at `key` and everything below it. Absent keys are a no-op.
    pub fn delete(&mut self, key: &str) -> Result<()> {
        let before = self.entries.len();
        if !key.is_empty() {
            self.entries.retain(|k, _| !is_within(k, key));
        }
        debug!(key, removed = before - self.entries.len(), "Deleted preference");
        self.persist()
    }

    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        debug!("Cleared preferences");
        self.persist()
    }

    /// Flat `(key, value)` pairs in insertion order.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Calls `f` with each entry and its index, in [`entries`](Self::entries) order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut((&str, &Value), usize),
    {
        for (index, entry) in self.iter().enumerate() {
            f(entry, index);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Same as [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) -> Result<()> {
        match self.backend.save(&self.entries) {
            Ok(()) => {
                debug!(
                    path = %self.backend.location(),
                    entries = self.entries.len(),
                    "Saved preferences"
                );
                Ok(())
            }
            Err(e) => {
                warn!(
                    path = %self.backend.location(),
                    error = %e,
                    "Failed to save preferences"
                );
                Err(e)
            }
        }
    }
}

impl<'a, B: PrefsBackend> IntoIterator for &'a Prefs<B> {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
