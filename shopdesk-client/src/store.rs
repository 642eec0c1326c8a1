//! Durable session storage.
//!
//! The client mirrors every token mutation into a [`SessionStore`] before
//! its in-memory state is considered authoritative, and reads the store
//! once at construction to restore the last known session. Storage is
//! best-effort in the same way browser local storage is: failures are
//! logged, never propagated to callers.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{error, warn};

/// Well-known storage keys, shared with the original deployment so a
/// migrated session survives.
pub mod keys {
    /// Access token.
    pub const ACCESS_TOKEN: &str = "token";
    /// Refresh token.
    pub const REFRESH_TOKEN: &str = "refreshToken";
    /// Cached user record (JSON).
    pub const USER: &str = "user";
}

/// A small string key-value store scoped to the client instance.
pub trait SessionStore: Send + Sync + fmt::Debug {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;
    /// Write a value, replacing any previous one.
    fn put(&self, key: &str, value: &str);
    /// Remove a value if present.
    fn remove(&self, key: &str);
}

/// In-memory store. Sessions do not survive the process; used in tests
/// and for callers that opt out of persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) {
        self.entries.lock().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().remove(key);
    }
}

/// File-backed store persisting a single JSON document, written through
/// on every mutation.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open a store at the given path, loading existing entries.
    ///
    /// A missing or unreadable file yields an empty store rather than an
    /// error; a corrupt session is equivalent to no session.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(map) => map,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "discarding corrupt session file");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    /// The path this store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &HashMap<String, String>) {
        let raw = match serde_json::to_string(entries) {
            Ok(raw) => raw,
            Err(err) => {
                error!(error = %err, "failed to serialize session store");
                return;
            }
        };
        if let Err(err) = std::fs::write(&self.path, raw) {
            error!(path = %self.path.display(), error = %err, "failed to write session store");
        }
    }
}

impl fmt::Debug for FileStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock();
        entries.insert(key.to_owned(), value.to_owned());
        self.persist(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock();
        if entries.remove(key).is_some() {
            self.persist(&entries);
        }
    }
}
