//! String-keyed key-value ports.
//!
//! The typed surfaces in this crate sit on top of [`KeyValue`], mirroring
//! the flat string storage the storefront persists into on device.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

/// A string-keyed, string-valued store with best-effort semantics.
///
/// Implementations must never fail loudly: a `get` that cannot be served
/// returns `None`, a `set` that cannot be served is dropped (and logged by
/// the implementation).
pub trait KeyValue: Send + Sync {
    /// Read the value for `key`, if one is present and readable
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, best-effort
    fn set(&self, key: &str, value: &str);
}

/// In-memory key-value store
///
/// The default backing for tests and for sessions that do not persist
/// across restarts.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKv {
    /// Create an empty in-memory store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValue for MemoryKv {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }
}

/// Directory-backed key-value store, one file per key
///
/// Keys are used as file names; path separators in a key are replaced with
/// `_`. IO failures are logged and treated as missing/dropped.
#[derive(Debug, Clone)]
pub struct DirKv {
    root: PathBuf,
}

impl DirKv {
    /// Create a store rooted at `root`
    ///
    /// The directory is created lazily on the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key.replace(['/', '\\'], "_"))
    }
}

impl KeyValue for DirKv {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!(key, path = %path.display(), %err, "unreadable entry, treating as missing");
                None
            },
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(err) = std::fs::create_dir_all(&self.root) {
            tracing::warn!(path = %self.root.display(), %err, "cannot create storage directory, dropping write");
            return;
        }
        let path = self.path_for(key);
        if let Err(err) = std::fs::write(&path, value) {
            tracing::warn!(key, path = %path.display(), %err, "write failed, dropping entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn scratch_dir() -> PathBuf {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        std::env::temp_dir().join(format!(
            "freshcart-kv-{}-{}",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::Relaxed)
        ))
    }

    #[test]
    fn memory_kv_round_trips() {
        let kv = MemoryKv::new();
        assert_eq!(kv.get("savedLocations"), None);
        kv.set("savedLocations", "[]");
        assert_eq!(kv.get("savedLocations").as_deref(), Some("[]"));
    }

    #[test]
    fn dir_kv_round_trips() {
        let root = scratch_dir();
        let kv = DirKv::new(&root);
        assert_eq!(kv.get("recentSearches"), None);
        kv.set("recentSearches", r#"["milk"]"#);
        assert_eq!(kv.get("recentSearches").as_deref(), Some(r#"["milk"]"#));
        let _ = std::fs::remove_dir_all(root);
    }

    #[test]
    fn dir_kv_tolerates_awkward_keys() {
        let root = scratch_dir();
        let kv = DirKv::new(&root);
        let key = "address_Home - 12, Baker Street";
        kv.set(key, "{}");
        assert_eq!(kv.get(key).as_deref(), Some("{}"));
        let _ = std::fs::remove_dir_all(root);
    }
}
