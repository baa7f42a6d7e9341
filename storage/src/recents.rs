//! Capped most-recent-first string lists (saved locations, recent searches).

use crate::kv::KeyValue;
use std::sync::Arc;

/// Key under which the saved-location display strings are persisted
pub const SAVED_LOCATIONS_KEY: &str = "savedLocations";

/// Key under which recent free-text searches are persisted
pub const RECENT_SEARCHES_KEY: &str = "recentSearches";

/// Both lists keep at most this many entries
pub const RECENT_CAP: usize = 5;

/// A capped, newest-first, exact-match-deduplicated list of strings.
///
/// Pushing an entry that is already present leaves the list untouched — the
/// entry is not moved to the front. Corrupt persisted payloads are logged
/// and read as empty.
#[derive(Clone)]
pub struct RecentList {
    kv: Arc<dyn KeyValue>,
    key: &'static str,
    cap: usize,
}

impl RecentList {
    const fn new(kv: Arc<dyn KeyValue>, key: &'static str, cap: usize) -> Self {
        Self { kv, key, cap }
    }

    /// The saved address display-string list
    #[must_use]
    pub const fn saved_locations(kv: Arc<dyn KeyValue>) -> Self {
        Self::new(kv, SAVED_LOCATIONS_KEY, RECENT_CAP)
    }

    /// The recent search-text list
    #[must_use]
    pub const fn recent_searches(kv: Arc<dyn KeyValue>) -> Self {
        Self::new(kv, RECENT_SEARCHES_KEY, RECENT_CAP)
    }

    /// Read the current entries, newest first
    #[must_use]
    pub fn all(&self) -> Vec<String> {
        let Some(raw) = self.kv.get(self.key) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(key = self.key, %err, "corrupt entry, falling back to empty");
                Vec::new()
            },
        }
    }

    /// Record an entry at the front of the list, best-effort
    ///
    /// Returns the resulting list. A duplicate of an existing entry is a
    /// no-op; otherwise the list is capped by dropping the oldest entries.
    pub fn push(&self, entry: &str) -> Vec<String> {
        let mut entries = self.all();
        if entries.iter().any(|existing| existing == entry) {
            return entries;
        }

        entries.insert(0, entry.to_string());
        entries.truncate(self.cap);

        if let Ok(json) = serde_json::to_string(&entries) {
            self.kv.set(self.key, &json);
        }
        entries
    }
}
