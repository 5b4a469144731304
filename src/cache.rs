//! Bounded cache of parsed style sheets.
//!
//! Entries are keyed by document uri and extraction scope and remember the
//! document version and language they were parsed from. A lookup with a
//! different version is a miss and replaces the entry. Two limits bound the
//! cache: an entry count (least recently used goes first) and an idle age
//! (enforced on lookup and by a periodic sweep).

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::task::JoinHandle;
use tower_lsp::lsp_types::Url;
use tracing::debug;

use crate::document::{Scope, SyntheticDocument};

/// Size and age limits, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheLimits {
    pub max_entries: usize,
    pub max_age: Duration,
}

impl Default for CacheLimits {
    fn default() -> Self {
        Self {
            max_entries: 10,
            max_age: Duration::from_secs(60),
        }
    }
}

type ParseFn<T> = dyn Fn(&SyntheticDocument) -> T + Send + Sync;

#[derive(Debug)]
struct CacheEntry<T> {
    version: i32,
    language_id: &'static str,
    value: Arc<T>,
    last_access: Instant,
}

/// Memo from `(uri, scope, version)` to a parsed style sheet.
pub struct StyleSheetCache<T> {
    entries: DashMap<(Url, Scope), CacheEntry<T>>,
    parse: Box<ParseFn<T>>,
    limits: CacheLimits,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl<T> std::fmt::Debug for StyleSheetCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleSheetCache")
            .field("entries", &self.entries.len())
            .field("limits", &self.limits)
            .finish()
    }
}

impl<T> StyleSheetCache<T> {
    /// Create a cache that parses misses with `parse`.
    pub fn new(
        limits: CacheLimits,
        parse: impl Fn(&SyntheticDocument) -> T + Send + Sync + 'static,
    ) -> Self {
        Self {
            entries: DashMap::new(),
            parse: Box::new(parse),
            limits: CacheLimits {
                max_entries: limits.max_entries.max(1),
                ..limits
            },
            sweeper: Mutex::new(None),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The parsed form of `document`, parsing it on a miss.
    pub fn get(&self, document: &SyntheticDocument) -> Arc<T> {
        self.get_at(document, Instant::now())
    }

    pub(crate) fn get_at(&self, document: &SyntheticDocument, now: Instant) -> Arc<T> {
        let key = (document.uri.clone(), document.scope);

        if let Some(mut entry) = self.entries.get_mut(&key) {
            let fresh = entry.version == document.version
                && entry.language_id == document.language_id
                && now.saturating_duration_since(entry.last_access) <= self.limits.max_age;
            if fresh {
                entry.last_access = now;
                return Arc::clone(&entry.value);
            }
        }

        debug!(uri = %document.uri, version = document.version, "parsing style sheet");
        let value = Arc::new((self.parse)(document));
        self.entries.insert(
            key,
            CacheEntry {
                version: document.version,
                language_id: document.language_id,
                value: Arc::clone(&value),
                last_access: now,
            },
        );
        self.evict_overflow();
        value
    }

    /// Drop least recently used entries until the count limit holds.
    fn evict_overflow(&self) {
        while self.entries.len() > self.limits.max_entries {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|entry| entry.last_access)
                .map(|entry| entry.key().clone());
            let Some(key) = oldest else {
                break;
            };
            debug!(uri = %key.0, "evicting style sheet");
            self.entries.remove(&key);
        }
    }

    /// Forget every entry for `uri`, whatever its scope.
    pub fn remove(&self, uri: &Url) {
        self.entries.retain(|(entry_uri, _), _| entry_uri != uri);
    }

    /// Drop entries idle for longer than the age limit.
    pub fn purge_expired(&self) {
        self.purge_expired_at(Instant::now());
    }

    pub(crate) fn purge_expired_at(&self, now: Instant) {
        let max_age = self.limits.max_age;
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.last_access) <= max_age);
    }

    /// Clear the cache and stop the periodic sweep.
    pub fn dispose(&self) {
        if let Some(sweeper) = self
            .sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            sweeper.abort();
        }
        self.entries.clear();
    }
}

impl<T: Send + Sync + 'static> StyleSheetCache<T> {
    /// Run [`purge_expired`](Self::purge_expired) every `interval` until
    /// [`dispose`](Self::dispose) is called or the cache is dropped.
    pub fn start_sweeper(self: &Arc<Self>, interval: Duration) {
        let cache = Arc::downgrade(self);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(cache) = cache.upgrade() else {
                    break;
                };
                cache.purge_expired();
            }
        });

        let previous = self
            .sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }
}
