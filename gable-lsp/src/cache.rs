//! Bounded document-model cache.
//!
//! Keyed by document identity, holding the line index computed for one
//! (version, text) snapshot. A version mismatch recomputes, `remove`
//! forgets a closed document, exceeding the bound evicts the least
//! recently accessed entry, and a periodic sweep drops entries that have
//! not been touched for a while. One mutex serializes the whole store;
//! entries are tiny, so per-identity locking is not worth its weight.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gable_analysis::text::LineIndex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tower_lsp::lsp_types::Url;

pub const DEFAULT_CAPACITY: usize = 64;
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(600);
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

struct CacheEntry {
    version: i32,
    language_id: String,
    last_access: Instant,
    index: Arc<LineIndex>,
}

pub struct DocumentModelCache {
    entries: Mutex<HashMap<Url, CacheEntry>>,
    capacity: usize,
    max_age: Duration,
    sweep: Mutex<Option<JoinHandle<()>>>,
}

impl DocumentModelCache {
    pub fn new(capacity: usize, max_age: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity,
            max_age,
            sweep: Mutex::new(None),
        }
    }

    /// Return the cached line index for `uri` at `version`, computing and
    /// storing it on a miss or a version mismatch.
    pub fn get_or_compute(
        &self,
        uri: &Url,
        version: i32,
        language_id: &str,
        text: &Arc<str>,
    ) -> Arc<LineIndex> {
        let mut entries = self.entries.lock().unwrap();
        if let Some(entry) = entries.get_mut(uri) {
            if entry.version == version {
                entry.last_access = Instant::now();
                return entry.index.clone();
            }
        }

        let index = Arc::new(LineIndex::new(text.clone()));
        entries.insert(
            uri.clone(),
            CacheEntry {
                version,
                language_id: language_id.to_string(),
                last_access: Instant::now(),
                index: index.clone(),
            },
        );
        if entries.len() > self.capacity {
            if let Some(oldest) = entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_access)
                .map(|(uri, _)| uri.clone())
            {
                entries.remove(&oldest);
            }
        }
        index
    }

    pub fn remove(&self, uri: &Url) {
        self.entries.lock().unwrap().remove(uri);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn language_id(&self, uri: &Url) -> Option<String> {
        self.entries
            .lock()
            .unwrap()
            .get(uri)
            .map(|entry| entry.language_id.clone())
    }

    /// Drop entries not accessed within the max age.
    pub fn prune(&self) {
        let now = Instant::now();
        self.entries
            .lock()
            .unwrap()
            .retain(|_, entry| now.duration_since(entry.last_access) <= self.max_age);
    }

    /// Start the periodic sweep. Idempotent; must run inside a tokio
    /// runtime.
    pub fn start_sweep(self: &Arc<Self>, interval: Duration) {
        let mut sweep = self.sweep.lock().unwrap();
        if sweep.is_some() {
            return;
        }
        let weak = Arc::downgrade(self);
        *sweep = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(cache) = weak.upgrade() else { break };
                cache.prune();
            }
        }));
    }

    /// Stop the periodic sweep. Cached entries stay until dropped.
    pub fn dispose(&self) {
        if let Some(handle) = self.sweep.lock().unwrap().take() {
            handle.abort();
        }
    }
}

impl Drop for DocumentModelCache {
    fn drop(&mut self) {
        self.dispose();
    }
}
