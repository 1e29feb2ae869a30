//! Tiered context cache — static, semi-static, and retrieval partitions.
//!
//! Three independent namespaces with different volatility:
//!
//! | Partition | Typical TTL | Invalidation |
//! |-----------|-------------|--------------|
//! | static | none (zero TTL) | explicit, on file change |
//! | semi-static | 10 min | TTL or explicit |
//! | retrieval | 5 min | TTL, keyed per request fingerprint |
//!
//! Expiry is lazy and destructive: an expired entry is evicted at the `get`
//! that discovers it, and a later `get` on the same key stays a miss. No
//! background sweeper is needed for correctness; `stats()` performs a full
//! sweep as a side effect so its numbers only count live entries.
//!
//! Cache state lives in process memory only and is lost on restart.

use crate::estimate::estimate_size;
use serde::Serialize;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};
use tracing::debug;

/// A single cached fragment.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    content: String,
    created_at: Instant,
    ttl: Duration,
    estimated_size: usize,
}

impl CacheEntry {
    /// Zero TTL means the entry never expires by time.
    fn is_expired(&self) -> bool {
        !self.ttl.is_zero() && self.created_at.elapsed() > self.ttl
    }
}

/// Composite key for the retrieval partition.
///
/// A structured pair rather than a hashed concatenation, so two distinct
/// `(event_type, keywords)` pairs can never collide on a separator boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RetrievalKey {
    pub event_type: String,
    pub keywords: String,
}

/// Live-entry counts and sizes for one partition.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PartitionStats {
    pub entries: usize,
    pub estimated_size: usize,
}

/// Snapshot returned by [`ContextCache::stats`].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CacheStats {
    pub static_ctx: PartitionStats,
    pub semi_static: PartitionStats,
    pub retrieval: PartitionStats,
}

impl CacheStats {
    pub fn total_entries(&self) -> usize {
        self.static_ctx.entries + self.semi_static.entries + self.retrieval.entries
    }

    pub fn total_estimated_size(&self) -> usize {
        self.static_ctx.estimated_size
            + self.semi_static.estimated_size
            + self.retrieval.estimated_size
    }
}

/// The three-partition context cache.
///
/// All operations are infallible; absence is a `None`, never an error.
/// Concurrent use is safe: `set` is last-writer-wins, and a `get` racing an
/// `invalidate` returns either the old content or a miss.
#[derive(Default)]
pub struct ContextCache {
    static_entries: RwLock<HashMap<String, CacheEntry>>,
    semi_static_entries: RwLock<HashMap<String, CacheEntry>>,
    retrieval_entries: RwLock<HashMap<RetrievalKey, CacheEntry>>,
}

impl ContextCache {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Static partition ──────────────────────────────────────────────────

    /// Store a static-context entry. `Duration::ZERO` TTL never expires.
    /// When `estimated_size` is `None` the size estimator is applied.
    pub async fn set_static(
        &self,
        key: impl Into<String>,
        content: impl Into<String>,
        ttl: Duration,
        estimated_size: Option<usize>,
    ) {
        Self::insert(&self.static_entries, key.into(), content.into(), ttl, estimated_size).await;
    }

    pub async fn get_static(&self, key: &str) -> Option<String> {
        Self::lookup(&self.static_entries, key, "static").await
    }

    /// Remove a static entry if present. Idempotent.
    pub async fn invalidate_static(&self, key: &str) {
        if self.static_entries.write().await.remove(key).is_some() {
            debug!(key, partition = "static", "Cache entry invalidated");
        }
    }

    pub async fn clear_static(&self) {
        self.static_entries.write().await.clear();
    }

    // ── Semi-static partition ─────────────────────────────────────────────

    pub async fn set_semi_static(
        &self,
        key: impl Into<String>,
        content: impl Into<String>,
        ttl: Duration,
        estimated_size: Option<usize>,
    ) {
        Self::insert(
            &self.semi_static_entries,
            key.into(),
            content.into(),
            ttl,
            estimated_size,
        )
        .await;
    }

    pub async fn get_semi_static(&self, key: &str) -> Option<String> {
        Self::lookup(&self.semi_static_entries, key, "semi_static").await
    }

    pub async fn invalidate_semi_static(&self, key: &str) {
        if self.semi_static_entries.write().await.remove(key).is_some() {
            debug!(key, partition = "semi_static", "Cache entry invalidated");
        }
    }

    pub async fn clear_semi_static(&self) {
        self.semi_static_entries.write().await.clear();
    }

    // ── Retrieval partition ───────────────────────────────────────────────

    pub async fn set_retrieval(
        &self,
        event_type: impl Into<String>,
        keywords: impl Into<String>,
        content: impl Into<String>,
        ttl: Duration,
        estimated_size: Option<usize>,
    ) {
        let key = RetrievalKey {
            event_type: event_type.into(),
            keywords: keywords.into(),
        };
        Self::insert(&self.retrieval_entries, key, content.into(), ttl, estimated_size).await;
    }

    pub async fn get_retrieval(&self, event_type: &str, keywords: &str) -> Option<String> {
        let key = RetrievalKey {
            event_type: event_type.into(),
            keywords: keywords.into(),
        };
        Self::lookup(&self.retrieval_entries, &key, "retrieval").await
    }

    pub async fn clear_retrieval(&self) {
        self.retrieval_entries.write().await.clear();
    }

    // ── Whole-cache operations ────────────────────────────────────────────

    pub async fn clear_all(&self) {
        self.clear_static().await;
        self.clear_semi_static().await;
        self.clear_retrieval().await;
    }

    /// Per-partition entry counts and summed estimated sizes.
    ///
    /// Sweeps expired entries in every partition first, so the numbers only
    /// reflect live content.
    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            static_ctx: Self::sweep_and_measure(&self.static_entries).await,
            semi_static: Self::sweep_and_measure(&self.semi_static_entries).await,
            retrieval: Self::sweep_and_measure(&self.retrieval_entries).await,
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    async fn insert<K: Eq + Hash>(
        map: &RwLock<HashMap<K, CacheEntry>>,
        key: K,
        content: String,
        ttl: Duration,
        estimated_size: Option<usize>,
    ) {
        let estimated_size = estimated_size.unwrap_or_else(|| estimate_size(&content));
        let entry = CacheEntry {
            content,
            created_at: Instant::now(),
            ttl,
            estimated_size,
        };
        // Last-writer-wins on key collision.
        map.write().await.insert(key, entry);
    }

    async fn lookup<K, Q>(
        map: &RwLock<HashMap<K, CacheEntry>>,
        key: &Q,
        partition: &'static str,
    ) -> Option<String>
    where
        K: Borrow<Q> + Eq + Hash,
        Q: Eq + Hash + ?Sized,
    {
        {
            let entries = map.read().await;
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired() => return Some(entry.content.clone()),
                Some(_) => {}
            }
        }

        // Expired at read time: evict under the write lock, re-checking in
        // case a concurrent set already replaced the entry.
        let mut entries = map.write().await;
        if entries.get(key).is_some_and(CacheEntry::is_expired) {
            entries.remove(key);
            debug!(partition, "Expired cache entry evicted on read");
        }
        None
    }

    async fn sweep_and_measure<K: Eq + Hash>(
        map: &RwLock<HashMap<K, CacheEntry>>,
    ) -> PartitionStats {
        let mut entries = map.write().await;
        entries.retain(|_, entry| !entry.is_expired());
        PartitionStats {
            entries: entries.len(),
            estimated_size: entries.values().map(|e| e.estimated_size).sum(),
        }
    }
}
