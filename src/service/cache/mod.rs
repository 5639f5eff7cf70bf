//! In-process stale-while-revalidate cache with an optional durable mirror.
//!
//! Entries move through three states as they age: fresh (served as is), stale (served
//! immediately while one background refresh runs) and expired (reloaded before serving,
//! falling back to the expired value if the reload fails).

pub mod config;
pub mod mirror;
pub mod roster;

use std::{
    collections::HashMap,
    fmt::Display,
    hash::Hash,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::{sync::Mutex, time::Instant};
use tokio_util::sync::CancellationToken;
use utoipa::ToSchema;

use crate::{error::Error, util::time};

use self::mirror::{CacheMirror, MirroredEntry};

/// Age thresholds of a [`SwrCache`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CachePolicy {
    /// Entries younger than this are fresh
    pub stale_after: Duration,
    /// Entries at least this old are expired
    pub hard_expire: Duration,
}

/// Produces the value of a key on a miss or refresh.
#[async_trait]
pub trait CacheLoader<K, V>: Send + Sync {
    /// Loads the value of `key`. Long loads should stop early once `cancel` fires.
    async fn load(&self, key: &K, cancel: CancellationToken) -> Result<V, Error>;
}

/// Classification of an entry without side effects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheLookup<V> {
    Fresh(V),
    Stale(V),
    Miss,
}

/// Where a value returned by [`SwrCache::get`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CacheSource {
    /// Fresh in-memory entry
    Fresh,
    /// Stale in-memory entry, a background refresh was started
    Stale,
    /// Rehydrated from the durable mirror
    Mirror,
    /// Loaded synchronously
    Loaded,
    /// Expired entry served because the reload failed
    Expired,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheRead<V> {
    pub value: V,
    pub source: CacheSource,
}

/// Counters describing cache behavior since creation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub fresh_hits: u64,
    pub stale_hits: u64,
    pub misses: u64,
    pub background_refreshes: u64,
    pub refresh_failures: u64,
    pub mirror_hits: u64,
    pub entries: usize,
}

#[derive(Default)]
struct Counters {
    fresh_hits: AtomicU64,
    stale_hits: AtomicU64,
    misses: AtomicU64,
    background_refreshes: AtomicU64,
    refresh_failures: AtomicU64,
    mirror_hits: AtomicU64,
}

struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

struct InFlight {
    id: u64,
    token: CancellationToken,
}

struct Inner<K, V> {
    name: String,
    policy: CachePolicy,
    version: String,
    loader: Arc<dyn CacheLoader<K, V>>,
    mirror: Option<Arc<dyn CacheMirror<K, V>>>,
    entries: Mutex<HashMap<K, CacheEntry<V>>>,
    in_flight: Mutex<HashMap<K, InFlight>>,
    next_refresh_id: AtomicU64,
    counters: Counters,
}

/// Stale-while-revalidate cache, cheap to clone.
///
/// At most one background refresh runs per key; a refresh requested through
/// [`SwrCache::refresh`] cancels the one it supersedes.
pub struct SwrCache<K, V> {
    inner: Arc<Inner<K, V>>,
}

impl<K, V> Clone for SwrCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SwrCache<K, V>
where
    K: Clone + Eq + Hash + Display + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Creates an in-memory cache.
    ///
    /// # Arguments
    /// - `name` - Name used in log messages
    /// - `policy` - Age thresholds
    /// - `loader` - Produces values on misses and refreshes
    pub fn new(name: &str, policy: CachePolicy, loader: Arc<dyn CacheLoader<K, V>>) -> Self {
        Self {
            inner: Arc::new(Inner {
                name: name.to_string(),
                policy,
                version: String::new(),
                loader,
                mirror: None,
                entries: Mutex::new(HashMap::new()),
                in_flight: Mutex::new(HashMap::new()),
                next_refresh_id: AtomicU64::new(0),
                counters: Counters::default(),
            }),
        }
    }

    /// Creates a cache whose entries are also written to `mirror`.
    ///
    /// Mirrored entries are only rehydrated when their version equals `version`, so bumping
    /// it invalidates every mirrored entry at once.
    pub fn with_mirror(
        name: &str,
        policy: CachePolicy,
        loader: Arc<dyn CacheLoader<K, V>>,
        mirror: Arc<dyn CacheMirror<K, V>>,
        version: &str,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                name: name.to_string(),
                policy,
                version: version.to_string(),
                loader,
                mirror: Some(mirror),
                entries: Mutex::new(HashMap::new()),
                in_flight: Mutex::new(HashMap::new()),
                next_refresh_id: AtomicU64::new(0),
                counters: Counters::default(),
            }),
        }
    }

    /// Classifies the entry of `key` by age without touching it.
    pub async fn peek(&self, key: &K) -> CacheLookup<V> {
        let entries = self.inner.entries.lock().await;

        match entries.get(key) {
            Some(entry) => {
                let age = entry.stored_at.elapsed();
                if age < self.inner.policy.stale_after {
                    CacheLookup::Fresh(entry.value.clone())
                } else if age < self.inner.policy.hard_expire {
                    CacheLookup::Stale(entry.value.clone())
                } else {
                    CacheLookup::Miss
                }
            }
            None => CacheLookup::Miss,
        }
    }

    /// Returns the value of `key`.
    ///
    /// Fresh entries are returned as is. Stale entries are returned immediately and trigger
    /// a background refresh. Expired or missing entries are rehydrated from the mirror or
    /// loaded synchronously; if that load fails an expired value is still preferred over
    /// the error.
    ///
    /// # Returns
    /// - `Ok(CacheRead)` - Value and where it came from
    /// - `Err(Error)` - Load failed and no value of any age was available
    pub async fn get(&self, key: &K) -> Result<CacheRead<V>, Error> {
        match self.peek(key).await {
            CacheLookup::Fresh(value) => {
                self.inner.counters.fresh_hits.fetch_add(1, Ordering::Relaxed);
                return Ok(CacheRead {
                    value,
                    source: CacheSource::Fresh,
                });
            }
            CacheLookup::Stale(value) => {
                self.inner.counters.stale_hits.fetch_add(1, Ordering::Relaxed);
                self.spawn_refresh(key.clone(), false).await;
                return Ok(CacheRead {
                    value,
                    source: CacheSource::Stale,
                });
            }
            CacheLookup::Miss => {
                self.inner.counters.misses.fetch_add(1, Ordering::Relaxed);
            }
        }

        if let Some(value) = self.rehydrate(key).await {
            return Ok(CacheRead {
                value,
                source: CacheSource::Mirror,
            });
        }

        match self.inner.loader.load(key, CancellationToken::new()).await {
            Ok(value) => {
                self.store(key, value.clone()).await;
                Ok(CacheRead {
                    value,
                    source: CacheSource::Loaded,
                })
            }
            Err(e) => match self.any_value(key).await {
                Some(value) => {
                    tracing::warn!(
                        "Serving expired {} cache entry {} after failed reload: {}",
                        self.inner.name,
                        key,
                        e
                    );
                    Ok(CacheRead {
                        value,
                        source: CacheSource::Expired,
                    })
                }
                None => Err(e),
            },
        }
    }

    /// Loads `key` synchronously regardless of the entry's age and stores the result.
    pub async fn reload(&self, key: &K) -> Result<V, Error> {
        let value = self.inner.loader.load(key, CancellationToken::new()).await?;
        self.store(key, value.clone()).await;

        Ok(value)
    }

    /// Starts a background refresh of `key`, cancelling one already in flight.
    pub async fn refresh(&self, key: &K) {
        self.spawn_refresh(key.clone(), true).await;
    }

    /// Stores `value` as a fresh entry and mirrors it.
    pub async fn set(&self, key: &K, value: V) {
        self.store(key, value).await;
    }

    /// Drops the entry of `key` from memory and the mirror and cancels its refresh.
    pub async fn invalidate(&self, key: &K) {
        self.inner.entries.lock().await.remove(key);

        if let Some(in_flight) = self.inner.in_flight.lock().await.remove(key) {
            in_flight.token.cancel();
        }

        if let Some(mirror) = &self.inner.mirror {
            if let Err(e) = mirror.remove(key).await {
                tracing::warn!(
                    "Failed to remove {} cache entry {} from mirror: {}",
                    self.inner.name,
                    key,
                    e
                );
            }
        }
    }

    /// Drops every in-memory entry matching `predicate` and cancels their refreshes.
    ///
    /// The mirror is left untouched; callers owning a mirror prune it themselves.
    pub async fn invalidate_matching<P>(&self, predicate: P) -> usize
    where
        P: Fn(&K) -> bool,
    {
        let removed = {
            let mut entries = self.inner.entries.lock().await;
            let before = entries.len();
            entries.retain(|key, _| !predicate(key));
            before - entries.len()
        };

        let mut in_flight = self.inner.in_flight.lock().await;
        in_flight.retain(|key, refresh| {
            if predicate(key) {
                refresh.token.cancel();
                false
            } else {
                true
            }
        });

        removed
    }

    /// Drops every entry from memory and the mirror and cancels all refreshes.
    pub async fn invalidate_all(&self) {
        self.inner.entries.lock().await.clear();

        for (_, in_flight) in self.inner.in_flight.lock().await.drain() {
            in_flight.token.cancel();
        }

        if let Some(mirror) = &self.inner.mirror {
            if let Err(e) = mirror.remove_all().await {
                tracing::warn!("Failed to clear {} cache mirror: {}", self.inner.name, e);
            }
        }
    }

    pub async fn stats(&self) -> CacheStats {
        let counters = &self.inner.counters;

        CacheStats {
            fresh_hits: counters.fresh_hits.load(Ordering::Relaxed),
            stale_hits: counters.stale_hits.load(Ordering::Relaxed),
            misses: counters.misses.load(Ordering::Relaxed),
            background_refreshes: counters.background_refreshes.load(Ordering::Relaxed),
            refresh_failures: counters.refresh_failures.load(Ordering::Relaxed),
            mirror_hits: counters.mirror_hits.load(Ordering::Relaxed),
            entries: self.inner.entries.lock().await.len(),
        }
    }

    async fn store(&self, key: &K, value: V) {
        if let Some(mirror) = &self.inner.mirror {
            let entry = MirroredEntry {
                value: value.clone(),
                version: self.inner.version.clone(),
                stored_at: time::now(),
            };

            if let Err(e) = mirror.store(key, &entry).await {
                tracing::warn!(
                    "Failed to mirror {} cache entry {}: {}",
                    self.inner.name,
                    key,
                    e
                );
            }
        }

        self.inner.entries.lock().await.insert(
            key.clone(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    async fn any_value(&self, key: &K) -> Option<V> {
        self.inner
            .entries
            .lock()
            .await
            .get(key)
            .map(|entry| entry.value.clone())
    }

    async fn rehydrate(&self, key: &K) -> Option<V> {
        let mirror = self.inner.mirror.as_ref()?;

        let entry = match mirror.load(key).await {
            Ok(Some(entry)) => entry,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(
                    "Failed to read {} cache entry {} from mirror: {}",
                    self.inner.name,
                    key,
                    e
                );
                return None;
            }
        };

        if entry.version != self.inner.version {
            return None;
        }

        let age = time::age_of(entry.stored_at, time::now());
        if age >= self.inner.policy.hard_expire {
            return None;
        }

        let stored_at = Instant::now().checked_sub(age).unwrap_or_else(Instant::now);
        self.inner.entries.lock().await.insert(
            key.clone(),
            CacheEntry {
                value: entry.value.clone(),
                stored_at,
            },
        );
        self.inner.counters.mirror_hits.fetch_add(1, Ordering::Relaxed);

        Some(entry.value)
    }

    async fn spawn_refresh(&self, key: K, supersede: bool) {
        let id = self.inner.next_refresh_id.fetch_add(1, Ordering::Relaxed);
        let token = CancellationToken::new();

        {
            let mut in_flight = self.inner.in_flight.lock().await;
            if let Some(existing) = in_flight.get(&key) {
                if !supersede {
                    return;
                }
                tracing::debug!(
                    "Cancelling superseded {} cache refresh of {}",
                    self.inner.name,
                    key
                );
                existing.token.cancel();
            }
            in_flight.insert(
                key.clone(),
                InFlight {
                    id,
                    token: token.clone(),
                },
            );
        }

        self.inner
            .counters
            .background_refreshes
            .fetch_add(1, Ordering::Relaxed);

        let cache = self.clone();
        tokio::spawn(async move {
            let result = tokio::select! {
                _ = token.cancelled() => None,
                result = cache.inner.loader.load(&key, token.clone()) => Some(result),
            };

            match result {
                Some(Ok(value)) if !token.is_cancelled() => cache.store(&key, value).await,
                Some(Ok(_)) | None => {
                    tracing::debug!("{} cache refresh of {} was cancelled", cache.inner.name, key)
                }
                Some(Err(e)) => {
                    cache
                        .inner
                        .counters
                        .refresh_failures
                        .fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(
                        "Background refresh of {} cache entry {} failed: {}",
                        cache.inner.name,
                        key,
                        e
                    );
                }
            }

            let mut in_flight = cache.inner.in_flight.lock().await;
            if in_flight.get(&key).map(|refresh| refresh.id) == Some(id) {
                in_flight.remove(&key);
            }
        });
    }
}
