//! Bounded cache implementation.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Cache entry with value and access bookkeeping.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    last_access: Instant,
    tick: u64,
}

impl<V> CacheEntry<V> {
    /// Check if this entry has been idle for longer than `ttl`.
    fn is_expired(&self, ttl: Option<Duration>) -> bool {
        ttl.is_some_and(|ttl| self.last_access.elapsed() > ttl)
    }
}

/// Configuration for a bounded cache.
///
/// Absent bounds mean "unbounded": `max_size = None` never evicts by count and
/// `idle_ttl = None` never expires entries.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default)]
pub struct CacheConfig {
    /// Maximum number of entries
    #[serde(default)]
    max_size: Option<usize>,

    /// Idle time (seconds) after which an entry expires
    #[serde(default)]
    idle_ttl: Option<u64>,

    /// Whether caching is enabled
    #[serde(default = "default_enabled")]
    enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: None,
            idle_ttl: None,
            enabled: default_enabled(),
        }
    }
}

impl CacheConfig {
    /// A cache holding at most `max_size` entries, without expiry.
    pub fn bounded(max_size: usize) -> Self {
        Self::default().with_max_size(Some(max_size))
    }

    fn ttl(&self) -> Option<Duration> {
        self.idle_ttl.map(Duration::from_secs)
    }
}

/// Keyed cache with optional LRU capacity and optional idle expiry.
///
/// Recency is tracked with a monotonically increasing access tick per entry,
/// so lookups stay O(1) and only eviction scans the table.
///
/// # Example
///
/// ```
/// use culture_cache::{BoundedCache, CacheConfig};
///
/// let mut cache = BoundedCache::new(CacheConfig::bounded(2));
/// cache.insert("a", 1);
/// cache.insert("b", 2);
///
/// // Touch "a" so that "b" becomes least recently used
/// assert_eq!(cache.get(&"a"), Some(&1));
/// cache.insert("c", 3);
///
/// assert!(cache.get(&"b").is_none());
/// assert_eq!(cache.len(), 2);
/// ```
#[derive(Debug)]
pub struct BoundedCache<K, V> {
    config: CacheConfig,
    entries: HashMap<K, CacheEntry<V>>,
    clock: u64,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
{
    /// Create a new cache with configuration.
    pub fn new(config: CacheConfig) -> Self {
        tracing::debug!(
            max_size = ?config.max_size,
            idle_ttl = ?config.idle_ttl,
            enabled = config.enabled,
            "Creating new BoundedCache"
        );
        Self {
            config,
            entries: HashMap::new(),
            clock: 0,
        }
    }

    /// The configuration this cache was built with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    fn next_tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Insert a value, evicting the least recently used entry if at capacity.
    ///
    /// Returns the evicted key, if any.
    #[tracing::instrument(skip(self, value), fields(cache_size = self.entries.len()))]
    pub fn insert(&mut self, key: K, value: V) -> Option<K> {
        if !self.config.enabled {
            tracing::debug!("Cache disabled, skipping insert");
            return None;
        }

        let evicted = match self.config.max_size {
            Some(max) if self.entries.len() >= max && !self.entries.contains_key(&key) => {
                self.evict_lru()
            }
            _ => None,
        };

        let tick = self.next_tick();
        self.entries.insert(
            key,
            CacheEntry {
                value,
                last_access: Instant::now(),
                tick,
            },
        );

        evicted
    }

    /// Get a value, refreshing its recency and idle timer.
    ///
    /// Returns None if:
    /// - Entry doesn't exist
    /// - Entry is expired (it is removed)
    /// - Cache is disabled
    pub fn get(&mut self, key: &K) -> Option<&V> {
        if !self.config.enabled {
            return None;
        }

        let ttl = self.config.ttl();
        if self.entries.get(key)?.is_expired(ttl) {
            tracing::debug!(?key, "Cache entry expired, removing");
            self.entries.remove(key);
            return None;
        }

        let tick = self.next_tick();
        let entry = self.entries.get_mut(key)?;
        entry.last_access = Instant::now();
        entry.tick = tick;
        Some(&entry.value)
    }

    /// Whether a live entry exists for `key`, without touching it.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(self.config.ttl()))
    }

    /// Remove an entry.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key).map(|entry| entry.value)
    }

    /// Remove expired entries from cache.
    pub fn cleanup_expired(&mut self) -> usize {
        let ttl = self.config.ttl();
        if ttl.is_none() {
            return 0;
        }

        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(ttl));

        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::info!(
                removed,
                remaining = self.entries.len(),
                "Cleaned up expired cache entries"
            );
        }
        removed
    }

    /// Clear all cache entries.
    pub fn clear(&mut self) {
        let count = self.entries.len();
        self.entries.clear();
        tracing::info!(cleared = count, "Cleared cache");
    }

    /// Get number of cached entries (expired entries included until cleaned up).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evict least recently used entry.
    fn evict_lru(&mut self) -> Option<K> {
        let key = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.tick)
            .map(|(key, _)| key.clone())?;
        tracing::debug!(?key, "Evicting LRU entry");
        self.entries.remove(&key);
        Some(key)
    }
}

impl<K, V> Default for BoundedCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
{
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
