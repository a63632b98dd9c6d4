use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};

use crate::{Clock, Tick};

/// Identity of a cacheable computation (e.g. one derived statistic).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComputationId(pub u32);

/// Turning caching on for a computation, independent of subject and value types.
pub trait CacheControl {
    /// Mark `computation` as cacheable. Idempotent.
    fn enable(&self, computation: ComputationId);
    fn is_enabled(&self, computation: ComputationId) -> bool;
}

/// Counters since construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Lookups answered from a still-valid entry.
    pub hits: u64,
    /// Lookups that recomputed and stored a value.
    pub misses: u64,
    /// Lookups that recomputed without storing: computation not enabled, or
    /// `stale_after <= 0`.
    pub bypassed: u64,
}

#[derive(Debug)]
struct Entry<V> {
    value: V,
    valid_until: Tick,
}

impl<V> Entry<V> {
    fn is_fresh(&self, now: Tick) -> bool {
        now < self.valid_until
    }
}

type Store<K, V> = Mutex<HashMap<K, Entry<V>>>;

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    bypassed: AtomicU64,
}

/// A `(subject, computation) -> value` cache with per-entry deadlines.
///
/// The cache owns every entry. Entries are overwritten on recomputation and
/// never removed; an expired entry simply fails the deadline check.
pub struct StaleCache<K, V, C> {
    stores: RwLock<HashMap<ComputationId, Store<K, V>>>,
    clock: C,
    counters: Counters,
}

impl<K, V, C> StaleCache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    pub fn new(clock: C) -> Self {
        Self {
            stores: RwLock::new(HashMap::new()),
            clock,
            counters: Counters::default(),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Return the cached value for `(subject, computation)` if it is still
    /// fresh, otherwise run `recompute`, store the result until
    /// `now + stale_after` and return it.
    ///
    /// The entry is fresh at ticks `created .. created + stale_after` and
    /// expires exactly at `created + stale_after`. A `stale_after` of zero or
    /// less always recomputes. Computations that were never
    /// [enabled](CacheControl::enable) are recomputed and not stored.
    pub fn get<F>(&self, subject: &K, computation: ComputationId, recompute: F, stale_after: Tick) -> V
    where
        F: FnOnce(&K) -> V,
    {
        if stale_after <= 0 {
            self.counters.bypassed.fetch_add(1, Ordering::Relaxed);
            return recompute(subject);
        }

        let now = self.clock.now();
        {
            let stores = self.stores.read();
            let Some(store) = stores.get(&computation) else {
                drop(stores);
                self.counters.bypassed.fetch_add(1, Ordering::Relaxed);
                return recompute(subject);
            };
            if let Some(entry) = store.lock().get(subject)
                && entry.is_fresh(now)
            {
                self.counters.hits.fetch_add(1, Ordering::Relaxed);
                return entry.value.clone();
            }
        }

        // No lock is held while recomputing; a concurrent miss on the same
        // key may also recompute, and the later insert wins.
        self.counters.misses.fetch_add(1, Ordering::Relaxed);
        let value = recompute(subject);
        if let Some(store) = self.stores.read().get(&computation) {
            store.lock().insert(
                subject.clone(),
                Entry {
                    value: value.clone(),
                    valid_until: now.saturating_add(stale_after),
                },
            );
        }
        value
    }

    /// The stored value if it is still fresh. Never recomputes.
    pub fn peek(&self, subject: &K, computation: ComputationId) -> Option<V> {
        let now = self.clock.now();
        let stores = self.stores.read();
        let store = stores.get(&computation)?.lock();
        store
            .get(subject)
            .filter(|entry| entry.is_fresh(now))
            .map(|entry| entry.value.clone())
    }

    /// Number of stored entries across all computations, expired ones included.
    pub fn len(&self) -> usize {
        self.stores.read().values().map(|s| s.lock().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            bypassed: self.counters.bypassed.load(Ordering::Relaxed),
        }
    }
}

impl<K, V, C> CacheControl for StaleCache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    fn enable(&self, computation: ComputationId) {
        self.stores.write().entry(computation).or_insert_with(|| {
            log::debug!("caching enabled for computation {}", computation.0);
            Mutex::new(HashMap::new())
        });
    }

    fn is_enabled(&self, computation: ComputationId) -> bool {
        self.stores.read().contains_key(&computation)
    }
}

impl<T: CacheControl + ?Sized> CacheControl for std::sync::Arc<T> {
    fn enable(&self, computation: ComputationId) {
        (**self).enable(computation)
    }

    fn is_enabled(&self, computation: ComputationId) -> bool {
        (**self).is_enabled(computation)
    }
}
