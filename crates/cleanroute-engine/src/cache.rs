//! Expiring key-value caches shared by the pipeline components.

use dashmap::DashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// Key-value store whose entries expire a fixed TTL after insertion.
///
/// Backed by a concurrent map so many in-flight lookups can share one
/// instance. Eviction is lazy: the lookup that observes an expired entry
/// removes it. There is no background sweeping and no capacity bound.
pub struct TtlCache<K, V> {
    entries: DashMap<K, Entry<V>>,
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    pub fn insert(&self, key: K, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn get_at(&self, key: &K, now: Instant) -> Option<V> {
        if let Some(entry) = self.entries.get(key) {
            if now < entry.expires_at {
                return Some(entry.value.clone());
            }
        }
        // Expired: evict, unless a concurrent insert already refreshed it.
        self.entries.remove_if(key, |_, entry| entry.expires_at <= now);
        None
    }

    fn insert_at(&self, key: K, value: V, now: Instant) {
        self.entries.insert(
            key,
            Entry {
                value,
                expires_at: now + self.ttl,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_after_set_returns_value() {
        let cache: TtlCache<&str, u32> = TtlCache::new(Duration::from_secs(60));
        cache.insert("delhi", 7);
        assert_eq!(cache.get(&"delhi"), Some(7));
        assert_eq!(cache.get(&"mumbai"), None);
    }

    #[test]
    fn entry_expires_and_is_evicted() {
        let cache: TtlCache<&str, u32> = TtlCache::new(Duration::from_secs(60));
        let t0 = Instant::now();
        cache.insert_at("delhi", 7, t0);

        assert_eq!(cache.get_at(&"delhi", t0 + Duration::from_secs(59)), Some(7));
        assert_eq!(cache.get_at(&"delhi", t0 + Duration::from_secs(61)), None);
        assert!(cache.is_empty(), "expired entry must be evicted on lookup");
    }

    #[test]
    fn entry_at_exact_expiry_is_stale() {
        let cache: TtlCache<&str, u32> = TtlCache::new(Duration::from_secs(60));
        let t0 = Instant::now();
        cache.insert_at("delhi", 7, t0);
        assert_eq!(cache.get_at(&"delhi", t0 + Duration::from_secs(60)), None);
    }

    #[test]
    fn reinsert_refreshes_expiry() {
        let cache: TtlCache<&str, u32> = TtlCache::new(Duration::from_secs(60));
        let t0 = Instant::now();
        cache.insert_at("delhi", 7, t0);
        cache.insert_at("delhi", 8, t0 + Duration::from_secs(45));

        assert_eq!(cache.get_at(&"delhi", t0 + Duration::from_secs(90)), Some(8));
        assert_eq!(cache.len(), 1);
    }
}
