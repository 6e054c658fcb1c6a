//! TTL cache for historical price series.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

#[derive(Debug, Clone)]
struct CachedSeries {
    prices: Vec<f64>,
    fetched_at: Instant,
}

/// Historical prices keyed by `(symbol, days)`, expiring after a fixed TTL.
#[derive(Debug)]
pub struct HistoryCache {
    entries: RwLock<HashMap<(String, u32), CachedSeries>>,
    ttl: Duration,
}

impl HistoryCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Cached series, if present and younger than the TTL.
    #[must_use]
    pub fn get(&self, symbol: &str, days: u32) -> Option<Vec<f64>> {
        let entries = self.entries.read();
        let cached = entries.get(&(symbol.to_string(), days))?;

        if cached.fetched_at.elapsed() >= self.ttl {
            return None;
        }

        Some(cached.prices.clone())
    }

    /// Store a series, dropping any expired entries.
    pub fn put(&self, symbol: &str, days: u32, prices: Vec<f64>) {
        let mut entries = self.entries.write();
        let ttl = self.ttl;
        entries.retain(|_, cached| cached.fetched_at.elapsed() < ttl);
        entries.insert(
            (symbol.to_string(), days),
            CachedSeries {
                prices,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Number of stored entries, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_within_ttl() {
        let cache = HistoryCache::new(Duration::from_secs(60));
        cache.put("SPY", 3, vec![1.0, 2.0, 3.0]);
        assert_eq!(cache.get("SPY", 3), Some(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn test_key_includes_days() {
        let cache = HistoryCache::new(Duration::from_secs(60));
        cache.put("SPY", 3, vec![1.0, 2.0, 3.0]);
        assert_eq!(cache.get("SPY", 2), None);
        assert_eq!(cache.get("QQQ", 3), None);
    }

    #[test]
    fn test_zero_ttl_never_hits() {
        let cache = HistoryCache::new(Duration::ZERO);
        cache.put("SPY", 1, vec![1.0]);
        assert_eq!(cache.get("SPY", 1), None);
    }

    #[test]
    fn test_put_prunes_expired() {
        let cache = HistoryCache::new(Duration::ZERO);
        cache.put("SPY", 1, vec![1.0]);
        cache.put("QQQ", 1, vec![2.0]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_put_replaces_entry() {
        let cache = HistoryCache::new(Duration::from_secs(60));
        cache.put("SPY", 1, vec![1.0]);
        cache.put("SPY", 1, vec![2.0]);
        assert_eq!(cache.get("SPY", 1), Some(vec![2.0]));
        assert_eq!(cache.len(), 1);
        assert!(!cache.is_empty());
    }
}
