// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! TTL-bounded LRU cache for listing reads.
//!
//! Caches the full unfiltered listing per owner key (user id for notes,
//! note id or the fixed global key for labels) to avoid repeated document
//! store scans for the most common query pattern. Mutating endpoints call
//! [`ListingCache::invalidate`] after the store write; a read that races a
//! concurrent write may repopulate with a snapshot that is stale until the
//! next invalidation or TTL expiry, and no tighter bound is promised.

use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use lru::LruCache;

/// TTL applied to every listing cache in the service.
pub const LISTING_TTL: Duration = Duration::from_secs(60);

/// Cached entry: listing snapshot + insertion timestamp.
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

/// In-process LRU cache for hot listing lookups.
pub struct ListingCache<V> {
    cache: Mutex<LruCache<String, CacheEntry<V>>>,
    ttl: Duration,
}

impl<V: Clone> ListingCache<V> {
    /// Create a new cache with the given capacity and TTL.
    ///
    /// - `capacity`: Max number of owner keys to cache.
    /// - `ttl`: Time-to-live for each cache entry.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1).unwrap()),
            )),
            ttl,
        }
    }

    /// Get the cached listing for an owner key.
    ///
    /// Returns `None` if not cached or expired.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut cache = self.cache.lock().ok()?;
        if let Some(entry) = cache.get(key) {
            if entry.inserted_at.elapsed() < self.ttl {
                return Some(entry.value.clone());
            }
            // Expired — remove it
            cache.pop(key);
        }
        None
    }

    /// Store the listing for an owner key, replacing any prior value.
    pub fn put(&self, key: &str, value: V) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(
                key.to_string(),
                CacheEntry {
                    value,
                    inserted_at: Instant::now(),
                },
            );
        }
    }

    /// Invalidate the cache for an owner key.
    ///
    /// Deleting an absent key is a no-op.
    pub fn invalidate(&self, key: &str) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.pop(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_put_and_get() {
        let cache: ListingCache<Vec<String>> = ListingCache::new(10, Duration::from_secs(300));
        let key = "user-1";
        let data = vec!["note-a".to_string()];

        assert!(cache.get(key).is_none());

        cache.put(key, data.clone());

        let result = cache.get(key).unwrap();
        assert_eq!(result, data);
    }

    #[test]
    fn cache_put_replaces_prior_value() {
        let cache: ListingCache<Vec<String>> = ListingCache::new(10, Duration::from_secs(300));
        cache.put("user-1", vec!["old".to_string()]);
        cache.put("user-1", vec!["new".to_string()]);

        assert_eq!(cache.get("user-1").unwrap(), vec!["new".to_string()]);
    }

    #[test]
    fn cache_invalidate() {
        let cache: ListingCache<Vec<String>> = ListingCache::new(10, Duration::from_secs(300));
        cache.put("user-1", vec!["note-a".to_string()]);
        assert!(cache.get("user-1").is_some());

        cache.invalidate("user-1");
        assert!(cache.get("user-1").is_none());

        // Idempotent on absent keys
        cache.invalidate("user-1");
        assert!(cache.get("user-1").is_none());
    }

    #[test]
    fn cache_ttl_expiry() {
        let cache: ListingCache<Vec<String>> = ListingCache::new(10, Duration::from_millis(1));
        cache.put("user-1", vec!["note-a".to_string()]);

        // Wait for TTL to expire
        std::thread::sleep(Duration::from_millis(5));

        assert!(cache.get("user-1").is_none());
    }

    #[test]
    fn cache_entry_live_within_ttl() {
        let cache: ListingCache<Vec<String>> = ListingCache::new(10, Duration::from_millis(200));
        cache.put("user-1", vec!["note-a".to_string()]);

        std::thread::sleep(Duration::from_millis(50));

        assert!(cache.get("user-1").is_some());
    }
}
