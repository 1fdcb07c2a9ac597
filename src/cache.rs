//! Layered per-key cache with TTL expiry.
//!
//! # Data Flow
//! ```text
//! set(key, value)
//!     → fast tier (in-memory, DashMap)
//!     → durable tier (wholesale JSON file, absolute expiry timestamp)
//!
//! get(key)
//!     → fast tier (miss or expired → fall through)
//!     → durable tier (expired entries are authoritative misses;
//!                     live entries backfill the fast tier)
//! ```
//!
//! # Design Decisions
//! - Expiry is an absolute timestamp recorded at write time, so a fast-tier
//!   hit can never outlive the durable record it mirrors
//! - No eviction beyond TTL: the key space is one balance entry per chain
//! - The durable file is written wholesale; single-writer usage is assumed

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// A cached value with its absolute expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry<T> {
    value: T,
    expires_at_ms: u64,
}

impl<T> CacheEntry<T> {
    fn is_live(&self, now_ms: u64) -> bool {
        self.expires_at_ms > now_ms
    }
}

/// Two-tier read-through/write-through cache.
pub struct LayeredCache<T> {
    fast: DashMap<String, CacheEntry<T>>,
    durable_path: Option<PathBuf>,
    ttl_ms: u64,
}

impl<T: Clone + Serialize + DeserializeOwned> LayeredCache<T> {
    /// Create a cache with the given TTL. Without a durable path only the
    /// in-memory tier is used.
    pub fn new(ttl: Duration, durable_path: Option<PathBuf>) -> Self {
        Self {
            fast: DashMap::new(),
            durable_path,
            ttl_ms: ttl.as_millis() as u64,
        }
    }

    /// Look up a value. Expired entries are misses in both tiers.
    pub fn get(&self, key: &str) -> Option<T> {
        self.get_at(key, now_ms())
    }

    /// Write a value to both tiers, stamping expiry as now + TTL.
    pub fn set(&self, key: &str, value: T) {
        self.set_at(key, value, now_ms());
    }

    /// Clock-injected lookup.
    pub fn get_at(&self, key: &str, now_ms: u64) -> Option<T> {
        if let Some(entry) = self.fast.get(key) {
            if entry.is_live(now_ms) {
                return Some(entry.value.clone());
            }
            drop(entry);
            self.fast.remove(key);
        }

        let durable = self.read_durable()?;
        let entry = durable.get(key)?;
        if !entry.is_live(now_ms) {
            return None;
        }
        self.fast.insert(key.to_string(), entry.clone());
        Some(entry.value.clone())
    }

    /// Clock-injected write.
    pub fn set_at(&self, key: &str, value: T, now_ms: u64) {
        let entry = CacheEntry {
            value,
            expires_at_ms: now_ms + self.ttl_ms,
        };
        self.fast.insert(key.to_string(), entry.clone());

        if self.durable_path.is_some() {
            let mut durable = self.read_durable().unwrap_or_default();
            durable.insert(key.to_string(), entry);
            self.write_durable(&durable);
        }
    }

    fn read_durable(&self) -> Option<HashMap<String, CacheEntry<T>>> {
        let path = self.durable_path.as_ref()?;
        let file = File::open(path).ok()?;
        serde_json::from_reader(BufReader::new(file)).ok()
    }

    fn write_durable(&self, durable: &HashMap<String, CacheEntry<T>>) {
        let Some(path) = self.durable_path.as_ref() else {
            return;
        };
        let file = match File::create(path) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Cannot write durable cache tier");
                return;
            }
        };
        if let Err(e) = serde_json::to_writer(BufWriter::new(file), durable) {
            tracing::warn!(path = %path.display(), error = %e, "Cannot serialize durable cache tier");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(5);

    #[test]
    fn round_trip_within_ttl() {
        let cache: LayeredCache<String> = LayeredCache::new(TTL, None);
        cache.set_at("walletBalance_sepolia", "1.5".to_string(), 1_000);
        assert_eq!(
            cache.get_at("walletBalance_sepolia", 1_001),
            Some("1.5".to_string())
        );
    }

    #[test]
    fn expired_entry_is_a_miss() {
        let cache: LayeredCache<String> = LayeredCache::new(TTL, None);
        cache.set_at("k", "v".to_string(), 1_000);
        assert_eq!(cache.get_at("k", 5_999), Some("v".to_string()));
        assert_eq!(cache.get_at("k", 6_000), None);
    }

    #[test]
    fn durable_tier_backfills_fast_tier() {
        let path = PathBuf::from("test_cache_backfill.json");
        {
            let writer: LayeredCache<String> = LayeredCache::new(TTL, Some(path.clone()));
            writer.set_at("k", "v".to_string(), 1_000);
        }

        // Fresh instance: empty fast tier, durable hit within TTL.
        let reader: LayeredCache<String> = LayeredCache::new(TTL, Some(path.clone()));
        assert_eq!(reader.get_at("k", 2_000), Some("v".to_string()));
        // Backfilled: a second read hits the fast tier even if the file goes away.
        std::fs::remove_file(&path).unwrap_or_default();
        assert_eq!(reader.get_at("k", 2_001), Some("v".to_string()));
    }

    #[test]
    fn stale_durable_entry_is_not_resurrected() {
        let path = PathBuf::from("test_cache_stale.json");
        let cache: LayeredCache<String> = LayeredCache::new(TTL, Some(path.clone()));
        cache.set_at("k", "v".to_string(), 1_000);

        // Past TTL: miss, even though the durable file still holds the entry.
        assert_eq!(cache.get_at("k", 10_000), None);
        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(parsed.get("k").is_some());

        // A fresh instance must not resurrect it through the fast tier either.
        let reader: LayeredCache<String> = LayeredCache::new(TTL, Some(path.clone()));
        assert_eq!(reader.get_at("k", 10_000), None);

        std::fs::remove_file(&path).unwrap_or_default();
    }
}
