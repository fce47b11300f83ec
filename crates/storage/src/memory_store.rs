//! In-memory quote cache implementation using DashMap with TTL support

use async_trait::async_trait;
use chrono::Duration;
use dashmap::DashMap;
use partsource_types::{
	CacheEntry, CacheKey, CacheStats, QuoteCache, StorageResult, VendorQuote,
};
use std::sync::Arc;
use tokio::time::interval;
use tracing::debug;

/// In-memory quote cache with TTL support
///
/// Entries are replaced wholesale under last-writer-wins semantics; DashMap
/// sharding makes concurrent reads and writes from many part pipelines safe
/// without an outer lock.
#[derive(Clone)]
pub struct MemoryStore {
	entries: Arc<DashMap<CacheKey, CacheEntry>>,
	ttl: Duration,
	cleanup_interval_secs: u64,
}

impl MemoryStore {
	/// Create a store with the default 5-minute TTL
	pub fn new() -> Self {
		Self::with_ttl(Duration::seconds(300))
	}

	/// Create a store with a custom TTL
	pub fn with_ttl(ttl: Duration) -> Self {
		Self {
			entries: Arc::new(DashMap::new()),
			ttl,
			cleanup_interval_secs: 60,
		}
	}

	pub fn with_cleanup_interval(mut self, secs: u64) -> Self {
		self.cleanup_interval_secs = secs;
		self
	}

	/// Start the periodic purge task for expired entries
	///
	/// Expired entries are already invisible to `get`; the purge only bounds
	/// memory growth for keys that are never read again.
	pub fn start_ttl_cleanup(&self) -> tokio::task::JoinHandle<()> {
		let entries = Arc::clone(&self.entries);
		let ttl = self.ttl;
		let period = std::time::Duration::from_secs(self.cleanup_interval_secs);

		tokio::spawn(async move {
			let mut cleanup_interval = interval(period);

			loop {
				cleanup_interval.tick().await;

				let mut expired = Vec::new();
				for entry in entries.iter() {
					if entry.value().is_expired(ttl) {
						expired.push(entry.key().clone());
					}
				}

				if !expired.is_empty() {
					debug!("Purging {} expired quote cache entries", expired.len());
					for key in expired {
						entries.remove(&key);
					}
				}
			}
		})
	}
}

impl Default for MemoryStore {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl QuoteCache for MemoryStore {
	async fn get(&self, key: &CacheKey) -> StorageResult<Option<CacheEntry>> {
		match self.entries.get(key) {
			Some(entry) if !entry.value().is_expired(self.ttl) => Ok(Some(entry.value().clone())),
			Some(entry) => {
				// Stale entry: report absent and drop it so the next put
				// replaces it wholesale
				let key = entry.key().clone();
				drop(entry);
				self.entries.remove(&key);
				Ok(None)
			},
			None => Ok(None),
		}
	}

	async fn put(&self, key: CacheKey, quotes: Vec<VendorQuote>) -> StorageResult<()> {
		let entry = CacheEntry::new(key.clone(), quotes);
		self.entries.insert(key, entry);
		Ok(())
	}

	async fn clear(&self) -> StorageResult<()> {
		self.entries.clear();
		Ok(())
	}

	async fn purge_expired(&self) -> StorageResult<usize> {
		let mut expired = Vec::new();
		for entry in self.entries.iter() {
			if entry.value().is_expired(self.ttl) {
				expired.push(entry.key().clone());
			}
		}

		let count = expired.len();
		for key in expired {
			self.entries.remove(&key);
		}

		Ok(count)
	}

	async fn stats(&self) -> StorageResult<CacheStats> {
		let total_entries = self.entries.len();
		let fresh_entries = self
			.entries
			.iter()
			.filter(|entry| !entry.value().is_expired(self.ttl))
			.count();

		Ok(CacheStats {
			total_entries,
			fresh_entries,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::Utc;
	use partsource_types::VendorQuote;

	fn create_test_key(tag: &str) -> CacheKey {
		CacheKey::from_payload(tag)
	}

	fn create_test_quotes() -> Vec<VendorQuote> {
		vec![VendorQuote::success(
			"lkq-midwest".to_string(),
			"GM84044368".to_string(),
			true,
			Some(420.0),
			Some(2),
			0.9,
		)]
	}

	#[tokio::test]
	async fn test_put_then_get() {
		let store = MemoryStore::new();
		let key = create_test_key("part-a");

		store.put(key.clone(), create_test_quotes()).await.unwrap();

		let entry = store.get(&key).await.unwrap().expect("entry should exist");
		assert_eq!(entry.quotes.len(), 1);
		assert_eq!(entry.quotes[0].vendor_id, "lkq-midwest");
	}

	#[tokio::test]
	async fn test_miss_on_unknown_key() {
		let store = MemoryStore::new();
		assert!(store
			.get(&create_test_key("never-stored"))
			.await
			.unwrap()
			.is_none());
	}

	#[tokio::test]
	async fn test_expired_entry_is_absent() {
		let store = MemoryStore::with_ttl(Duration::seconds(60));
		let key = create_test_key("part-a");
		store.put(key.clone(), create_test_quotes()).await.unwrap();

		// Backdate the entry past the TTL
		let mut entry = store.entries.get(&key).unwrap().value().clone();
		entry.created_at = Utc::now() - Duration::seconds(120);
		store.entries.insert(key.clone(), entry);

		assert!(store.get(&key).await.unwrap().is_none());
		// The stale entry was also dropped
		assert!(!store.entries.contains_key(&key));
	}

	#[tokio::test]
	async fn test_put_replaces_wholesale() {
		let store = MemoryStore::new();
		let key = create_test_key("part-a");

		store.put(key.clone(), create_test_quotes()).await.unwrap();
		store.put(key.clone(), vec![]).await.unwrap();

		let entry = store.get(&key).await.unwrap().unwrap();
		assert!(entry.quotes.is_empty());
	}

	#[tokio::test]
	async fn test_clear_and_stats() {
		let store = MemoryStore::new();
		store
			.put(create_test_key("a"), create_test_quotes())
			.await
			.unwrap();
		store
			.put(create_test_key("b"), create_test_quotes())
			.await
			.unwrap();

		let stats = store.stats().await.unwrap();
		assert_eq!(stats.total_entries, 2);
		assert_eq!(stats.fresh_entries, 2);

		store.clear().await.unwrap();
		let stats = store.stats().await.unwrap();
		assert_eq!(stats.total_entries, 0);
	}

	#[tokio::test]
	async fn test_purge_expired_counts() {
		let store = MemoryStore::with_ttl(Duration::seconds(60));
		let fresh_key = create_test_key("fresh");
		let stale_key = create_test_key("stale");
		store
			.put(fresh_key.clone(), create_test_quotes())
			.await
			.unwrap();
		store
			.put(stale_key.clone(), create_test_quotes())
			.await
			.unwrap();

		let mut entry = store.entries.get(&stale_key).unwrap().value().clone();
		entry.created_at = Utc::now() - Duration::seconds(120);
		store.entries.insert(stale_key.clone(), entry);

		assert_eq!(store.purge_expired().await.unwrap(), 1);
		assert!(store.get(&fresh_key).await.unwrap().is_some());
	}
}
