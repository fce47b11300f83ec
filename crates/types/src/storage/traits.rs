//! Storage traits for pluggable quote cache implementations

use super::{CacheEntry, CacheKey, StorageResult};
use crate::quotes::VendorQuote;
use async_trait::async_trait;

/// Statistics about cache usage
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
	/// Entries currently stored, fresh or not
	pub total_entries: usize,

	/// Entries still within their TTL
	pub fresh_entries: usize,
}

/// Trait for quote cache operations
///
/// The cache is the only shared mutable resource in the pipeline. Entries are
/// replaced wholesale under last-writer-wins semantics, so implementations
/// need no fine-grained locking.
#[async_trait]
pub trait QuoteCache: Send + Sync {
	/// Look up a fresh entry; expired entries are reported absent
	async fn get(&self, key: &CacheKey) -> StorageResult<Option<CacheEntry>>;

	/// Store a quote set, replacing any existing entry for the key
	async fn put(&self, key: CacheKey, quotes: Vec<VendorQuote>) -> StorageResult<()>;

	/// Drop all entries
	async fn clear(&self) -> StorageResult<()>;

	/// Remove expired entries, returning how many were dropped
	async fn purge_expired(&self) -> StorageResult<usize>;

	/// Get cache usage statistics
	async fn stats(&self) -> StorageResult<CacheStats>;
}
