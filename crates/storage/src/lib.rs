//! Partsource Storage
//!
//! Quote cache implementations for the parts sourcing engine. The in-memory
//! store suits single-instance deployments; multi-instance deployments can
//! plug an external KV store through the same [`QuoteCache`] trait.

pub mod memory_store;

pub use memory_store::MemoryStore;
pub use partsource_types::{CacheEntry, CacheKey, CacheStats, QuoteCache, StorageError, StorageResult};
