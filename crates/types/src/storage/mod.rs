//! Quote cache domain model and storage traits

use crate::parts::ClassifiedPart;
use crate::quotes::VendorQuote;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub mod errors;
pub mod traits;

pub use errors::{StorageError, StorageResult};
pub use traits::{CacheStats, QuoteCache};

/// Cache key identifying one part/vehicle sourcing context
///
/// A sha256 digest over the canonical payload
/// `normalized_part_number|value_tier|year|make|model`, rendered as lowercase
/// hex. Two parts that would produce the same vendor queries share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey(String);

impl CacheKey {
	/// Build the key for a classified part
	pub fn for_part(part: &ClassifiedPart) -> Self {
		let payload = format!(
			"{}|{}|{}|{}|{}",
			part.normalized_part_number,
			part.value_tier.as_str(),
			part.vehicle.year,
			part.vehicle.make.to_lowercase(),
			part.vehicle.model.to_lowercase(),
		);
		Self::from_payload(&payload)
	}

	/// Digest an already-canonical payload string
	pub fn from_payload(payload: &str) -> Self {
		let digest = Sha256::digest(payload.as_bytes());
		Self(format!("{:x}", digest))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Display for CacheKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

/// One cached vendor quote set
///
/// Created on first fan-out for a key, read-only until it ages past the TTL,
/// then treated as absent and replaced wholesale on the next fan-out. Owned
/// exclusively by the quote cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
	/// The key this entry is stored under
	pub key: CacheKey,

	/// When the entry was written
	pub created_at: DateTime<Utc>,

	/// The cached quote set
	pub quotes: Vec<VendorQuote>,
}

impl CacheEntry {
	/// Create a fresh entry
	pub fn new(key: CacheKey, quotes: Vec<VendorQuote>) -> Self {
		Self {
			key,
			created_at: Utc::now(),
			quotes,
		}
	}

	/// Whether the entry has aged past the given TTL
	pub fn is_expired(&self, ttl: Duration) -> bool {
		Utc::now() - self.created_at > ttl
	}
}
