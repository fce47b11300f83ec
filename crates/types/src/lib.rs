//! Partsource Types
//!
//! Domain models, traits, and error types for the automated parts sourcing
//! engine. Everything here is transport-agnostic; HTTP and storage details
//! live in the adapter and storage crates.

pub mod adapters;
pub mod circuit_breaker;
pub mod parts;
pub mod quotes;
pub mod sourcing;
pub mod storage;
pub mod vendors;

pub use adapters::{
	Adapter, AdapterError, AdapterResult, AdapterValidationError, PartQuery, VendorAdapter,
	VendorQuoteData, VendorRuntimeConfig,
};
pub use circuit_breaker::{CircuitBreakerState, CircuitDecision, CircuitState};
pub use parts::{
	ClassifiedPart, PartCategory, PartType, RawPartLine, ValueTier, VehicleContext,
	VehicleValidationError,
};
pub use quotes::{VendorQuote, VENDOR_TIMEOUT_ERROR};
pub use sourcing::{
	PartFailure, PartSourcing, PoLineItem, ScoredQuote, SourcingDecision, SourcingError,
	SourcingOptions, SourcingResult, SourcingStatistics,
};
pub use storage::{CacheEntry, CacheKey, CacheStats, QuoteCache, StorageError, StorageResult};
pub use vendors::{Vendor, VendorError, VendorMetadata, VendorStatus, VendorValidationError};

// External dependencies re-exported for downstream convenience
pub use chrono;
pub use serde_json;
