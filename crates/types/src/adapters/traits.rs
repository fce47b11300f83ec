//! Core adapter trait for vendor integrations

use super::{Adapter, AdapterResult, PartQuery, VendorQuoteData, VendorRuntimeConfig};
use async_trait::async_trait;
use std::fmt::Debug;

/// Core trait for vendor adapter implementations
///
/// One implementation per real vendor integration (LKQ, PartsTrader,
/// OE Connection, ...). The adapter handles its own transport, auth, and
/// payload normalization; the fan-out applies its own outer deadline
/// regardless of adapter behavior.
#[async_trait]
pub trait VendorAdapter: Send + Sync + Debug {
	/// Get adapter configuration information
	fn adapter_info(&self) -> &Adapter;

	/// Get adapter ID (for registration and vendor matching)
	fn id(&self) -> &str {
		&self.adapter_info().adapter_id
	}

	/// Query price/availability/lead-time for one part
	///
	/// Provider-specific payloads must be normalized into
	/// [`VendorQuoteData`] before returning; errors map into
	/// [`AdapterError`](super::AdapterError) variants.
	async fn query(
		&self,
		request: &PartQuery,
		config: &VendorRuntimeConfig,
	) -> AdapterResult<VendorQuoteData>;

	/// Health check for the vendor integration
	async fn health_check(&self, config: &VendorRuntimeConfig) -> AdapterResult<bool>;

	/// Get human-readable name for this adapter
	fn name(&self) -> &str {
		&self.adapter_info().name
	}

	/// Get adapter version
	fn version(&self) -> &str {
		&self.adapter_info().version
	}
}
