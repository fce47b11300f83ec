//! Partsource Adapters
//!
//! Vendor-specific adapters for the parts sourcing engine. Each adapter
//! normalizes one provider's payloads into the fixed quote shape; the
//! registry maps `adapter_id` to implementation.

pub mod client_cache;
pub mod lkq_adapter;
pub mod oeconnect_adapter;
pub mod partstrader_adapter;

pub use client_cache::{ClientCache, ClientConfig};
pub use lkq_adapter::LkqAdapter;
pub use oeconnect_adapter::OeConnectAdapter;
pub use partsource_types::{AdapterError, AdapterResult, VendorAdapter};
pub use partstrader_adapter::PartsTraderAdapter;

use std::collections::HashMap;
use std::sync::Arc;

/// Registry of vendor adapters keyed by adapter ID
pub struct AdapterRegistry {
	adapters: HashMap<String, Arc<dyn VendorAdapter>>,
}

impl AdapterRegistry {
	/// Create an empty registry
	pub fn new() -> Self {
		Self {
			adapters: HashMap::new(),
		}
	}

	/// Create a registry with the built-in adapters registered
	///
	/// The built-ins share one client cache so connection pools are reused
	/// across adapters hitting the same hosts.
	pub fn with_defaults() -> Self {
		let mut registry = Self::new();
		let client_cache = ClientCache::new();

		// Registration of the built-ins cannot collide
		registry
			.register(Arc::new(LkqAdapter::with_cache(client_cache.clone())))
			.expect("built-in adapter registration failed");
		registry
			.register(Arc::new(PartsTraderAdapter::with_cache(
				client_cache.clone(),
			)))
			.expect("built-in adapter registration failed");
		registry
			.register(Arc::new(OeConnectAdapter::with_cache(client_cache)))
			.expect("built-in adapter registration failed");

		registry
	}

	/// Register an adapter under its own ID
	pub fn register(&mut self, adapter: Arc<dyn VendorAdapter>) -> AdapterResult<()> {
		adapter.adapter_info().validate()?;

		let adapter_id = adapter.id().to_string();
		if self.adapters.contains_key(&adapter_id) {
			return Err(AdapterError::DuplicateAdapter { adapter_id });
		}

		self.adapters.insert(adapter_id, adapter);
		Ok(())
	}

	/// Look up an adapter by ID
	pub fn get(&self, adapter_id: &str) -> Option<Arc<dyn VendorAdapter>> {
		self.adapters.get(adapter_id).cloned()
	}

	/// All registered adapters
	pub fn get_all(&self) -> &HashMap<String, Arc<dyn VendorAdapter>> {
		&self.adapters
	}

	/// Number of registered adapters
	pub fn len(&self) -> usize {
		self.adapters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.adapters.is_empty()
	}
}

impl Default for AdapterRegistry {
	fn default() -> Self {
		Self::with_defaults()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_with_defaults_registers_builtins() {
		let registry = AdapterRegistry::with_defaults();

		assert_eq!(registry.len(), 3);
		assert!(registry.get("lkq-v1").is_some());
		assert!(registry.get("partstrader-v1").is_some());
		assert!(registry.get("oeconnect-v1").is_some());
		assert!(registry.get("unknown-v1").is_none());
	}

	#[test]
	fn test_duplicate_registration_is_rejected() {
		let mut registry = AdapterRegistry::with_defaults();

		let result = registry.register(Arc::new(LkqAdapter::new()));
		assert!(matches!(
			result,
			Err(AdapterError::DuplicateAdapter { adapter_id }) if adapter_id == "lkq-v1"
		));
	}
}
