//! Core adapter domain model and the uniform vendor interface

use std::collections::HashMap;

pub mod errors;
pub mod models;
pub mod traits;

pub use errors::{AdapterError, AdapterValidationError};
pub use models::{PartQuery, VendorQuoteData};
pub use traits::VendorAdapter;

/// Result types for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;
pub type AdapterValidationResult<T> = Result<T, AdapterValidationError>;

/// Minimal runtime configuration needed by adapters
///
/// Only the fields adapter implementations actually need; the full [`Vendor`]
/// carries aggregator-side metadata adapters should not depend on.
///
/// [`Vendor`]: crate::vendors::Vendor
#[derive(Debug, Clone, PartialEq)]
pub struct VendorRuntimeConfig {
	/// Unique vendor instance identifier
	pub vendor_id: String,

	/// HTTP endpoint for the vendor API
	pub endpoint: String,

	/// Timeout for requests in milliseconds
	pub timeout_ms: u64,

	/// Optional custom HTTP headers for requests
	pub headers: Option<HashMap<String, String>>,
}

impl VendorRuntimeConfig {
	/// Create a new runtime config
	pub fn new(vendor_id: String, endpoint: String, timeout_ms: u64) -> Self {
		Self {
			vendor_id,
			endpoint,
			timeout_ms,
			headers: None,
		}
	}

	/// Create runtime config with custom headers
	pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
		self.headers = Some(headers);
		self
	}
}

impl From<&crate::vendors::Vendor> for VendorRuntimeConfig {
	fn from(vendor: &crate::vendors::Vendor) -> Self {
		Self {
			vendor_id: vendor.vendor_id.clone(),
			endpoint: vendor.endpoint.clone(),
			timeout_ms: vendor.timeout_ms,
			headers: vendor.metadata.headers.clone(),
		}
	}
}

/// Core Adapter domain model
///
/// Describes one vendor integration implementation; registered in the
/// adapter registry and referenced by vendors through `adapter_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Adapter {
	/// Unique identifier for the adapter
	pub adapter_id: String,

	/// Human-readable name
	pub name: String,

	/// Description of the adapter
	pub description: Option<String>,

	/// Version of the adapter implementation
	pub version: String,
}

impl Adapter {
	/// Create a new adapter
	pub fn new(adapter_id: String, description: String, name: String, version: String) -> Self {
		Self {
			adapter_id,
			name,
			description: Some(description),
			version,
		}
	}

	/// Validate the adapter configuration
	pub fn validate(&self) -> AdapterValidationResult<()> {
		if self.adapter_id.is_empty() {
			return Err(AdapterValidationError::MissingRequiredField {
				field: "adapter_id".to_string(),
			});
		}

		if !self
			.adapter_id
			.chars()
			.all(|c| c.is_alphanumeric() || c == '-' || c == '_')
		{
			return Err(AdapterValidationError::InvalidAdapterId {
				adapter_id: self.adapter_id.clone(),
			});
		}

		if self.name.is_empty() {
			return Err(AdapterValidationError::MissingRequiredField {
				field: "name".to_string(),
			});
		}

		if self.version.is_empty() {
			return Err(AdapterValidationError::MissingRequiredField {
				field: "version".to_string(),
			});
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn create_test_adapter() -> Adapter {
		Adapter::new(
			"lkq-v1".to_string(),
			"LKQ inventory search".to_string(),
			"LKQ Adapter".to_string(),
			"1.0.0".to_string(),
		)
	}

	#[test]
	fn test_adapter_creation() {
		let adapter = create_test_adapter();

		assert_eq!(adapter.adapter_id, "lkq-v1");
		assert_eq!(adapter.name, "LKQ Adapter");
		assert!(adapter.validate().is_ok());
	}

	#[test]
	fn test_adapter_validation_rejects_bad_id() {
		let mut adapter = create_test_adapter();
		adapter.adapter_id = "lkq v1!".to_string();
		assert!(matches!(
			adapter.validate(),
			Err(AdapterValidationError::InvalidAdapterId { .. })
		));
	}
}
