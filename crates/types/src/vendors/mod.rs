//! Core Vendor domain model and business logic

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod errors;

pub use errors::{VendorError, VendorValidationError};

/// Result type for vendor operations
pub type VendorResult<T> = Result<T, VendorError>;

/// Result type for vendor validation operations
pub type VendorValidationResult<T> = Result<T, VendorValidationError>;

/// A configured third-party parts vendor
///
/// Each vendor references the adapter used to talk to its API. The vendor is
/// the unit the fan-out iterates over; the adapter is the integration code.
#[derive(Debug, Clone, PartialEq)]
pub struct Vendor {
	/// Unique identifier for the vendor
	pub vendor_id: String,

	/// ID of the adapter used to communicate with this vendor
	pub adapter_id: String,

	/// HTTP endpoint for the vendor API
	pub endpoint: String,

	/// Timeout for requests to this vendor in milliseconds
	pub timeout_ms: u64,

	/// Current operational status
	pub status: VendorStatus,

	/// Additional metadata and configuration
	pub metadata: VendorMetadata,

	/// When the vendor was registered
	pub created_at: DateTime<Utc>,

	/// Last time a request to the vendor completed
	pub last_seen: Option<DateTime<Utc>>,
}

/// Vendor operational status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum VendorStatus {
	/// Vendor is active and available
	Active,
	/// Vendor is temporarily inactive
	Inactive,
	/// Vendor has encountered repeated errors
	Error,
	/// Vendor is being initialized
	Initializing,
}

/// Vendor metadata and configuration
#[derive(Debug, Clone, PartialEq)]
pub struct VendorMetadata {
	/// Human-readable name
	pub name: Option<String>,

	/// Description of the vendor
	pub description: Option<String>,

	/// Historical fill rate used when a quote payload carries none (0.0 to 1.0)
	pub default_reliability: f64,

	/// Maximum retry attempts for failed requests
	pub max_retries: u32,

	/// Custom HTTP headers for requests
	pub headers: Option<HashMap<String, String>>,
}

impl Default for VendorMetadata {
	fn default() -> Self {
		Self {
			name: None,
			description: None,
			default_reliability: 0.5,
			max_retries: 0,
			headers: None,
		}
	}
}

impl Vendor {
	/// Create a new vendor
	pub fn new(vendor_id: String, adapter_id: String, endpoint: String, timeout_ms: u64) -> Self {
		Self {
			vendor_id,
			adapter_id,
			endpoint,
			timeout_ms,
			status: VendorStatus::Initializing,
			metadata: VendorMetadata::default(),
			created_at: Utc::now(),
			last_seen: None,
		}
	}

	/// Check if the vendor is available for requests
	pub fn is_available(&self) -> bool {
		matches!(self.status, VendorStatus::Active)
	}

	/// Update vendor status
	pub fn update_status(&mut self, status: VendorStatus) {
		self.status = status;
		self.last_seen = Some(Utc::now());
	}

	/// Mark vendor as seen
	pub fn mark_seen(&mut self) {
		self.last_seen = Some(Utc::now());
	}

	/// Validate the vendor configuration
	pub fn validate(&self) -> VendorValidationResult<()> {
		if self.vendor_id.is_empty() {
			return Err(VendorValidationError::MissingRequiredField {
				field: "vendor_id".to_string(),
			});
		}

		if !self
			.vendor_id
			.chars()
			.all(|c| c.is_alphanumeric() || c == '-' || c == '_')
		{
			return Err(VendorValidationError::InvalidVendorId {
				vendor_id: self.vendor_id.clone(),
			});
		}

		if self.adapter_id.is_empty() {
			return Err(VendorValidationError::MissingRequiredField {
				field: "adapter_id".to_string(),
			});
		}

		if url::Url::parse(&self.endpoint).is_err() {
			return Err(VendorValidationError::InvalidEndpoint {
				endpoint: self.endpoint.clone(),
			});
		}

		if self.timeout_ms == 0 {
			return Err(VendorValidationError::InvalidTimeout {
				timeout_ms: self.timeout_ms,
			});
		}

		if !(0.0..=1.0).contains(&self.metadata.default_reliability) {
			return Err(VendorValidationError::InvalidReliability {
				value: self.metadata.default_reliability,
			});
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn create_test_vendor() -> Vendor {
		Vendor::new(
			"lkq-midwest".to_string(),
			"lkq-v1".to_string(),
			"https://api.lkq.example.com/v1".to_string(),
			2000,
		)
	}

	#[test]
	fn test_vendor_creation() {
		let vendor = create_test_vendor();

		assert_eq!(vendor.vendor_id, "lkq-midwest");
		assert_eq!(vendor.adapter_id, "lkq-v1");
		assert_eq!(vendor.status, VendorStatus::Initializing);
		assert!(!vendor.is_available());
		assert!(vendor.last_seen.is_none());
	}

	#[test]
	fn test_vendor_validation() {
		let vendor = create_test_vendor();
		assert!(vendor.validate().is_ok());
	}

	#[test]
	fn test_vendor_validation_rejects_bad_endpoint() {
		let mut vendor = create_test_vendor();
		vendor.endpoint = "not a url".to_string();
		assert!(matches!(
			vendor.validate(),
			Err(VendorValidationError::InvalidEndpoint { .. })
		));
	}

	#[test]
	fn test_vendor_validation_rejects_bad_vendor_id() {
		let mut vendor = create_test_vendor();
		vendor.vendor_id = "bad id!".to_string();
		assert!(matches!(
			vendor.validate(),
			Err(VendorValidationError::InvalidVendorId { .. })
		));
	}

	#[test]
	fn test_vendor_validation_rejects_out_of_range_reliability() {
		let mut vendor = create_test_vendor();
		vendor.metadata.default_reliability = 1.2;
		assert!(matches!(
			vendor.validate(),
			Err(VendorValidationError::InvalidReliability { .. })
		));
	}

	#[test]
	fn test_status_update_marks_seen() {
		let mut vendor = create_test_vendor();
		vendor.update_status(VendorStatus::Active);

		assert!(vendor.is_available());
		assert!(vendor.last_seen.is_some());
	}
}
