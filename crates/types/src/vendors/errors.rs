//! Error types for vendor operations

use thiserror::Error;

/// Validation errors for vendor configuration
#[derive(Error, Debug)]
pub enum VendorValidationError {
	#[error("Missing required field: {field}")]
	MissingRequiredField { field: String },

	#[error("Invalid vendor ID: {vendor_id}")]
	InvalidVendorId { vendor_id: String },

	#[error("Invalid endpoint URL: {endpoint}")]
	InvalidEndpoint { endpoint: String },

	#[error("Invalid timeout: {timeout_ms}ms")]
	InvalidTimeout { timeout_ms: u64 },

	#[error("Invalid reliability: {value} (must be between 0 and 1)")]
	InvalidReliability { value: f64 },
}

/// General vendor-related errors
#[derive(Error, Debug)]
pub enum VendorError {
	#[error("Vendor validation failed: {0}")]
	Validation(#[from] VendorValidationError),

	#[error("Vendor '{vendor_id}' references unknown adapter '{adapter_id}'")]
	UnknownAdapter {
		vendor_id: String,
		adapter_id: String,
	},
}
