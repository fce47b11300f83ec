//! Error types for adapter operations

use thiserror::Error;

/// Validation errors for adapter configuration
#[derive(Error, Debug)]
pub enum AdapterValidationError {
	#[error("Missing required field: {field}")]
	MissingRequiredField { field: String },

	#[error("Invalid adapter ID: {adapter_id}")]
	InvalidAdapterId { adapter_id: String },

	#[error("Invalid configuration: {reason}")]
	InvalidConfiguration { reason: String },
}

/// Errors surfaced by vendor adapter calls
#[derive(Error, Debug)]
pub enum AdapterError {
	#[error("Adapter validation failed: {0}")]
	Validation(#[from] AdapterValidationError),

	#[error("HTTP error: {0}")]
	Http(#[from] reqwest::Error),

	#[error("Vendor returned an invalid response: {reason}")]
	InvalidResponse { reason: String },

	#[error("Vendor request timed out after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error("Operation '{operation}' not supported by adapter '{adapter_id}'")]
	UnsupportedOperation {
		operation: String,
		adapter_id: String,
	},

	#[error("Adapter is disabled: {adapter_id}")]
	Disabled { adapter_id: String },

	#[error("Adapter already registered: {adapter_id}")]
	DuplicateAdapter { adapter_id: String },

	#[error("Unknown adapter: {adapter_id}")]
	UnknownAdapter { adapter_id: String },

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}
