//! Error types for part operations

use thiserror::Error;

/// Validation errors for the vehicle context
#[derive(Error, Debug)]
pub enum VehicleValidationError {
	#[error("Implausible model year: {year}")]
	ImplausibleYear { year: i32 },

	#[error("Missing required field: {field}")]
	MissingField { field: String },
}
