//! Batch-fatal error types
//!
//! Per-part problems are recorded in `SourcingResult::errors`; only
//! conditions that leave nothing valid to process surface as these.

use crate::parts::VehicleValidationError;
use thiserror::Error;

/// Errors that abort a batch before any part is processed
#[derive(Error, Debug)]
pub enum SourcingError {
	#[error("Invalid vehicle context: {0}")]
	InvalidVehicle(#[from] VehicleValidationError),

	#[error("Empty batch: no damage lines to process")]
	EmptyBatch,

	#[error("Configuration error: {reason}")]
	Configuration { reason: String },
}
