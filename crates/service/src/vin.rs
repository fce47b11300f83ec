//! VIN decoder seam
//!
//! Decoding itself is an external collaborator; the orchestrator only
//! consumes the trait. Decode failure must leave the vehicle context
//! unenriched rather than propagate.

use async_trait::async_trait;
use thiserror::Error;

/// Fields a VIN decode can contribute to the vehicle context
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VinDetails {
	pub body_style: Option<String>,
	pub engine_size: Option<String>,
}

/// Errors a decoder implementation may surface
#[derive(Error, Debug)]
pub enum VinDecodeError {
	#[error("VIN decode failed: {reason}")]
	Failed { reason: String },

	#[error("VIN decoder timed out")]
	Timeout,
}

/// Trait for VIN decoding collaborators
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VinDecoder: Send + Sync {
	/// Decode a VIN into vehicle detail fields
	async fn decode(&self, vin: &str) -> Result<VinDetails, VinDecodeError>;
}
