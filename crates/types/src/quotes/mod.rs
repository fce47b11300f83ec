//! Core vendor quote domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error message recorded when a vendor exceeds its deadline
///
/// Kept distinct from generic vendor errors so callers can tell slow vendors
/// from broken ones.
pub const VENDOR_TIMEOUT_ERROR: &str = "Vendor timeout";

/// One vendor's answer for one part, one query attempt
///
/// Never mutated after creation. A failed or timed-out query still produces a
/// quote record so the aggregation is complete per vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorQuote {
	/// Unique identifier for the quote
	pub quote_id: String,

	/// ID of the vendor that produced this quote
	pub vendor_id: String,

	/// Normalized part number the quote is for
	pub part_number: String,

	/// Whether the vendor has the part in stock
	pub available: bool,

	/// Quoted unit price, absent on failure or when unavailable
	pub price: Option<f64>,

	/// Vendor-quoted days until delivery
	pub lead_time_days: Option<u32>,

	/// Vendor's historical probability of honoring the quote (0.0 to 1.0)
	pub reliability: f64,

	/// Whether the query itself succeeded
	pub success: bool,

	/// Error message when the query failed
	pub error: Option<String>,

	/// Whether the adapter degraded to a secondary data source
	pub fallback_used: bool,

	/// Round-trip time of the vendor call in milliseconds
	pub response_time_ms: u64,

	/// When the quote was created
	pub created_at: DateTime<Utc>,
}

impl VendorQuote {
	/// Create a successful quote
	pub fn success(
		vendor_id: String,
		part_number: String,
		available: bool,
		price: Option<f64>,
		lead_time_days: Option<u32>,
		reliability: f64,
	) -> Self {
		Self {
			quote_id: Uuid::new_v4().to_string(),
			vendor_id,
			part_number,
			available,
			price,
			lead_time_days,
			reliability,
			success: true,
			error: None,
			fallback_used: false,
			response_time_ms: 0,
			created_at: Utc::now(),
		}
	}

	/// Create a failed quote carrying the vendor's error
	pub fn failure(vendor_id: String, part_number: String, error: String) -> Self {
		Self {
			quote_id: Uuid::new_v4().to_string(),
			vendor_id,
			part_number,
			available: false,
			price: None,
			lead_time_days: None,
			reliability: 0.0,
			success: false,
			error: Some(error),
			fallback_used: false,
			response_time_ms: 0,
			created_at: Utc::now(),
		}
	}

	/// Create a quote recording a deadline miss
	pub fn timeout(vendor_id: String, part_number: String) -> Self {
		Self::failure(vendor_id, part_number, VENDOR_TIMEOUT_ERROR.to_string())
	}

	/// Whether this quote can be considered by the selector
	pub fn is_candidate(&self) -> bool {
		self.success && self.available && self.price.is_some()
	}

	/// Whether this quote records a timeout rather than a generic failure
	pub fn is_timeout(&self) -> bool {
		self.error.as_deref() == Some(VENDOR_TIMEOUT_ERROR)
	}

	pub fn with_response_time(mut self, time_ms: u64) -> Self {
		self.response_time_ms = time_ms;
		self
	}

	pub fn with_fallback_used(mut self, fallback_used: bool) -> Self {
		self.fallback_used = fallback_used;
		self
	}
}
