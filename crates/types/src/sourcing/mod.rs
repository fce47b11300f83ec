//! Sourcing pipeline output models
//!
//! Everything external callers observe from a batch run lives here: the
//! per-part decision, the generated purchase-order line, and the aggregated
//! batch result with statistics and structured errors.

use crate::parts::{ClassifiedPart, VehicleContext};
use crate::quotes::VendorQuote;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod errors;

pub use errors::SourcingError;

/// Result type for batch sourcing operations
pub type BatchResult<T> = Result<T, SourcingError>;

/// A vendor quote together with its composite score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredQuote {
	/// The underlying quote
	pub quote: VendorQuote,

	/// Weighted composite score used for ranking
	pub score: f64,
}

/// Ranked recommendation produced by the vendor selector
///
/// Derived, never persisted by this core. When no candidate survives
/// filtering, `recommended` is false and both fields below are empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SourcingDecision {
	/// Whether any vendor could be recommended
	pub recommended: bool,

	/// Top-scored candidate
	pub vendor: Option<ScoredQuote>,

	/// Remaining candidates, sorted descending by score
	pub alternatives: Vec<ScoredQuote>,
}

impl SourcingDecision {
	/// Decision for a part no vendor could supply
	pub fn unsourced() -> Self {
		Self::default()
	}

	/// Decision with a recommended vendor and ranked alternatives
	pub fn recommended(vendor: ScoredQuote, alternatives: Vec<ScoredQuote>) -> Self {
		Self {
			recommended: true,
			vendor: Some(vendor),
			alternatives,
		}
	}
}

/// A priced, policy-checked purchase-order line
///
/// Immutable once produced. Persistence and transmission to an ordering
/// system are external collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoLineItem {
	/// Part description carried over from the estimate line
	pub part_description: String,

	/// Quantity ordered
	pub quantity: f64,

	/// Vendor unit price
	pub unit_price: f64,

	/// Price charged to the customer after markup, rounded to cents
	pub customer_price: f64,

	/// Markup fraction applied
	pub markup: f64,

	/// Vendor the line would be ordered from
	pub vendor_id: String,

	/// Whether the line exceeds the approval threshold
	pub requires_approval: bool,

	/// Always true for lines produced by this engine
	pub auto_generated: bool,

	/// When the line was generated
	pub created_at: DateTime<Utc>,
}

/// Everything the pipeline produced for one part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartSourcing {
	/// The classified part
	pub part: ClassifiedPart,

	/// All vendor quotes gathered (including failures and timeouts)
	pub quotes: Vec<VendorQuote>,

	/// Ranked recommendation
	pub decision: SourcingDecision,

	/// Generated purchase-order line, when one was requested and possible
	pub po_line: Option<PoLineItem>,

	/// Whether the quotes were served from the cache
	pub from_cache: bool,
}

/// Batch counters reported alongside the results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SourcingStatistics {
	/// Number of raw lines submitted
	pub total_parts: usize,

	/// Number of parts that completed the pipeline
	pub processed_parts: usize,

	/// Number of parts with a recommended vendor
	pub sourced_parts: usize,

	/// Number of parts answered from the quote cache
	pub cache_hits: usize,

	/// End-to-end batch duration in milliseconds
	pub processing_time_ms: u64,
}

/// A part that failed its pipeline, with enough identity to reassociate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartFailure {
	/// Source line number
	pub line_number: u32,

	/// Part number as written on the estimate
	pub part_number: String,

	/// What went wrong
	pub message: String,
}

/// The sole externally observed output of a batch invocation
///
/// Built once per batch and never mutated after return. Result order is
/// unspecified; each element carries line identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcingResult {
	/// True whenever the orchestrator could start; per-part problems are in
	/// `errors`, not here
	pub success: bool,

	/// Unique identifier for this batch run
	pub batch_id: String,

	/// Per-part outcomes, in completion order
	pub results: Vec<PartSourcing>,

	/// Batch counters
	pub statistics: SourcingStatistics,

	/// Parts that failed their pipeline
	pub errors: Vec<PartFailure>,

	/// Vehicle context the batch ran against (post enrichment, if any)
	pub vehicle: VehicleContext,
}

/// Per-call options recognized by the invocation surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcingOptions {
	/// Attempt VIN enrichment of the vehicle context before sourcing
	pub enhance_with_vin_decoding: bool,

	/// Generate purchase-order lines for recommended vendors
	pub generate_po: bool,

	/// Override the configured per-vendor timeout
	pub vendor_timeout_ms: Option<u64>,

	/// Override the configured markup fraction
	pub base_markup: Option<f64>,

	/// Override the configured approval threshold
	pub approval_threshold: Option<f64>,
}

impl Default for SourcingOptions {
	fn default() -> Self {
		Self {
			enhance_with_vin_decoding: false,
			generate_po: true,
			vendor_timeout_ms: None,
			base_markup: None,
			approval_threshold: None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_unsourced_decision_is_empty() {
		let decision = SourcingDecision::unsourced();

		assert!(!decision.recommended);
		assert!(decision.vendor.is_none());
		assert!(decision.alternatives.is_empty());
	}

	#[test]
	fn test_default_options() {
		let options = SourcingOptions::default();

		assert!(!options.enhance_with_vin_decoding);
		assert!(options.generate_po);
		assert!(options.vendor_timeout_ms.is_none());
	}
}
