//! Request/response models crossing the adapter boundary

use crate::parts::{ClassifiedPart, PartCategory, ValueTier, VehicleContext};
use serde::{Deserialize, Serialize};

/// What an adapter needs to price one part
///
/// A projection of [`ClassifiedPart`]; adapters never see raw estimate lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartQuery {
	/// Normalized part number, `[A-Z0-9]` only
	pub normalized_part_number: String,

	/// Derived part category
	pub category: PartCategory,

	/// Derived price bucket
	pub value_tier: ValueTier,

	/// Quantity to source
	pub quantity: f64,

	/// Vehicle the part fits
	pub vehicle: VehicleContext,
}

impl From<&ClassifiedPart> for PartQuery {
	fn from(part: &ClassifiedPart) -> Self {
		Self {
			normalized_part_number: part.normalized_part_number.clone(),
			category: part.category,
			value_tier: part.value_tier,
			quantity: part.quantity,
			vehicle: part.vehicle.clone(),
		}
	}
}

/// The fixed result shape every provider payload is normalized into
///
/// Adapters own the translation from provider-specific responses; the core
/// never sees a raw vendor payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorQuoteData {
	/// Whether the vendor has the part in stock
	pub available: bool,

	/// Quoted unit price
	pub price: Option<f64>,

	/// Vendor-quoted days until delivery
	pub lead_time_days: Option<u32>,

	/// Fill rate reported by the vendor, when the payload carries one
	pub reliability: Option<f64>,

	/// Whether the adapter degraded to a secondary data source
	pub fallback_used: bool,
}

impl VendorQuoteData {
	/// An in-stock quote
	pub fn available(price: f64, lead_time_days: u32) -> Self {
		Self {
			available: true,
			price: Some(price),
			lead_time_days: Some(lead_time_days),
			reliability: None,
			fallback_used: false,
		}
	}

	/// An out-of-stock answer
	pub fn unavailable() -> Self {
		Self {
			available: false,
			price: None,
			lead_time_days: None,
			reliability: None,
			fallback_used: false,
		}
	}

	pub fn with_reliability(mut self, reliability: f64) -> Self {
		self.reliability = Some(reliability);
		self
	}

	pub fn with_fallback_used(mut self, fallback_used: bool) -> Self {
		self.fallback_used = fallback_used;
		self
	}
}
