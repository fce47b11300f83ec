//! Core part domain models
//!
//! Raw damage-line records arrive from the external estimate parser already
//! normalized out of their shop-management exchange format. The classifier
//! turns them into [`ClassifiedPart`] values that the rest of the pipeline
//! operates on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod errors;

pub use errors::VehicleValidationError;

/// A single itemized damage/repair line as produced by the estimate parser
///
/// Immutable input. Numeric fields are optional because estimate exports
/// routinely omit or mangle them; the classifier coerces rather than rejects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPartLine {
	/// Line number within the source estimate
	pub line_number: u32,

	/// Part number as written on the estimate
	pub part_number: String,

	/// OEM part number, when the estimate distinguishes one
	#[serde(default)]
	pub oem_part_number: Option<String>,

	/// Free-text part description
	pub description: String,

	/// Quantity ordered
	#[serde(default)]
	pub quantity: Option<f64>,

	/// Estimated unit cost from the estimate line
	#[serde(default)]
	pub unit_cost: Option<f64>,

	/// Operation type code (replace, repair, refinish, ...)
	#[serde(default)]
	pub operation_type: Option<String>,
}

impl RawPartLine {
	/// Create a raw line with just the required fields
	pub fn new(line_number: u32, part_number: String, description: String) -> Self {
		Self {
			line_number,
			part_number,
			oem_part_number: None,
			description,
			quantity: None,
			unit_cost: None,
			operation_type: None,
		}
	}

	pub fn with_oem_number(mut self, oem: String) -> Self {
		self.oem_part_number = Some(oem);
		self
	}

	pub fn with_quantity(mut self, quantity: f64) -> Self {
		self.quantity = Some(quantity);
		self
	}

	pub fn with_unit_cost(mut self, unit_cost: f64) -> Self {
		self.unit_cost = Some(unit_cost);
		self
	}

	pub fn with_operation_type(mut self, operation_type: String) -> Self {
		self.operation_type = Some(operation_type);
		self
	}
}

/// Vehicle the parts belong to
///
/// Optionally enriched by an external VIN decoder; enrichment failure leaves
/// the optional fields absent and never fails the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleContext {
	/// Model year
	pub year: i32,

	/// Manufacturer name
	pub make: String,

	/// Model name
	pub model: String,

	/// Vehicle identification number, when known
	#[serde(default)]
	pub vin: Option<String>,

	/// Whether year/make/model were decoded from the VIN
	#[serde(default)]
	pub decoded_from_vin: bool,

	/// Body style (sedan, coupe, ...), usually VIN-derived
	#[serde(default)]
	pub body_style: Option<String>,

	/// Engine displacement, usually VIN-derived
	#[serde(default)]
	pub engine_size: Option<String>,
}

impl VehicleContext {
	/// Create a vehicle context from the always-present identity fields
	pub fn new(year: i32, make: String, model: String) -> Self {
		Self {
			year,
			make,
			model,
			vin: None,
			decoded_from_vin: false,
			body_style: None,
			engine_size: None,
		}
	}

	pub fn with_vin(mut self, vin: String) -> Self {
		self.vin = Some(vin);
		self
	}

	/// Validate the fields every sourcing run depends on
	///
	/// An invalid vehicle is a batch-fatal error: there is nothing valid to
	/// price against.
	pub fn validate(&self) -> Result<(), VehicleValidationError> {
		if !(1900..=2100).contains(&self.year) {
			return Err(VehicleValidationError::ImplausibleYear { year: self.year });
		}
		if self.make.trim().is_empty() {
			return Err(VehicleValidationError::MissingField {
				field: "make".to_string(),
			});
		}
		if self.model.trim().is_empty() {
			return Err(VehicleValidationError::MissingField {
				field: "model".to_string(),
			});
		}
		Ok(())
	}
}

/// Coarse part category derived from description/operation keywords
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PartCategory {
	Body,
	Paint,
	Mechanical,
	Electrical,
	Glass,
	Other,
}

impl PartCategory {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Body => "body",
			Self::Paint => "paint",
			Self::Mechanical => "mechanical",
			Self::Electrical => "electrical",
			Self::Glass => "glass",
			Self::Other => "other",
		}
	}
}

/// Sourcing tier of a part
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PartType {
	Oem,
	Aftermarket,
	Used,
	Recycled,
}

impl PartType {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Oem => "oem",
			Self::Aftermarket => "aftermarket",
			Self::Used => "used",
			Self::Recycled => "recycled",
		}
	}
}

/// Coarse price bucket used to bias vendor preference and business rules
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ValueTier {
	Economy,
	Standard,
	Premium,
}

impl ValueTier {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Economy => "economy",
			Self::Standard => "standard",
			Self::Premium => "premium",
		}
	}
}

/// A part record after classification/normalization
///
/// Derived from a [`RawPartLine`] plus [`VehicleContext`]. The normalized
/// part number is guaranteed non-empty and contains only `[A-Z0-9]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedPart {
	/// Uppercased alphanumeric-only part identity (source + OEM number)
	pub normalized_part_number: String,

	/// Source line number, kept so results can be reassociated
	pub line_number: u32,

	/// Original free-text description
	pub description: String,

	/// Derived category
	pub category: PartCategory,

	/// Derived sourcing tier
	pub classified_type: PartType,

	/// Derived price bucket
	pub value_tier: ValueTier,

	/// Estimate unit cost, coerced to 0.0 when absent or malformed
	pub original_price: f64,

	/// Quantity, coerced to 0.0 when absent or malformed
	pub quantity: f64,

	/// Vehicle the part fits
	pub vehicle: VehicleContext,

	/// When classification happened
	pub classified_at: DateTime<Utc>,
}

impl ClassifiedPart {
	/// Whether the original estimate carried no usable cost
	///
	/// Callers may flag such parts for manual review; the pipeline still
	/// processes them.
	pub fn needs_price_review(&self) -> bool {
		self.original_price == 0.0
	}
}
