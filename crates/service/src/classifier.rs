//! Part classification and normalization
//!
//! Turns raw damage lines into classified parts the rest of the pipeline can
//! price. Classification is a total function: malformed numerics coerce to
//! safe defaults and unknown descriptions fall back to the Other category,
//! so a bad estimate line never aborts a batch.

use chrono::Utc;
use partsource_config::ClassificationSettings;
use partsource_types::{
	ClassifiedPart, PartCategory, PartType, RawPartLine, ValueTier, VehicleContext,
};
use tracing::debug;

/// Longest normalized identity we derive from a description fallback
const DESCRIPTION_FALLBACK_LEN: usize = 24;

/// Ordered keyword table for category derivation; first match wins
///
/// Glass and paint come before body so "door glass" and "paint door shell"
/// classify by the more specific trade.
const CATEGORY_KEYWORDS: &[(PartCategory, &[&str])] = &[
	(
		PartCategory::Glass,
		&["windshield", "glass", "window", "backlite"],
	),
	(
		PartCategory::Paint,
		&["paint", "refinish", "clearcoat", "clear coat", "primer", "blend"],
	),
	(
		PartCategory::Electrical,
		&[
			"sensor", "camera", "radar", "harness", "wiring", "lamp", "light", "battery",
			"module", "switch",
		],
	),
	(
		PartCategory::Mechanical,
		&[
			"radiator", "condenser", "compressor", "engine", "transmission", "suspension",
			"strut", "brake", "pump", "axle", "exhaust", "muffler",
		],
	),
	(
		PartCategory::Body,
		&[
			"bumper", "fender", "door", "hood", "panel", "grille", "mirror", "molding",
			"trunk", "liftgate", "absorber", "bracket", "cover", "reinforcement", "emblem",
		],
	),
];

/// Classifies and normalizes raw damage lines
#[derive(Debug, Clone)]
pub struct PartClassifier {
	settings: ClassificationSettings,
}

impl PartClassifier {
	/// Create a classifier with the given tier cutoffs
	pub fn new(settings: ClassificationSettings) -> Self {
		Self { settings }
	}

	/// Classify one raw line against its vehicle
	///
	/// Total function: always returns a part, never errors.
	pub fn classify(&self, raw: &RawPartLine, vehicle: &VehicleContext) -> ClassifiedPart {
		let original_price = coerce_numeric(raw.unit_cost);
		let quantity = coerce_numeric(raw.quantity);

		let haystack = format!(
			"{} {}",
			raw.description.to_lowercase(),
			raw.operation_type.as_deref().unwrap_or("").to_lowercase()
		);

		let part = ClassifiedPart {
			normalized_part_number: normalize_part_number(raw),
			line_number: raw.line_number,
			description: raw.description.clone(),
			category: derive_category(&haystack),
			classified_type: derive_type(raw, &haystack),
			value_tier: self.derive_tier(original_price),
			original_price,
			quantity,
			vehicle: vehicle.clone(),
			classified_at: Utc::now(),
		};

		debug!(
			"Classified line {} as {} ({}/{}/{})",
			part.line_number,
			part.normalized_part_number,
			part.category.as_str(),
			part.classified_type.as_str(),
			part.value_tier.as_str()
		);

		part
	}

	fn derive_tier(&self, unit_cost: f64) -> ValueTier {
		if unit_cost <= self.settings.economy_max {
			ValueTier::Economy
		} else if unit_cost <= self.settings.standard_max {
			ValueTier::Standard
		} else {
			ValueTier::Premium
		}
	}
}

/// Coerce a loose numeric field to a safe non-negative value
fn coerce_numeric(value: Option<f64>) -> f64 {
	match value {
		Some(v) if v.is_finite() && v > 0.0 => v,
		_ => 0.0,
	}
}

/// Strip a string down to uppercase alphanumerics
///
/// Control characters, markup, script fragments, and separators all drop
/// out; what remains is safe to embed in identifiers and cache keys.
fn sanitize(input: &str) -> String {
	input
		.chars()
		.filter(|c| c.is_ascii_alphanumeric())
		.map(|c| c.to_ascii_uppercase())
		.collect()
}

/// Build the normalized part identity: source number + OEM number
///
/// Never empty. Falls back to the sanitized description, then to the line
/// number, so even a fully-mangled line keeps a usable identity.
fn normalize_part_number(raw: &RawPartLine) -> String {
	let mut normalized = sanitize(&raw.part_number);
	if let Some(oem) = &raw.oem_part_number {
		normalized.push_str(&sanitize(oem));
	}

	if normalized.is_empty() {
		normalized = sanitize(&raw.description);
		normalized.truncate(DESCRIPTION_FALLBACK_LEN);
	}

	if normalized.is_empty() {
		normalized = format!("LINE{}", raw.line_number);
	}

	normalized
}

/// Ordered keyword match over description + operation type
fn derive_category(haystack: &str) -> PartCategory {
	for (category, keywords) in CATEGORY_KEYWORDS {
		if keywords.iter().any(|kw| haystack.contains(kw)) {
			return *category;
		}
	}
	PartCategory::Other
}

/// Derive the sourcing tier from source flags, defaulting to aftermarket
fn derive_type(raw: &RawPartLine, haystack: &str) -> PartType {
	if haystack.contains("recycled") || haystack.contains("salvage") {
		return PartType::Recycled;
	}
	if haystack.contains("used") {
		return PartType::Used;
	}
	if raw
		.oem_part_number
		.as_deref()
		.is_some_and(|oem| !oem.trim().is_empty())
		|| haystack.contains("oem")
	{
		return PartType::Oem;
	}
	PartType::Aftermarket
}
