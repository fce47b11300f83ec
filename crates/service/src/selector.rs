//! Vendor selection and scoring
//!
//! Scores the successful, in-stock quotes for a part and returns a ranked
//! recommendation. The ranking is deterministic: identical quote sets always
//! produce identical output.

use partsource_config::ScoringSettings;
use partsource_types::{ClassifiedPart, ScoredQuote, SourcingDecision, VendorQuote};
use std::cmp::Ordering;
use tracing::debug;

/// Neutral price factor used when the estimate carried no usable cost
const NEUTRAL_PRICE_FACTOR: f64 = 0.5;

/// Scores vendor quotes and picks the best source per part
#[derive(Debug, Clone)]
pub struct VendorSelector {
	weights: ScoringSettings,
}

impl VendorSelector {
	/// Create a selector with the given weights
	pub fn new(weights: ScoringSettings) -> Self {
		Self { weights }
	}

	/// Rank the candidates among `quotes` for `part`
	///
	/// Filters to successful, available, priced quotes. When none remain the
	/// part is unsourced: `recommended` is false and alternatives are empty.
	pub fn select(&self, quotes: &[VendorQuote], part: &ClassifiedPart) -> SourcingDecision {
		let mut scored: Vec<ScoredQuote> = quotes
			.iter()
			.filter(|q| q.is_candidate())
			.map(|q| ScoredQuote {
				score: self.score(q, part.original_price),
				quote: q.clone(),
			})
			.collect();

		if scored.is_empty() {
			debug!(
				"No viable vendor for part {} ({} quotes, none candidates)",
				part.normalized_part_number,
				quotes.len()
			);
			return SourcingDecision::unsourced();
		}

		scored.sort_by(compare_scored);

		let vendor = scored.remove(0);
		debug!(
			"Recommending vendor {} for part {} (score {:.4}, {} alternatives)",
			vendor.quote.vendor_id,
			part.normalized_part_number,
			vendor.score,
			scored.len()
		);

		SourcingDecision::recommended(vendor, scored)
	}

	/// Weighted composite score for one candidate quote
	fn score(&self, quote: &VendorQuote, original_price: f64) -> f64 {
		// Candidates always carry a price
		let price = quote.price.unwrap_or(0.0);

		self.weights.price_weight * price_factor(price, original_price)
			+ self.weights.lead_time_weight * lead_time_factor(quote.lead_time_days)
			+ self.weights.reliability_weight * quote.reliability.clamp(0.0, 1.0)
	}
}

/// Price attractiveness relative to the estimate price
///
/// Monotonically decreasing in price: 1.0 at half the estimate or less, 0.5
/// at the estimate price, 0.0 at 1.5x and beyond. With no estimate price the
/// factor is neutral so the other axes decide.
fn price_factor(price: f64, original_price: f64) -> f64 {
	if original_price <= 0.0 {
		return NEUTRAL_PRICE_FACTOR;
	}
	(1.5 - price / original_price).clamp(0.0, 1.0)
}

/// Lead time attractiveness: 1.0 same-day, decaying with each day out
///
/// A quote with no lead time scores zero on this axis rather than being
/// excluded.
fn lead_time_factor(lead_time_days: Option<u32>) -> f64 {
	match lead_time_days {
		Some(days) => 1.0 / (1.0 + days as f64),
		None => 0.0,
	}
}

/// Total order over scored quotes: score desc, reliability desc, price asc,
/// vendor ID asc
fn compare_scored(a: &ScoredQuote, b: &ScoredQuote) -> Ordering {
	b.score
		.partial_cmp(&a.score)
		.unwrap_or(Ordering::Equal)
		.then_with(|| {
			b.quote
				.reliability
				.partial_cmp(&a.quote.reliability)
				.unwrap_or(Ordering::Equal)
		})
		.then_with(|| {
			a.quote
				.price
				.partial_cmp(&b.quote.price)
				.unwrap_or(Ordering::Equal)
		})
		.then_with(|| a.quote.vendor_id.cmp(&b.quote.vendor_id))
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::Utc;
	use partsource_types::{PartCategory, PartType, ValueTier, VehicleContext};

	fn create_test_part(original_price: f64) -> ClassifiedPart {
		ClassifiedPart {
			normalized_part_number: "GM84044368".to_string(),
			line_number: 1,
			description: "Front Bumper Cover".to_string(),
			category: PartCategory::Body,
			classified_type: PartType::Oem,
			value_tier: ValueTier::Standard,
			original_price,
			quantity: 1.0,
			vehicle: VehicleContext::new(2017, "Chevrolet".to_string(), "Malibu".to_string()),
			classified_at: Utc::now(),
		}
	}

	fn quote(vendor: &str, price: f64, lead: u32, reliability: f64) -> VendorQuote {
		VendorQuote::success(
			vendor.to_string(),
			"GM84044368".to_string(),
			true,
			Some(price),
			Some(lead),
			reliability,
		)
	}

	fn selector() -> VendorSelector {
		VendorSelector::new(ScoringSettings {
			price_weight: 0.4,
			lead_time_weight: 0.3,
			reliability_weight: 0.3,
		})
	}

	#[test]
	fn test_no_candidates_yields_unsourced() {
		let part = create_test_part(450.0);
		let quotes = vec![
			VendorQuote::failure("a".to_string(), "GM84044368".to_string(), "boom".to_string()),
			VendorQuote::timeout("b".to_string(), "GM84044368".to_string()),
		];

		let decision = selector().select(&quotes, &part);

		assert!(!decision.recommended);
		assert!(decision.vendor.is_none());
		assert!(decision.alternatives.is_empty());
	}

	#[test]
	fn test_failed_quotes_are_excluded_from_alternatives() {
		let part = create_test_part(450.0);
		let quotes = vec![
			VendorQuote::failure("a".to_string(), "GM84044368".to_string(), "down".to_string()),
			quote("b", 400.0, 2, 0.9),
		];

		let decision = selector().select(&quotes, &part);

		assert!(decision.recommended);
		assert_eq!(decision.vendor.as_ref().unwrap().quote.vendor_id, "b");
		assert!(decision.alternatives.is_empty());
	}

	#[test]
	fn test_composite_score_beats_lowest_price() {
		// The spec's end-to-end pair: cheaper/slower/less-reliable vs
		// pricier/faster/more-reliable. The composite winner is the latter.
		let part = create_test_part(450.0);
		let quotes = vec![
			quote("cheap-slow", 420.0, 2, 0.9),
			quote("fast-reliable", 480.0, 1, 0.95),
		];

		let decision = selector().select(&quotes, &part);

		assert!(decision.recommended);
		assert_eq!(
			decision.vendor.as_ref().unwrap().quote.vendor_id,
			"fast-reliable"
		);
		assert_eq!(decision.alternatives.len(), 1);
		assert_eq!(decision.alternatives[0].quote.vendor_id, "cheap-slow");
	}

	#[test]
	fn test_alternatives_sorted_descending_by_score() {
		let part = create_test_part(450.0);
		let quotes = vec![
			quote("worst", 650.0, 9, 0.5),
			quote("best", 400.0, 1, 0.95),
			quote("middle", 450.0, 3, 0.8),
		];

		let decision = selector().select(&quotes, &part);

		assert_eq!(decision.vendor.as_ref().unwrap().quote.vendor_id, "best");
		let alternatives: Vec<&str> = decision
			.alternatives
			.iter()
			.map(|s| s.quote.vendor_id.as_str())
			.collect();
		assert_eq!(alternatives, vec!["middle", "worst"]);
		assert!(decision.alternatives[0].score >= decision.alternatives[1].score);
	}

	#[test]
	fn test_tie_breaks_on_reliability_then_price() {
		let part = create_test_part(0.0);
		// Neutral price factor and equal lead times make scores differ only
		// by reliability
		let quotes = vec![quote("a", 400.0, 2, 0.8), quote("b", 400.0, 2, 0.9)];
		let decision = selector().select(&quotes, &part);
		assert_eq!(decision.vendor.as_ref().unwrap().quote.vendor_id, "b");

		// Fully tied on score and reliability: cheaper wins
		let quotes = vec![quote("x", 410.0, 2, 0.9), quote("y", 400.0, 2, 0.9)];
		let decision = selector().select(&quotes, &part);
		assert_eq!(decision.vendor.as_ref().unwrap().quote.vendor_id, "y");
	}

	#[test]
	fn test_ranking_is_deterministic() {
		let part = create_test_part(450.0);
		let quotes = vec![
			quote("a", 420.0, 2, 0.9),
			quote("b", 480.0, 1, 0.95),
			quote("c", 390.0, 5, 0.7),
		];

		let first = selector().select(&quotes, &part);
		let second = selector().select(&quotes, &part);

		assert_eq!(first, second);
	}

	#[test]
	fn test_price_factor_shape() {
		assert_eq!(price_factor(225.0, 450.0), 1.0);
		assert_eq!(price_factor(450.0, 450.0), 0.5);
		assert_eq!(price_factor(675.0, 450.0), 0.0);
		assert_eq!(price_factor(900.0, 450.0), 0.0);
		// Unknown estimate price is neutral
		assert_eq!(price_factor(400.0, 0.0), NEUTRAL_PRICE_FACTOR);

		// Monotonically decreasing
		assert!(price_factor(300.0, 450.0) > price_factor(400.0, 450.0));
	}

	#[test]
	fn test_lead_time_factor_shape() {
		assert_eq!(lead_time_factor(Some(0)), 1.0);
		assert_eq!(lead_time_factor(Some(1)), 0.5);
		assert!(lead_time_factor(Some(1)) > lead_time_factor(Some(2)));
		assert_eq!(lead_time_factor(None), 0.0);
	}
}
