//! Purchase-order line generation
//!
//! Pure policy math: markup and approval flagging. Persistence and
//! transmission of the generated line are external collaborators.

use chrono::Utc;
use partsource_config::PricingSettings;
use partsource_types::{ClassifiedPart, PoLineItem, SourcingDecision};

/// Generates priced, policy-checked purchase-order lines
#[derive(Debug, Clone)]
pub struct PoLineGenerator {
	policy: PricingSettings,
}

impl PoLineGenerator {
	/// Create a generator with the given pricing policy
	pub fn new(policy: PricingSettings) -> Self {
		Self { policy }
	}

	/// Generate a PO line for a recommended decision
	///
	/// Returns `None` when the decision carries no recommendation. Pure and
	/// side-effect-free.
	pub fn generate(&self, part: &ClassifiedPart, decision: &SourcingDecision) -> Option<PoLineItem> {
		if !decision.recommended {
			return None;
		}

		let vendor = decision.vendor.as_ref()?;
		let unit_price = vendor.quote.price?;

		let customer_price = round_cents(unit_price * (1.0 + self.policy.base_markup));
		let requires_approval = customer_price * part.quantity > self.policy.approval_threshold;

		Some(PoLineItem {
			part_description: part.description.clone(),
			quantity: part.quantity,
			unit_price,
			customer_price,
			markup: self.policy.base_markup,
			vendor_id: vendor.quote.vendor_id.clone(),
			requires_approval,
			auto_generated: true,
			created_at: Utc::now(),
		})
	}
}

/// Round a currency amount to cents
fn round_cents(amount: f64) -> f64 {
	(amount * 100.0).round() / 100.0
}
