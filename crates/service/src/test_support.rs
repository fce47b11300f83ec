//! Shared test fixtures for service unit tests

use async_trait::async_trait;
use chrono::Utc;
use partsource_types::{
	Adapter, AdapterResult, AdapterValidationError, ClassifiedPart, PartCategory, PartQuery,
	PartType, ValueTier, Vendor, VendorAdapter, VendorQuoteData, VendorRuntimeConfig,
	VendorStatus, VehicleContext,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Configurable in-process adapter for exercising the fan-out
#[derive(Debug, Clone)]
pub(crate) struct TestAdapter {
	adapter: Adapter,
	response_delay_ms: u64,
	should_fail: bool,
	data: VendorQuoteData,
	call_tracker: Arc<AtomicUsize>,
}

impl TestAdapter {
	pub fn with_config(
		id: &str,
		should_fail: bool,
		response_delay_ms: u64,
		data: VendorQuoteData,
	) -> Self {
		Self {
			adapter: Adapter::new(
				id.to_string(),
				format!("Test adapter: {}", id),
				format!("{} Adapter", id),
				"1.0.0".to_string(),
			),
			response_delay_ms,
			should_fail,
			data,
			call_tracker: Arc::new(AtomicUsize::new(0)),
		}
	}

	/// In-stock quote with no delay
	pub fn priced(id: &str, price: f64, lead_time_days: u32, reliability: f64) -> Self {
		Self::with_config(
			id,
			false,
			0,
			VendorQuoteData::available(price, lead_time_days).with_reliability(reliability),
		)
	}

	/// Adapter that errors on every call
	pub fn failing(id: &str) -> Self {
		Self::with_config(id, true, 0, VendorQuoteData::unavailable())
	}

	/// Adapter that reports the part out of stock
	pub fn unavailable(id: &str) -> Self {
		Self::with_config(id, false, 0, VendorQuoteData::unavailable())
	}

	/// Adapter that answers only after the given delay
	pub fn delayed(id: &str, response_delay_ms: u64, price: f64) -> Self {
		Self::with_config(
			id,
			false,
			response_delay_ms,
			VendorQuoteData::available(price, 2).with_reliability(0.9),
		)
	}

	pub fn call_count(&self) -> usize {
		self.call_tracker.load(Ordering::Relaxed)
	}
}

#[async_trait]
impl VendorAdapter for TestAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.adapter
	}

	async fn query(
		&self,
		_request: &PartQuery,
		_config: &VendorRuntimeConfig,
	) -> AdapterResult<VendorQuoteData> {
		self.call_tracker.fetch_add(1, Ordering::Relaxed);

		if self.response_delay_ms > 0 {
			tokio::time::sleep(Duration::from_millis(self.response_delay_ms)).await;
		}

		if self.should_fail {
			return Err(AdapterValidationError::InvalidConfiguration {
				reason: format!("Adapter {} configured to fail", self.adapter.adapter_id),
			}
			.into());
		}

		Ok(self.data.clone())
	}

	async fn health_check(&self, _config: &VendorRuntimeConfig) -> AdapterResult<bool> {
		Ok(!self.should_fail)
	}
}

/// Vendor pointing at the given adapter, already active
pub(crate) fn create_test_vendor(vendor_id: &str, adapter_id: &str) -> Vendor {
	let mut vendor = Vendor::new(
		vendor_id.to_string(),
		adapter_id.to_string(),
		"https://api.example.com/v1".to_string(),
		2000,
	);
	vendor.status = VendorStatus::Active;
	vendor.metadata.default_reliability = 0.7;
	vendor
}

/// Classified part fixture matching the bumper-cover scenario
pub(crate) fn create_test_part() -> ClassifiedPart {
	ClassifiedPart {
		normalized_part_number: "GM84044368".to_string(),
		line_number: 1,
		description: "Front Bumper Cover".to_string(),
		category: PartCategory::Body,
		classified_type: PartType::Oem,
		value_tier: ValueTier::Standard,
		original_price: 450.0,
		quantity: 1.0,
		vehicle: VehicleContext::new(2017, "Chevrolet".to_string(), "Malibu".to_string()),
		classified_at: Utc::now(),
	}
}
