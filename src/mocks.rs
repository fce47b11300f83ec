//! Mock vendor adapters for examples and testing
//!
//! Simple, working mock adapters usable in examples and integration tests
//! without network access: configurable delays for timeout testing, failure
//! simulation for circuit breaker testing, and call tracking.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use partsource_types::{
	Adapter, AdapterResult, AdapterValidationError, PartQuery, Vendor, VendorAdapter,
	VendorQuoteData, VendorRuntimeConfig, VendorStatus,
};

/// Mock vendor adapter with configurable behavior
///
/// This adapter provides:
/// - Call tracking for testing
/// - Configurable response delays for timeout testing
/// - Failure simulation for circuit breaker testing
/// - Fixed quote data for deterministic selection tests
#[derive(Debug, Clone)]
pub struct MockVendorAdapter {
	pub adapter: Adapter,
	call_tracker: Arc<AtomicUsize>,
	pub should_fail: bool,
	pub response_delay_ms: u64,
	pub data: VendorQuoteData,
}

impl MockVendorAdapter {
	/// Create a mock adapter with custom configuration
	pub fn with_config(
		id: String,
		should_fail: bool,
		response_delay_ms: u64,
		data: VendorQuoteData,
	) -> Self {
		Self {
			adapter: Adapter {
				adapter_id: id.clone(),
				name: format!("{} Adapter", id),
				description: Some(format!("Mock vendor adapter: {}", id)),
				version: "1.0.0".to_string(),
			},
			call_tracker: Arc::new(AtomicUsize::new(0)),
			should_fail,
			response_delay_ms,
			data,
		}
	}

	/// Create an in-stock adapter with the given quote terms
	pub fn priced(id: &str, price: f64, lead_time_days: u32, reliability: f64) -> Self {
		Self::with_config(
			id.to_string(),
			false,
			0,
			VendorQuoteData::available(price, lead_time_days).with_reliability(reliability),
		)
	}

	/// Create a fast-responding adapter (100ms delay)
	pub fn fast(id: &str) -> Self {
		Self::with_config(
			format!("fast-{}", id),
			false,
			100,
			VendorQuoteData::available(420.0, 2).with_reliability(0.9),
		)
	}

	/// Create a slow-responding adapter (1500ms delay)
	pub fn slow(id: &str) -> Self {
		Self::with_config(
			format!("slow-{}", id),
			false,
			1500,
			VendorQuoteData::available(400.0, 3).with_reliability(0.85),
		)
	}

	/// Create a timeout adapter (5000ms delay)
	pub fn timeout(id: &str) -> Self {
		Self::with_config(
			format!("timeout-{}", id),
			false,
			5000,
			VendorQuoteData::available(380.0, 1).with_reliability(0.9),
		)
	}

	/// Create a failing adapter
	pub fn failing(id: &str) -> Self {
		Self::with_config(
			format!("failing-{}", id),
			true,
			0,
			VendorQuoteData::unavailable(),
		)
	}

	/// Create an adapter that reports parts out of stock
	pub fn unavailable(id: &str) -> Self {
		Self::with_config(
			format!("unavailable-{}", id),
			false,
			0,
			VendorQuoteData::unavailable(),
		)
	}

	/// Get the number of times this adapter has been called
	pub fn call_count(&self) -> usize {
		self.call_tracker.load(Ordering::Relaxed)
	}

	/// Reset the call counter
	pub fn reset_calls(&self) {
		self.call_tracker.store(0, Ordering::Relaxed);
	}
}

#[async_trait]
impl VendorAdapter for MockVendorAdapter {
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
		if self.response_delay_ms > 0 {
			tokio::time::sleep(Duration::from_millis(self.response_delay_ms / 10)).await;
		}
		Ok(!self.should_fail)
	}
}

/// Create an active vendor pointing at the given adapter
pub fn create_mock_vendor(vendor_id: &str, adapter_id: &str) -> Vendor {
	let mut vendor = Vendor::new(
		vendor_id.to_string(),
		adapter_id.to_string(),
		"https://mock.vendor.example.com/v1".to_string(),
		2000,
	);
	vendor.status = VendorStatus::Active;
	vendor.metadata.name = Some(vendor_id.to_string());
	vendor.metadata.default_reliability = 0.8;
	vendor
}
