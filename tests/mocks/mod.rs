//! Shared fixtures for the integration suite

#![allow(dead_code)]

use async_trait::async_trait;
use partsource_aggregator::mocks::{create_mock_vendor, MockVendorAdapter};
use partsource_aggregator::{
	Adapter, PartQuery, RawPartLine, SourcingBuilder, SourcingEngine, VehicleContext,
	VendorAdapter, VendorQuoteData, VendorRuntimeConfig,
};
use partsource_aggregator::types::AdapterResult;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// The 2017 Malibu used across the suite
pub fn test_vehicle() -> VehicleContext {
	VehicleContext::new(2017, "Chevrolet".to_string(), "Malibu".to_string())
}

/// The bumper-cover line from the reference scenario
pub fn bumper_line() -> RawPartLine {
	RawPartLine::new(
		1,
		"GM-84044368".to_string(),
		"Front Bumper Cover".to_string(),
	)
	.with_quantity(1.0)
	.with_unit_cost(450.0)
}

/// Engine with two priced mock vendors (the reference selection scenario)
pub fn two_vendor_engine() -> (SourcingEngine, MockVendorAdapter, MockVendorAdapter) {
	let cheap = MockVendorAdapter::priced("cheap-v1", 420.0, 2, 0.9);
	let fast = MockVendorAdapter::priced("fast-v1", 480.0, 1, 0.95);

	let engine = SourcingBuilder::new()
		.with_adapter(Arc::new(cheap.clone()))
		.with_adapter(Arc::new(fast.clone()))
		.with_vendor(create_mock_vendor("cheap", "cheap-v1"))
		.with_vendor(create_mock_vendor("fast", "fast-v1"))
		.build()
		.expect("engine should build");

	(engine, cheap, fast)
}

/// Adapter that tracks how many queries run concurrently
///
/// Used to prove the orchestrator's worker pool actually bounds fan-out
/// under large batches.
#[derive(Debug, Clone)]
pub struct ConcurrencyProbeAdapter {
	adapter: Adapter,
	in_flight: Arc<AtomicUsize>,
	max_observed: Arc<AtomicUsize>,
	delay_ms: u64,
}

impl ConcurrencyProbeAdapter {
	pub fn new(id: &str, delay_ms: u64) -> Self {
		Self {
			adapter: Adapter::new(
				id.to_string(),
				"Concurrency probe".to_string(),
				format!("{} Adapter", id),
				"1.0.0".to_string(),
			),
			in_flight: Arc::new(AtomicUsize::new(0)),
			max_observed: Arc::new(AtomicUsize::new(0)),
			delay_ms,
		}
	}

	/// Highest number of simultaneous queries seen so far
	pub fn max_observed(&self) -> usize {
		self.max_observed.load(Ordering::Relaxed)
	}
}

#[async_trait]
impl VendorAdapter for ConcurrencyProbeAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.adapter
	}

	async fn query(
		&self,
		_request: &PartQuery,
		_config: &VendorRuntimeConfig,
	) -> AdapterResult<VendorQuoteData> {
		let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
		self.max_observed.fetch_max(current, Ordering::SeqCst);

		tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

		self.in_flight.fetch_sub(1, Ordering::SeqCst);
		Ok(VendorQuoteData::available(99.0, 2).with_reliability(0.9))
	}

	async fn health_check(&self, _config: &VendorRuntimeConfig) -> AdapterResult<bool> {
		Ok(true)
	}
}
