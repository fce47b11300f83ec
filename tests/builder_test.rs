//! Engine builder wiring and validation

mod mocks;

use mocks::{bumper_line, test_vehicle};
use partsource_aggregator::mocks::{create_mock_vendor, MockVendorAdapter};
use partsource_aggregator::{Settings, SourcingBuilder, SourcingError, Vendor};
use std::sync::Arc;

#[tokio::test]
async fn test_default_build_succeeds_with_no_vendors() {
	let engine = SourcingBuilder::new().build().unwrap();

	// No vendors configured: batches run but every part is unsourced
	let result = engine
		.process_automated_parts_sourcing(vec![bumper_line()], test_vehicle(), None)
		.await
		.unwrap();

	assert!(result.success);
	assert!(result.results[0].quotes.is_empty());
	assert!(!result.results[0].decision.recommended);
}

#[test]
fn test_invalid_settings_are_rejected() {
	let mut settings = Settings::default();
	settings.scoring.price_weight = 0.9;

	let result = SourcingBuilder::new().with_settings(settings).build();

	assert!(matches!(
		result,
		Err(SourcingError::Configuration { .. })
	));
}

#[test]
fn test_vendor_with_unknown_adapter_is_rejected() {
	let result = SourcingBuilder::new()
		.with_vendor(create_mock_vendor("orphan", "nonexistent-v1"))
		.build();

	let Err(SourcingError::Configuration { reason }) = result else {
		panic!("expected configuration error");
	};
	assert!(reason.contains("orphan"));
	assert!(reason.contains("nonexistent-v1"));
}

#[test]
fn test_invalid_vendor_endpoint_is_rejected() {
	let vendor = Vendor::new(
		"bad".to_string(),
		"lkq-v1".to_string(),
		"not a url".to_string(),
		2000,
	);

	let result = SourcingBuilder::new().with_vendor(vendor).build();
	assert!(matches!(
		result,
		Err(SourcingError::Configuration { .. })
	));
}

#[test]
fn test_vendors_from_settings_are_wired() {
	let mut settings = Settings::default();
	settings.vendors.insert(
		"lkq-midwest".to_string(),
		partsource_aggregator::config::VendorConfig {
			vendor_id: "lkq-midwest".to_string(),
			adapter_id: "lkq-v1".to_string(),
			endpoint: "https://api.lkq.example.com/v1".to_string(),
			timeout_ms: 2000,
			enabled: true,
			max_retries: 0,
			reliability: 0.9,
			headers: None,
			name: None,
			description: None,
		},
	);

	// Built-in registry carries lkq-v1, so the settings vendor resolves
	let engine = SourcingBuilder::new().with_settings(settings).build();
	assert!(engine.is_ok());
}

#[tokio::test]
async fn test_custom_adapter_registration() {
	let adapter = MockVendorAdapter::priced("custom-v1", 300.0, 1, 0.9);

	let engine = SourcingBuilder::new()
		.with_adapter(Arc::new(adapter))
		.with_vendor(create_mock_vendor("custom", "custom-v1"))
		.build()
		.unwrap();

	let result = engine
		.process_automated_parts_sourcing(vec![bumper_line()], test_vehicle(), None)
		.await
		.unwrap();

	assert_eq!(
		result.results[0]
			.decision
			.vendor
			.as_ref()
			.unwrap()
			.quote
			.vendor_id,
		"custom"
	);
}

#[test]
fn test_engine_exposes_effective_settings() {
	let mut settings = Settings::default();
	settings.pricing.base_markup = 0.35;

	let engine = SourcingBuilder::new()
		.with_settings(settings)
		.build()
		.unwrap();

	assert_eq!(engine.settings().pricing.base_markup, 0.35);
	assert_eq!(engine.settings().timeouts.per_vendor_ms, 2000);
}
