//! Partsource Aggregator Library
//!
//! An automated parts sourcing engine for collision repair: classifies
//! normalized damage lines, queries configured parts vendors concurrently,
//! scores the answers, and emits priced purchase-order lines ready for
//! approval and transmission.

use partsource_service::{
	CircuitBreakerService, CircuitBreakerTrait, PartClassifier, SourcingService,
	VendorAggregatorService, VendorSelector, VinDecoder,
};

// Core domain types - the most commonly used types
pub use partsource_types::{
	chrono,
	// External dependencies for convenience
	serde_json,
	// Adapter boundary
	Adapter,
	AdapterError,
	CacheEntry,
	CacheKey,
	ClassifiedPart,
	PartCategory,
	PartFailure,
	PartQuery,
	PartSourcing,
	PartType,
	PoLineItem,
	// Primary domain entities
	RawPartLine,
	ScoredQuote,
	SourcingDecision,
	// Error types
	SourcingError,
	SourcingOptions,
	SourcingResult,
	SourcingStatistics,
	ValueTier,
	Vendor,
	VendorAdapter,
	VendorQuote,
	VendorQuoteData,
	VendorRuntimeConfig,
	VehicleContext,
};

// Service layer
pub use partsource_service::{
	PoLineGenerator, VinDecodeError, VinDetails,
	// Keep the full module for more advanced usage
};

// Storage layer
pub use partsource_storage::{MemoryStore, QuoteCache};

// Adapters
pub use partsource_adapters::{
	AdapterRegistry, LkqAdapter, OeConnectAdapter, PartsTraderAdapter,
};

// Config
pub use partsource_config::{load_config, LogFormat, Settings};

// Module aliases for advanced usage
pub mod types {
	pub use partsource_types::*;
}

pub mod storage {
	pub use partsource_storage::*;
}

pub mod config {
	pub use partsource_config::*;
}

pub mod adapters {
	pub use partsource_adapters::*;
}

pub mod service {
	pub use partsource_service::*;
}

pub mod mocks;

use std::sync::Arc;
use tracing::info;

// Re-export external dependencies for downstream callers
pub use async_trait;

/// Builder pattern for configuring the sourcing engine
pub struct SourcingBuilder {
	settings: Option<Settings>,
	quote_cache: Arc<dyn QuoteCache>,
	adapter_registry: Option<AdapterRegistry>,
	vendors: Vec<Vendor>,
	vin_decoder: Option<Arc<dyn VinDecoder>>,
}

impl Default for SourcingBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl SourcingBuilder {
	/// Create a builder with default in-memory quote cache
	pub fn new() -> Self {
		Self::with_storage(MemoryStore::new())
	}

	/// Create a builder with the provided quote cache backend
	pub fn with_storage<S>(storage: S) -> Self
	where
		S: QuoteCache + 'static,
	{
		Self {
			settings: None,
			quote_cache: Arc::new(storage),
			adapter_registry: None,
			vendors: Vec::new(),
			vin_decoder: None,
		}
	}

	/// Create a builder from configuration
	pub fn from_config(settings: Settings) -> Self {
		let mut builder = Self::new();
		builder.settings = Some(settings);
		builder
	}

	/// Set custom settings
	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Get the current settings
	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	/// Add a vendor to the engine
	pub fn with_vendor(mut self, vendor: Vendor) -> Self {
		self.vendors.push(vendor);
		self
	}

	/// Register a custom adapter (uses the adapter's own ID)
	/// Panics if adapter registration fails (this is intentional for startup-time configuration errors)
	pub fn with_adapter(mut self, adapter: Arc<dyn VendorAdapter>) -> Self {
		let mut registry = self
			.adapter_registry
			.unwrap_or_else(AdapterRegistry::with_defaults);
		registry.register(adapter).expect(
			"Failed to register adapter during startup - this is a fatal configuration error",
		);
		self.adapter_registry = Some(registry);
		self
	}

	/// Attach a VIN decoding collaborator
	pub fn with_vin_decoder(mut self, decoder: Arc<dyn VinDecoder>) -> Self {
		self.vin_decoder = Some(decoder);
		self
	}

	/// Wire the services and return a ready engine
	pub fn build(self) -> Result<SourcingEngine, SourcingError> {
		let settings = self.settings.unwrap_or_default();

		settings
			.validate()
			.map_err(|e| SourcingError::Configuration {
				reason: e.to_string(),
			})?;

		// Vendors from settings first, then vendors collected via the builder
		let mut vendors: Vec<Vendor> = settings
			.enabled_vendors()
			.into_values()
			.map(Vendor::from)
			.collect();
		vendors.extend(self.vendors);

		for vendor in &vendors {
			vendor.validate().map_err(|e| SourcingError::Configuration {
				reason: format!("Vendor '{}' validation failed: {}", vendor.vendor_id, e),
			})?;
		}

		info!("Initializing sourcing engine with {} vendor(s)", vendors.len());

		let adapter_registry = Arc::new(
			self.adapter_registry
				.unwrap_or_else(AdapterRegistry::with_defaults),
		);

		let circuit_breaker: Arc<dyn CircuitBreakerTrait> = Arc::new(CircuitBreakerService::new(
			settings.circuit_breaker.clone(),
		));

		let aggregator = Arc::new(VendorAggregatorService::new(
			vendors,
			Arc::clone(&adapter_registry),
			Arc::clone(&self.quote_cache),
			circuit_breaker,
			settings.timeouts.clone(),
			settings.cache.enabled,
		));

		aggregator
			.validate_vendors()
			.map_err(|e| SourcingError::Configuration {
				reason: e.to_string(),
			})?;

		let mut service = SourcingService::new(
			Arc::clone(&aggregator),
			PartClassifier::new(settings.classification.clone()),
			VendorSelector::new(settings.scoring.clone()),
			settings.pricing.clone(),
			settings.batch.clone(),
			settings.timeouts.clone(),
		);
		if let Some(decoder) = self.vin_decoder {
			service = service.with_vin_decoder(decoder);
		}

		partsource_config::log_startup_complete(aggregator.vendor_count(), adapter_registry.len());

		Ok(SourcingEngine {
			service,
			settings,
			quote_cache: self.quote_cache,
		})
	}
}

/// A configured, ready-to-use sourcing engine
pub struct SourcingEngine {
	service: SourcingService,
	settings: Settings,
	quote_cache: Arc<dyn QuoteCache>,
}

impl SourcingEngine {
	/// Run automated parts sourcing over a batch of damage lines
	///
	/// The single invocation surface: classify, source, select, and price
	/// every line against the vehicle, with per-part failure isolation.
	pub async fn process_automated_parts_sourcing(
		&self,
		damage_lines: Vec<RawPartLine>,
		vehicle_info: VehicleContext,
		options: Option<SourcingOptions>,
	) -> Result<SourcingResult, SourcingError> {
		self.service
			.process(damage_lines, vehicle_info, options.unwrap_or_default())
			.await
	}

	/// Engine settings in effect
	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	/// The quote cache backing this engine
	pub fn quote_cache(&self) -> &Arc<dyn QuoteCache> {
		&self.quote_cache
	}
}

/// Initialize tracing with configuration-based settings
///
/// Call once at startup, before building the engine. Honors `RUST_LOG` when
/// set, falling back to the configured level.
pub fn init_tracing(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
	// Load .env file if it exists
	dotenvy::dotenv().ok();

	let log_level = &settings.logging.level;
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

	match settings.logging.format {
		LogFormat::Json => {
			let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);

			if settings.logging.structured {
				subscriber.with_target(true).with_thread_ids(true).init();
			} else {
				subscriber.init();
			}
		},
		LogFormat::Pretty => {
			let subscriber = tracing_subscriber::fmt()
				.pretty()
				.with_env_filter(env_filter);

			if settings.logging.structured {
				subscriber.with_target(true).with_thread_ids(true).init();
			} else {
				subscriber.init();
			}
		},
		LogFormat::Compact => {
			let subscriber = tracing_subscriber::fmt()
				.compact()
				.with_env_filter(env_filter);

			if settings.logging.structured {
				subscriber.with_target(true).with_thread_ids(true).init();
			} else {
				subscriber.init();
			}
		},
	}

	info!(
		"Logging configuration applied: level={}, format={:?}, structured={}",
		settings.logging.level, settings.logging.format, settings.logging.structured
	);

	Ok(())
}
