//! Concurrent vendor quote aggregation
//!
//! For each part, queries every configured vendor concurrently under a
//! per-vendor deadline. Failures and timeouts degrade to failure quotes; the
//! fan-out itself never errors. Successful quote sets are written to the
//! quote cache, and a cache hit short-circuits the fan-out entirely.

use crate::circuit_breaker::CircuitBreakerTrait;
use futures::future::join_all;
use partsource_adapters::AdapterRegistry;
use partsource_config::TimeoutSettings;
use partsource_types::{
	CacheKey, ClassifiedPart, PartQuery, QuoteCache, Vendor, VendorError, VendorQuote,
	VendorRuntimeConfig,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

/// Service aggregating quotes from multiple vendors
pub struct VendorAggregatorService {
	vendors: Vec<Vendor>,
	adapter_registry: Arc<AdapterRegistry>,
	quote_cache: Arc<dyn QuoteCache>,
	circuit_breaker: Arc<dyn CircuitBreakerTrait>,
	timeouts: TimeoutSettings,
	cache_enabled: bool,
}

impl VendorAggregatorService {
	/// Create a new aggregator service over the configured vendors
	pub fn new(
		vendors: Vec<Vendor>,
		adapter_registry: Arc<AdapterRegistry>,
		quote_cache: Arc<dyn QuoteCache>,
		circuit_breaker: Arc<dyn CircuitBreakerTrait>,
		timeouts: TimeoutSettings,
		cache_enabled: bool,
	) -> Self {
		Self {
			vendors,
			adapter_registry,
			quote_cache,
			circuit_breaker,
			timeouts,
			cache_enabled,
		}
	}

	/// Validate that all vendors have matching adapters
	pub fn validate_vendors(&self) -> Result<(), VendorError> {
		for vendor in &self.vendors {
			if self.adapter_registry.get(&vendor.adapter_id).is_none() {
				return Err(VendorError::UnknownAdapter {
					vendor_id: vendor.vendor_id.clone(),
					adapter_id: vendor.adapter_id.clone(),
				});
			}
		}
		Ok(())
	}

	/// Number of configured vendors
	pub fn vendor_count(&self) -> usize {
		self.vendors.len()
	}

	/// Gather quotes for a part, consulting the cache first
	///
	/// Returns the quote set and whether it was served from the cache. A hit
	/// issues zero vendor calls.
	pub async fn source_quotes(
		&self,
		part: &ClassifiedPart,
		per_vendor_timeout_ms: u64,
	) -> (Vec<VendorQuote>, bool) {
		let key = CacheKey::for_part(part);

		if self.cache_enabled {
			match self.quote_cache.get(&key).await {
				Ok(Some(entry)) => {
					debug!(
						"Cache hit for part {} ({} quotes)",
						part.normalized_part_number,
						entry.quotes.len()
					);
					return (entry.quotes, true);
				},
				Ok(None) => {},
				Err(e) => {
					warn!(
						"Quote cache lookup failed for part {}: {}",
						part.normalized_part_number, e
					);
				},
			}
		}

		let quotes = self.fan_out(part, per_vendor_timeout_ms).await;

		if self.cache_enabled {
			let successful: Vec<VendorQuote> =
				quotes.iter().filter(|q| q.success).cloned().collect();
			if !successful.is_empty() {
				if let Err(e) = self.quote_cache.put(key, successful).await {
					warn!(
						"Quote cache write failed for part {}: {}",
						part.normalized_part_number, e
					);
				}
			}
		}

		(quotes, false)
	}

	/// Query all configured vendors concurrently
	///
	/// Every vendor yields exactly one quote: success, failure, or timeout.
	/// Total wall-clock is bounded by the slowest vendor under its own
	/// deadline, never by the sum of latencies.
	pub async fn fan_out(
		&self,
		part: &ClassifiedPart,
		per_vendor_timeout_ms: u64,
	) -> Vec<VendorQuote> {
		info!(
			"Fanning out part {} to {} vendors",
			part.normalized_part_number,
			self.vendors.len()
		);

		let query = PartQuery::from(part);

		let tasks = self.vendors.iter().map(|vendor| {
			let vendor = vendor.clone();
			let query = query.clone();
			let part_number = part.normalized_part_number.clone();
			let adapter_registry = Arc::clone(&self.adapter_registry);
			let circuit_breaker = Arc::clone(&self.circuit_breaker);

			tokio::spawn(async move {
				query_one_vendor(
					vendor,
					query,
					part_number,
					adapter_registry,
					circuit_breaker,
					per_vendor_timeout_ms,
				)
				.await
			})
		});

		// The global timeout is a safety net over the whole fan-out; the
		// per-vendor deadline inside each task is what normally binds
		let aggregation = join_all(tasks);
		let global_timeout = Duration::from_millis(self.timeouts.global_ms);

		let quotes: Vec<VendorQuote> = match timeout(global_timeout, aggregation).await {
			Ok(results) => results
				.into_iter()
				.zip(self.vendors.iter())
				.map(|(result, vendor)| match result {
					Ok(quote) => quote,
					Err(e) => {
						warn!("Vendor {} query task panicked: {}", vendor.vendor_id, e);
						VendorQuote::failure(
							vendor.vendor_id.clone(),
							part.normalized_part_number.clone(),
							format!("Vendor query panicked: {}", e),
						)
					},
				})
				.collect(),
			Err(_) => {
				warn!(
					"Global fan-out timeout reached after {}ms",
					self.timeouts.global_ms
				);
				self.vendors
					.iter()
					.map(|vendor| {
						VendorQuote::timeout(
							vendor.vendor_id.clone(),
							part.normalized_part_number.clone(),
						)
					})
					.collect()
			},
		};

		let successful = quotes.iter().filter(|q| q.success).count();
		info!(
			"Fan-out for part {} completed: {}/{} vendors answered",
			part.normalized_part_number,
			successful,
			quotes.len()
		);

		quotes
	}
}

/// Issue one vendor query under the breaker and the per-vendor deadline
async fn query_one_vendor(
	vendor: Vendor,
	query: PartQuery,
	part_number: String,
	adapter_registry: Arc<AdapterRegistry>,
	circuit_breaker: Arc<dyn CircuitBreakerTrait>,
	per_vendor_timeout_ms: u64,
) -> VendorQuote {
	let vendor_id = vendor.vendor_id.clone();

	if !vendor.is_available() {
		return VendorQuote::failure(vendor_id, part_number, "Vendor inactive".to_string());
	}

	if !circuit_breaker.should_allow_request(&vendor_id).await {
		debug!("Circuit open for vendor {}, skipping query", vendor_id);
		return VendorQuote::failure(vendor_id, part_number, "Vendor circuit open".to_string());
	}

	let adapter = match adapter_registry.get(&vendor.adapter_id) {
		Some(adapter) => adapter,
		None => {
			warn!(
				"No adapter found for vendor {} (adapter_id: {})",
				vendor_id, vendor.adapter_id
			);
			return VendorQuote::failure(
				vendor_id,
				part_number,
				format!("No adapter registered for '{}'", vendor.adapter_id),
			);
		},
	};

	let config = VendorRuntimeConfig::from(&vendor);
	let deadline = Duration::from_millis(per_vendor_timeout_ms);
	let started = Instant::now();

	match timeout(deadline, adapter.query(&query, &config)).await {
		Ok(Ok(data)) => {
			let elapsed = started.elapsed().as_millis() as u64;
			circuit_breaker.record_request_result(&vendor_id, true).await;
			debug!(
				"Vendor {} answered for part {} in {}ms",
				vendor_id, part_number, elapsed
			);

			let reliability = data
				.reliability
				.unwrap_or(vendor.metadata.default_reliability)
				.clamp(0.0, 1.0);

			VendorQuote::success(
				vendor_id,
				part_number,
				data.available,
				data.price,
				data.lead_time_days,
				reliability,
			)
			.with_fallback_used(data.fallback_used)
			.with_response_time(elapsed)
		},
		Ok(Err(e)) => {
			let elapsed = started.elapsed().as_millis() as u64;
			circuit_breaker
				.record_request_result(&vendor_id, false)
				.await;
			warn!("Vendor {} returned error: {}", vendor_id, e);
			VendorQuote::failure(vendor_id, part_number, e.to_string())
				.with_response_time(elapsed)
		},
		Err(_) => {
			circuit_breaker
				.record_request_result(&vendor_id, false)
				.await;
			warn!(
				"Vendor {} timed out after {}ms",
				vendor_id, per_vendor_timeout_ms
			);
			VendorQuote::timeout(vendor_id, part_number)
				.with_response_time(per_vendor_timeout_ms)
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::circuit_breaker::MockCircuitBreakerTrait;
	use crate::test_support::{create_test_part, create_test_vendor, TestAdapter};
	use partsource_config::CircuitBreakerSettings;
	use partsource_storage::MemoryStore;

	fn no_op_breaker() -> Arc<dyn CircuitBreakerTrait> {
		// Disabled breaker allows everything and records nothing
		Arc::new(crate::circuit_breaker::CircuitBreakerService::new(
			CircuitBreakerSettings {
				enabled: false,
				failure_threshold: 5,
				open_timeout_secs: 30,
				half_open_max_requests: 3,
			},
		))
	}

	fn timeouts() -> TimeoutSettings {
		TimeoutSettings {
			per_vendor_ms: 2000,
			global_ms: 4000,
			request_ms: 5000,
		}
	}

	fn service_with(
		adapters: Vec<TestAdapter>,
		vendors: Vec<Vendor>,
		breaker: Arc<dyn CircuitBreakerTrait>,
	) -> VendorAggregatorService {
		let mut registry = AdapterRegistry::new();
		for adapter in adapters {
			registry.register(Arc::new(adapter)).unwrap();
		}

		VendorAggregatorService::new(
			vendors,
			Arc::new(registry),
			Arc::new(MemoryStore::new()),
			breaker,
			timeouts(),
			true,
		)
	}

	#[tokio::test]
	async fn test_fan_out_yields_one_quote_per_vendor() {
		let service = service_with(
			vec![
				TestAdapter::priced("good-v1", 420.0, 2, 0.9),
				TestAdapter::failing("bad-v1"),
			],
			vec![
				create_test_vendor("good", "good-v1"),
				create_test_vendor("bad", "bad-v1"),
			],
			no_op_breaker(),
		);

		let quotes = service.fan_out(&create_test_part(), 1000).await;

		assert_eq!(quotes.len(), 2);
		let good = quotes.iter().find(|q| q.vendor_id == "good").unwrap();
		let bad = quotes.iter().find(|q| q.vendor_id == "bad").unwrap();
		assert!(good.success && good.available);
		assert_eq!(good.price, Some(420.0));
		assert!(!bad.success);
		assert!(bad.error.is_some());
	}

	#[tokio::test]
	async fn test_all_failed_fan_out_returns_list() {
		let service = service_with(
			vec![TestAdapter::failing("bad-v1")],
			vec![
				create_test_vendor("bad-a", "bad-v1"),
				create_test_vendor("bad-b", "bad-v1"),
			],
			no_op_breaker(),
		);

		let quotes = service.fan_out(&create_test_part(), 1000).await;

		assert_eq!(quotes.len(), 2);
		assert!(quotes.iter().all(|q| !q.success));
	}

	#[tokio::test(flavor = "multi_thread")]
	async fn test_slow_vendor_is_cut_off_at_deadline() {
		let service = service_with(
			vec![
				TestAdapter::priced("fast-v1", 420.0, 2, 0.9),
				TestAdapter::delayed("slow-v1", 5000, 480.0),
			],
			vec![
				create_test_vendor("fast", "fast-v1"),
				create_test_vendor("slow", "slow-v1"),
			],
			no_op_breaker(),
		);

		let started = Instant::now();
		let quotes = service.fan_out(&create_test_part(), 1000).await;
		let elapsed = started.elapsed();

		// Bounded by the deadline, not the slow vendor's 5s latency
		assert!(
			elapsed < Duration::from_millis(1900),
			"fan-out took {:?}",
			elapsed
		);

		let slow = quotes.iter().find(|q| q.vendor_id == "slow").unwrap();
		assert!(slow.is_timeout());
		let fast = quotes.iter().find(|q| q.vendor_id == "fast").unwrap();
		assert!(fast.success);
	}

	#[tokio::test]
	async fn test_cache_hit_short_circuits_fan_out() {
		let adapter = TestAdapter::priced("good-v1", 420.0, 2, 0.9);
		let service = service_with(
			vec![adapter.clone()],
			vec![create_test_vendor("good", "good-v1")],
			no_op_breaker(),
		);
		let part = create_test_part();

		let (first, from_cache) = service.source_quotes(&part, 1000).await;
		assert!(!from_cache);
		assert_eq!(adapter.call_count(), 1);

		let (second, from_cache) = service.source_quotes(&part, 1000).await;
		assert!(from_cache);
		// No further vendor calls on a warm cache
		assert_eq!(adapter.call_count(), 1);
		assert_eq!(first, second);
	}

	#[tokio::test]
	async fn test_all_failed_quotes_are_not_cached() {
		let adapter = TestAdapter::failing("bad-v1");
		let service = service_with(
			vec![adapter.clone()],
			vec![create_test_vendor("bad", "bad-v1")],
			no_op_breaker(),
		);
		let part = create_test_part();

		let (_, from_cache) = service.source_quotes(&part, 1000).await;
		assert!(!from_cache);

		// Second call fans out again: failures never warm the cache
		let (_, from_cache) = service.source_quotes(&part, 1000).await;
		assert!(!from_cache);
		assert_eq!(adapter.call_count(), 2);
	}

	#[tokio::test]
	async fn test_open_circuit_skips_vendor_call() {
		let adapter = TestAdapter::priced("good-v1", 420.0, 2, 0.9);

		let mut breaker = MockCircuitBreakerTrait::new();
		breaker.expect_should_allow_request().returning(|_| false);
		breaker.expect_record_request_result().returning(|_, _| ());
		breaker.expect_is_enabled().returning(|| true);

		let service = service_with(
			vec![adapter.clone()],
			vec![create_test_vendor("good", "good-v1")],
			Arc::new(breaker),
		);

		let quotes = service.fan_out(&create_test_part(), 1000).await;

		assert_eq!(quotes.len(), 1);
		assert!(!quotes[0].success);
		assert_eq!(quotes[0].error.as_deref(), Some("Vendor circuit open"));
		assert_eq!(adapter.call_count(), 0);
	}

	#[tokio::test]
	async fn test_missing_adapter_degrades_to_failure_quote() {
		let service = service_with(
			vec![],
			vec![create_test_vendor("orphan", "nonexistent-v1")],
			no_op_breaker(),
		);

		assert!(service.validate_vendors().is_err());

		let quotes = service.fan_out(&create_test_part(), 1000).await;
		assert_eq!(quotes.len(), 1);
		assert!(!quotes[0].success);
	}

	#[tokio::test]
	async fn test_reliability_defaults_from_vendor_metadata() {
		// Adapter returns no reliability; vendor metadata supplies 0.7
		let adapter = TestAdapter::with_config(
			"plain-v1",
			false,
			0,
			partsource_types::VendorQuoteData::available(400.0, 3),
		);
		let service = service_with(
			vec![adapter],
			vec![create_test_vendor("plain", "plain-v1")],
			no_op_breaker(),
		);

		let quotes = service.fan_out(&create_test_part(), 1000).await;
		assert_eq!(quotes[0].reliability, 0.7);
	}
}
