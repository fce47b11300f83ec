//! Circuit breaker service for automatic vendor failure protection
//!
//! The fan-out consults the breaker before issuing a vendor call and records
//! every outcome afterwards, so a vendor that keeps failing stops receiving
//! traffic until its recovery window elapses.

use async_trait::async_trait;
use chrono::Duration;
use dashmap::DashMap;
use partsource_config::CircuitBreakerSettings;
use partsource_types::{CircuitBreakerState, CircuitState};
use tracing::{debug, info, warn};

/// Trait for circuit breaker operations (enables easy testing and mocking)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CircuitBreakerTrait: Send + Sync {
	/// Check if the circuit breaker is enabled in configuration
	fn is_enabled(&self) -> bool;

	/// Check if a request should be allowed for the given vendor
	async fn should_allow_request(&self, vendor_id: &str) -> bool;

	/// Record the result of a request to update circuit state
	async fn record_request_result(&self, vendor_id: &str, success: bool);
}

/// In-memory circuit breaker keyed by vendor ID
pub struct CircuitBreakerService {
	states: DashMap<String, CircuitBreakerState>,
	settings: CircuitBreakerSettings,
}

impl CircuitBreakerService {
	/// Create a new circuit breaker service
	pub fn new(settings: CircuitBreakerSettings) -> Self {
		Self {
			states: DashMap::new(),
			settings,
		}
	}

	/// Current state for a vendor, if any failures were ever recorded
	pub fn state_of(&self, vendor_id: &str) -> Option<CircuitState> {
		self.states.get(vendor_id).map(|s| s.value().state.clone())
	}

	fn open_timeout(&self) -> Duration {
		Duration::seconds(self.settings.open_timeout_secs as i64)
	}
}

#[async_trait]
impl CircuitBreakerTrait for CircuitBreakerService {
	fn is_enabled(&self) -> bool {
		self.settings.enabled
	}

	async fn should_allow_request(&self, vendor_id: &str) -> bool {
		if !self.settings.enabled {
			return true;
		}

		let mut entry = self
			.states
			.entry(vendor_id.to_string())
			.or_insert_with(|| CircuitBreakerState::new_closed(vendor_id.to_string()));

		match entry.state {
			CircuitState::Closed => true,
			CircuitState::Open => {
				if entry.should_attempt_reset() {
					info!("Circuit for vendor {} entering half-open state", vendor_id);
					let mut half_open = CircuitBreakerState::new_half_open(vendor_id.to_string());
					half_open.test_request_count = 1;
					*entry = half_open;
					true
				} else {
					debug!("Circuit open for vendor {}, blocking request", vendor_id);
					false
				}
			},
			CircuitState::HalfOpen => {
				if entry.test_request_count < self.settings.half_open_max_requests {
					entry.test_request_count += 1;
					entry.touch();
					true
				} else {
					debug!(
						"Half-open probe budget exhausted for vendor {}, blocking request",
						vendor_id
					);
					false
				}
			},
		}
	}

	async fn record_request_result(&self, vendor_id: &str, success: bool) {
		if !self.settings.enabled {
			return;
		}

		let mut entry = self
			.states
			.entry(vendor_id.to_string())
			.or_insert_with(|| CircuitBreakerState::new_closed(vendor_id.to_string()));

		match entry.state {
			CircuitState::Closed => {
				if success {
					entry.consecutive_failures = 0;
					entry.touch();
				} else {
					entry.consecutive_failures += 1;
					entry.touch();
					if entry.consecutive_failures >= self.settings.failure_threshold {
						warn!(
							"Opening circuit for vendor {} after {} consecutive failures",
							vendor_id, entry.consecutive_failures
						);
						*entry = CircuitBreakerState::new_open(
							vendor_id.to_string(),
							format!(
								"{} consecutive failures",
								entry.consecutive_failures
							),
							self.open_timeout(),
							entry.consecutive_failures,
						);
					}
				}
			},
			CircuitState::HalfOpen => {
				if success {
					entry.successful_test_requests += 1;
					info!("Circuit for vendor {} closing after successful probe", vendor_id);
					*entry = CircuitBreakerState::new_closed(vendor_id.to_string());
				} else {
					warn!(
						"Probe failed for vendor {}, reopening circuit",
						vendor_id
					);
					*entry = CircuitBreakerState::new_open(
						vendor_id.to_string(),
						"half-open probe failed".to_string(),
						self.open_timeout(),
						1,
					);
				}
			},
			CircuitState::Open => {
				// Late result for a request issued before the circuit opened
				entry.touch();
			},
		}
	}
}
