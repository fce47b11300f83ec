//! Circuit breaker types and core data structures
//!
//! Data structures for the circuit breaker protecting vendor communication
//! from cascading failures. The state machine logic lives in the service
//! crate; only the persistent state shape is modeled here.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Circuit breaker state machine states
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum CircuitState {
	/// Normal operation, allow all requests
	Closed,
	/// Block requests, vendor is failing
	Open,
	/// Testing recovery, limited requests allowed
	HalfOpen,
}

/// Per-vendor circuit breaker state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitBreakerState {
	/// Vendor identifier this circuit protects
	pub vendor_id: String,

	/// Current state of the circuit
	pub state: CircuitState,

	/// When the circuit was opened (None if not currently open)
	pub opened_at: Option<DateTime<Utc>>,

	/// Consecutive failures observed while closed
	pub consecutive_failures: u32,

	/// How long to wait before testing recovery
	pub timeout_duration: Duration,

	/// When the next test request should be allowed (None if not waiting)
	pub next_test_at: Option<DateTime<Utc>>,

	/// Human-readable reason why the circuit opened
	pub reason: Option<String>,

	/// Number of test requests made in half-open state
	pub test_request_count: u32,

	/// Number of successful test requests in half-open state
	pub successful_test_requests: u32,

	/// When this circuit breaker state was created
	pub created_at: DateTime<Utc>,

	/// When this state was last updated
	pub last_updated: DateTime<Utc>,
}

impl CircuitBreakerState {
	/// Create a new circuit breaker state in closed position
	pub fn new_closed(vendor_id: String) -> Self {
		let now = Utc::now();
		Self {
			vendor_id,
			state: CircuitState::Closed,
			opened_at: None,
			consecutive_failures: 0,
			timeout_duration: Duration::seconds(0),
			next_test_at: None,
			reason: None,
			test_request_count: 0,
			successful_test_requests: 0,
			created_at: now,
			last_updated: now,
		}
	}

	/// Create a new circuit breaker state in open position
	pub fn new_open(
		vendor_id: String,
		reason: String,
		timeout_duration: Duration,
		failure_count: u32,
	) -> Self {
		let now = Utc::now();
		Self {
			vendor_id,
			state: CircuitState::Open,
			opened_at: Some(now),
			consecutive_failures: failure_count,
			timeout_duration,
			next_test_at: Some(now + timeout_duration),
			reason: Some(reason),
			test_request_count: 0,
			successful_test_requests: 0,
			created_at: now,
			last_updated: now,
		}
	}

	/// Create a new circuit breaker state in half-open position
	pub fn new_half_open(vendor_id: String) -> Self {
		let now = Utc::now();
		Self {
			vendor_id,
			state: CircuitState::HalfOpen,
			opened_at: None,
			consecutive_failures: 0,
			timeout_duration: Duration::seconds(0),
			next_test_at: None,
			reason: None,
			test_request_count: 0,
			successful_test_requests: 0,
			created_at: now,
			last_updated: now,
		}
	}

	/// Check if this circuit should transition to half-open state
	pub fn should_attempt_reset(&self) -> bool {
		match self.state {
			CircuitState::Open => {
				if let Some(next_test_at) = self.next_test_at {
					Utc::now() >= next_test_at
				} else {
					false
				}
			},
			_ => false,
		}
	}

	/// Update the last_updated timestamp
	pub fn touch(&mut self) {
		self.last_updated = Utc::now();
	}
}

/// Decision result from circuit breaker logic evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum CircuitDecision {
	/// Allow the request, circuit is closed
	Closed,
	/// Block the request, circuit is open
	Open { reason: String },
}

impl CircuitDecision {
	/// Check if the decision allows requests
	pub fn allows_request(&self) -> bool {
		matches!(self, CircuitDecision::Closed)
	}

	/// Get the reason string if the circuit is open
	pub fn reason(&self) -> Option<&str> {
		match self {
			CircuitDecision::Open { reason } => Some(reason),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_new_closed_state() {
		let state = CircuitBreakerState::new_closed("lkq-midwest".to_string());

		assert_eq!(state.state, CircuitState::Closed);
		assert!(state.opened_at.is_none());
		assert_eq!(state.consecutive_failures, 0);
		assert!(state.next_test_at.is_none());
		assert!(!state.should_attempt_reset());
	}

	#[test]
	fn test_new_open_state_schedules_test() {
		let timeout = Duration::seconds(30);
		let state = CircuitBreakerState::new_open(
			"lkq-midwest".to_string(),
			"5 consecutive failures".to_string(),
			timeout,
			5,
		);

		assert_eq!(state.state, CircuitState::Open);
		assert_eq!(state.consecutive_failures, 5);

		let opened_at = state.opened_at.unwrap();
		assert_eq!(state.next_test_at.unwrap(), opened_at + timeout);

		// Not ready immediately after opening
		assert!(!state.should_attempt_reset());
	}

	#[test]
	fn test_open_state_resets_after_timeout() {
		let state = CircuitBreakerState::new_open(
			"lkq-midwest".to_string(),
			"failures".to_string(),
			Duration::milliseconds(1),
			5,
		);

		std::thread::sleep(std::time::Duration::from_millis(5));
		assert!(state.should_attempt_reset());
	}

	#[test]
	fn test_half_open_does_not_reset() {
		let state = CircuitBreakerState::new_half_open("lkq-midwest".to_string());
		assert!(!state.should_attempt_reset());
	}

	#[test]
	fn test_decision_accessors() {
		assert!(CircuitDecision::Closed.allows_request());

		let open = CircuitDecision::Open {
			reason: "failing".to_string(),
		};
		assert!(!open.allows_request());
		assert_eq!(open.reason(), Some("failing"));
	}
}
