//! Configuration settings structures

use partsource_types::{Vendor, VendorStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Tolerance when checking that scoring weights sum to 1.0
const WEIGHT_SUM_EPSILON: f64 = 1e-6;

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
	pub vendors: HashMap<String, VendorConfig>,
	pub timeouts: TimeoutSettings,
	pub cache: CacheSettings,
	pub scoring: ScoringSettings,
	pub pricing: PricingSettings,
	pub classification: ClassificationSettings,
	pub batch: BatchSettings,
	pub circuit_breaker: CircuitBreakerSettings,
	pub logging: LoggingSettings,
}

/// Individual vendor configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VendorConfig {
	pub vendor_id: String,
	pub adapter_id: String,
	pub endpoint: String,
	pub timeout_ms: u64,
	pub enabled: bool,
	pub max_retries: u32,
	/// Historical fill rate used when quote payloads carry none
	pub reliability: f64,
	pub headers: Option<HashMap<String, String>>,
	// Optional descriptive metadata
	pub name: Option<String>,
	pub description: Option<String>,
}

/// Convert a settings-level vendor config into the domain Vendor
impl From<VendorConfig> for Vendor {
	fn from(config: VendorConfig) -> Self {
		let mut vendor = Vendor::new(
			config.vendor_id.clone(),
			config.adapter_id,
			config.endpoint,
			config.timeout_ms,
		);
		vendor.metadata.name = config.name.or(Some(config.vendor_id));
		vendor.metadata.description = config.description;
		vendor.metadata.default_reliability = config.reliability;
		vendor.metadata.max_retries = config.max_retries;
		vendor.metadata.headers = config.headers;
		vendor.status = VendorStatus::Active;
		vendor
	}
}

/// Timeout configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TimeoutSettings {
	/// Per-vendor deadline in milliseconds (1000-3000ms recommended)
	pub per_vendor_ms: u64,
	/// Global fan-out timeout in milliseconds (3000-5000ms recommended)
	pub global_ms: u64,
	/// Request timeout for HTTP clients
	pub request_ms: u64,
}

/// Quote cache configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheSettings {
	pub enabled: bool,
	/// How long a cached quote set stays fresh
	pub ttl_secs: u64,
	/// How often the background purge runs
	pub cleanup_interval_secs: u64,
}

/// Vendor scoring weights
///
/// Defaults are inferred business rules, not hard requirements; deployments
/// tune them per shop policy.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScoringSettings {
	pub price_weight: f64,
	pub lead_time_weight: f64,
	pub reliability_weight: f64,
}

/// Purchase-order pricing policy
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PricingSettings {
	/// Markup fraction applied to the vendor price
	pub base_markup: f64,
	/// Line totals above this require manual approval
	pub approval_threshold: f64,
}

/// Value-tier cutoffs for part classification
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClassificationSettings {
	/// Parts at or below this unit cost are economy tier
	pub economy_max: f64,
	/// Parts at or below this unit cost are standard tier; above is premium
	pub standard_max: f64,
}

/// Batch processing configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BatchSettings {
	/// Upper bound on concurrently processed parts
	pub max_concurrency: usize,
	/// Optional overall batch deadline
	pub deadline_ms: Option<u64>,
}

/// Circuit breaker configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CircuitBreakerSettings {
	pub enabled: bool,
	/// Consecutive failures before the circuit opens
	pub failure_threshold: u32,
	/// How long an open circuit blocks requests before testing recovery
	pub open_timeout_secs: u64,
	/// Probe requests allowed while half-open
	pub half_open_max_requests: u32,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			vendors: HashMap::new(),
			timeouts: TimeoutSettings {
				per_vendor_ms: 2000,
				global_ms: 4000,
				request_ms: 5000,
			},
			cache: CacheSettings {
				enabled: true,
				ttl_secs: 300,
				cleanup_interval_secs: 60,
			},
			scoring: ScoringSettings {
				price_weight: 0.4,
				lead_time_weight: 0.3,
				reliability_weight: 0.3,
			},
			pricing: PricingSettings {
				base_markup: 0.25,
				approval_threshold: 1000.0,
			},
			classification: ClassificationSettings {
				economy_max: 100.0,
				standard_max: 500.0,
			},
			batch: BatchSettings {
				max_concurrency: 8,
				deadline_ms: None,
			},
			circuit_breaker: CircuitBreakerSettings {
				enabled: true,
				failure_threshold: 5,
				open_timeout_secs: 30,
				half_open_max_requests: 3,
			},
			logging: LoggingSettings {
				level: "info".to_string(),
				format: LogFormat::Pretty,
				structured: false,
			},
		}
	}
}

/// Settings validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
	#[error("Scoring weights must sum to 1.0, got {sum}")]
	InvalidWeights { sum: f64 },

	#[error("Markup must be non-negative, got {value}")]
	NegativeMarkup { value: f64 },

	#[error("{field} must be positive")]
	NonPositive { field: &'static str },

	#[error("Per-vendor timeout ({per_vendor_ms}ms) exceeds global timeout ({global_ms}ms)")]
	TimeoutOrdering { per_vendor_ms: u64, global_ms: u64 },

	#[error("Vendor '{vendor_id}' reliability {value} out of range (0..=1)")]
	VendorReliability { vendor_id: String, value: f64 },

	#[error("Tier cutoffs must increase: economy_max {economy_max} >= standard_max {standard_max}")]
	TierOrdering { economy_max: f64, standard_max: f64 },
}

impl Settings {
	/// Get enabled vendors only
	pub fn enabled_vendors(&self) -> HashMap<String, VendorConfig> {
		self.vendors
			.iter()
			.filter(|(_, config)| config.enabled)
			.map(|(k, v)| (k.clone(), v.clone()))
			.collect()
	}

	/// Validate cross-field constraints the type system cannot express
	pub fn validate(&self) -> Result<(), ConfigValidationError> {
		let sum = self.scoring.price_weight
			+ self.scoring.lead_time_weight
			+ self.scoring.reliability_weight;
		if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
			return Err(ConfigValidationError::InvalidWeights { sum });
		}

		if self.pricing.base_markup < 0.0 {
			return Err(ConfigValidationError::NegativeMarkup {
				value: self.pricing.base_markup,
			});
		}

		if self.pricing.approval_threshold <= 0.0 {
			return Err(ConfigValidationError::NonPositive {
				field: "pricing.approval_threshold",
			});
		}

		if self.cache.ttl_secs == 0 {
			return Err(ConfigValidationError::NonPositive {
				field: "cache.ttl_secs",
			});
		}

		if self.batch.max_concurrency == 0 {
			return Err(ConfigValidationError::NonPositive {
				field: "batch.max_concurrency",
			});
		}

		if self.timeouts.per_vendor_ms > self.timeouts.global_ms {
			return Err(ConfigValidationError::TimeoutOrdering {
				per_vendor_ms: self.timeouts.per_vendor_ms,
				global_ms: self.timeouts.global_ms,
			});
		}

		if self.classification.economy_max >= self.classification.standard_max {
			return Err(ConfigValidationError::TierOrdering {
				economy_max: self.classification.economy_max,
				standard_max: self.classification.standard_max,
			});
		}

		for (vendor_id, vendor) in &self.vendors {
			if !(0.0..=1.0).contains(&vendor.reliability) {
				return Err(ConfigValidationError::VendorReliability {
					vendor_id: vendor_id.clone(),
					value: vendor.reliability,
				});
			}
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn create_test_vendor_config() -> VendorConfig {
		VendorConfig {
			vendor_id: "lkq-midwest".to_string(),
			adapter_id: "lkq-v1".to_string(),
			endpoint: "https://api.lkq.example.com/v1".to_string(),
			timeout_ms: 2000,
			enabled: true,
			max_retries: 0,
			reliability: 0.9,
			headers: None,
			name: None,
			description: Some("LKQ Midwest region".to_string()),
		}
	}

	#[test]
	fn test_defaults_validate() {
		assert!(Settings::default().validate().is_ok());
	}

	#[test]
	fn test_weights_must_sum_to_one() {
		let mut settings = Settings::default();
		settings.scoring.price_weight = 0.9;
		assert!(matches!(
			settings.validate(),
			Err(ConfigValidationError::InvalidWeights { .. })
		));
	}

	#[test]
	fn test_negative_markup_rejected() {
		let mut settings = Settings::default();
		settings.pricing.base_markup = -0.1;
		assert!(matches!(
			settings.validate(),
			Err(ConfigValidationError::NegativeMarkup { .. })
		));
	}

	#[test]
	fn test_vendor_reliability_range_checked() {
		let mut settings = Settings::default();
		let mut vendor = create_test_vendor_config();
		vendor.reliability = 1.5;
		settings.vendors.insert(vendor.vendor_id.clone(), vendor);
		assert!(matches!(
			settings.validate(),
			Err(ConfigValidationError::VendorReliability { .. })
		));
	}

	#[test]
	fn test_enabled_vendors_filters_disabled() {
		let mut settings = Settings::default();
		let enabled = create_test_vendor_config();
		let mut disabled = create_test_vendor_config();
		disabled.vendor_id = "lkq-south".to_string();
		disabled.enabled = false;
		settings.vendors.insert(enabled.vendor_id.clone(), enabled);
		settings
			.vendors
			.insert(disabled.vendor_id.clone(), disabled);

		let enabled = settings.enabled_vendors();
		assert_eq!(enabled.len(), 1);
		assert!(enabled.contains_key("lkq-midwest"));
	}

	#[test]
	fn test_vendor_config_to_domain_vendor() {
		let config = create_test_vendor_config();
		let vendor: Vendor = config.into();

		assert_eq!(vendor.vendor_id, "lkq-midwest");
		assert_eq!(vendor.metadata.name.as_deref(), Some("lkq-midwest"));
		assert_eq!(vendor.metadata.default_reliability, 0.9);
		assert!(vendor.is_available());
		assert!(vendor.validate().is_ok());
	}
}
