//! Partsource Configuration
//!
//! Configuration management and startup utilities for the parts sourcing
//! engine.

pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use loader::load_config;
pub use settings::{
	BatchSettings, CacheSettings, CircuitBreakerSettings, ClassificationSettings,
	ConfigValidationError, LogFormat, LoggingSettings, PricingSettings, ScoringSettings, Settings,
	TimeoutSettings, VendorConfig,
};
pub use startup_logger::{log_service_info, log_service_shutdown, log_startup_complete};
