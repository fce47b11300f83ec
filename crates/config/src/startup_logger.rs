//! Service startup logging

use std::env;
use tracing::info;

/// Logs service information at startup
pub fn log_service_info() {
	let service_name = "partsource-aggregator";
	let service_version = env!("CARGO_PKG_VERSION");

	info!("=== Parts Sourcing Engine Starting ===");
	info!("Service: {} v{}", service_name, service_version);
	info!("Platform: {} ({})", env::consts::OS, env::consts::ARCH);

	if let Ok(rust_log) = env::var("RUST_LOG") {
		info!("Log Level: {}", rust_log);
	}

	if let Ok(config_path) = env::var("CONFIG_PATH") {
		info!("Config Path: {}", config_path);
	}

	info!(
		"Started at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs engine readiness after the builder finished wiring
pub fn log_startup_complete(vendor_count: usize, adapter_count: usize) {
	info!("Parts sourcing engine initialized successfully");
	info!(
		"{} vendor(s) configured across {} adapter(s)",
		vendor_count, adapter_count
	);
	info!("Ready to process sourcing batches");
}

/// Logs service shutdown information
pub fn log_service_shutdown() {
	info!("Parts sourcing engine shutting down");
	info!(
		"Shutdown at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}
