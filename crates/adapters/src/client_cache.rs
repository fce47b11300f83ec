//! HTTP client cache for optimized connection management
//!
//! Provides per-vendor client instances with connection pooling and
//! keep-alive, so repeated fan-outs against the same vendor reuse sockets.

use dashmap::DashMap;
use partsource_types::{AdapterError, AdapterResult, VendorRuntimeConfig};
use reqwest::{Client, ClientBuilder};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Configuration for creating optimized HTTP clients
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientConfig {
	/// Base endpoint for the vendor
	pub base_url: String,
	/// Vendor identifier for cache differentiation
	pub vendor_id: String,
	/// Request timeout applied at the client level
	pub request_timeout_ms: u64,
	/// Maximum number of idle connections per host
	pub max_idle_per_host: usize,
	/// Additional headers (auth, content negotiation, ...)
	pub headers: Vec<(String, String)>,
}

impl From<&VendorRuntimeConfig> for ClientConfig {
	fn from(vendor_config: &VendorRuntimeConfig) -> Self {
		let mut headers = vec![
			(
				"User-Agent".to_string(),
				"Partsource-Aggregator/1.0".to_string(),
			),
			("Content-Type".to_string(), "application/json".to_string()),
			("Accept".to_string(), "application/json".to_string()),
		];

		if let Some(vendor_headers) = &vendor_config.headers {
			for (key, value) in vendor_headers {
				headers.push((key.clone(), value.clone()));
			}
		}

		Self {
			base_url: vendor_config.endpoint.clone(),
			vendor_id: vendor_config.vendor_id.clone(),
			request_timeout_ms: vendor_config.timeout_ms,
			max_idle_per_host: 10,
			headers,
		}
	}
}

/// Cached client with creation timestamp for TTL management
#[derive(Debug, Clone)]
struct CachedClient {
	client: Arc<Client>,
	created_at: Instant,
}

impl CachedClient {
	fn new(client: Client) -> Self {
		Self {
			client: Arc::new(client),
			created_at: Instant::now(),
		}
	}

	fn is_expired(&self, ttl: Duration) -> bool {
		self.created_at.elapsed() > ttl
	}
}

/// Thread-safe cache of HTTP clients keyed by vendor configuration, with TTL
#[derive(Clone, Debug)]
pub struct ClientCache {
	clients: Arc<DashMap<ClientConfig, CachedClient>>,
	ttl: Duration,
}

impl ClientCache {
	/// Create a new client cache with the default 30-minute TTL
	pub fn new() -> Self {
		Self::with_ttl(Duration::from_secs(30 * 60))
	}

	/// Create a new client cache with custom TTL
	pub fn with_ttl(ttl: Duration) -> Self {
		Self {
			clients: Arc::new(DashMap::new()),
			ttl,
		}
	}

	/// Get or create a pooled client for the given configuration
	pub fn get_client(&self, config: &ClientConfig) -> AdapterResult<Arc<Client>> {
		self.clients.remove_if(config, |_, cached_client| {
			let is_expired = cached_client.is_expired(self.ttl);
			if is_expired {
				warn!(
					"Client cache expired for {} (age: {:?}), will create new client",
					config.base_url,
					cached_client.created_at.elapsed()
				);
			}
			is_expired
		});

		if let Some(cached_client_ref) = self.clients.get(config) {
			return Ok(cached_client_ref.value().client.clone());
		}

		debug!("Creating new pooled client for {}", config.base_url);
		let client = create_client(config)?;
		let cached_client = CachedClient::new(client);
		let client_arc = cached_client.client.clone();

		use dashmap::mapref::entry::Entry;

		match self.clients.entry(config.clone()) {
			Entry::Occupied(entry) => {
				// Another pipeline won the race; use its client
				Ok(entry.get().client.clone())
			},
			Entry::Vacant(entry) => {
				entry.insert(cached_client);
				Ok(client_arc)
			},
		}
	}

	/// Number of cached clients (expired included)
	pub fn len(&self) -> usize {
		self.clients.len()
	}

	pub fn is_empty(&self) -> bool {
		self.clients.is_empty()
	}
}

impl Default for ClientCache {
	fn default() -> Self {
		Self::new()
	}
}

/// Build a client with the config's headers, pool sizing, and timeout
fn create_client(config: &ClientConfig) -> AdapterResult<Client> {
	let mut headers = reqwest::header::HeaderMap::new();
	for (key, value) in &config.headers {
		if let (Ok(header_name), Ok(header_value)) = (
			reqwest::header::HeaderName::from_bytes(key.as_bytes()),
			reqwest::header::HeaderValue::from_str(value),
		) {
			headers.insert(header_name, header_value);
		}
	}

	ClientBuilder::new()
		.default_headers(headers)
		.pool_max_idle_per_host(config.max_idle_per_host)
		.timeout(Duration::from_millis(config.request_timeout_ms))
		.build()
		.map_err(AdapterError::Http)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn create_test_config(vendor_id: &str) -> ClientConfig {
		ClientConfig {
			base_url: "https://api.example.com/v1".to_string(),
			vendor_id: vendor_id.to_string(),
			request_timeout_ms: 5000,
			max_idle_per_host: 10,
			headers: vec![],
		}
	}

	#[test]
	fn test_client_is_reused_for_same_config() {
		let cache = ClientCache::new();
		let config = create_test_config("lkq-midwest");

		let first = cache.get_client(&config).unwrap();
		let second = cache.get_client(&config).unwrap();

		assert!(Arc::ptr_eq(&first, &second));
		assert_eq!(cache.len(), 1);
	}

	#[test]
	fn test_distinct_vendors_get_distinct_clients() {
		let cache = ClientCache::new();

		let first = cache.get_client(&create_test_config("lkq-midwest")).unwrap();
		let second = cache.get_client(&create_test_config("lkq-south")).unwrap();

		assert!(!Arc::ptr_eq(&first, &second));
		assert_eq!(cache.len(), 2);
	}

	#[test]
	fn test_expired_client_is_replaced() {
		let cache = ClientCache::with_ttl(Duration::from_millis(0));
		let config = create_test_config("lkq-midwest");

		let first = cache.get_client(&config).unwrap();
		std::thread::sleep(Duration::from_millis(5));
		let second = cache.get_client(&config).unwrap();

		assert!(!Arc::ptr_eq(&first, &second));
	}

	#[test]
	fn test_config_from_runtime_config_carries_headers() {
		let mut headers = std::collections::HashMap::new();
		headers.insert("X-Api-Key".to_string(), "secret".to_string());
		let runtime = VendorRuntimeConfig::new(
			"lkq-midwest".to_string(),
			"https://api.lkq.example.com/v1".to_string(),
			2000,
		)
		.with_headers(headers);

		let config = ClientConfig::from(&runtime);
		assert_eq!(config.request_timeout_ms, 2000);
		assert!(config
			.headers
			.iter()
			.any(|(k, v)| k == "X-Api-Key" && v == "secret"));
	}
}
