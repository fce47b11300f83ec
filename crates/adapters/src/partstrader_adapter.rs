//! PartsTrader adapter implementation
//!
//! Marketplace aggregating competing supplier quotes; the marketplace quote
//! endpoint already returns the best supplier offer, so normalization is a
//! straight field mapping. Supplier ratings arrive on a 0-5 scale.

use async_trait::async_trait;
use partsource_types::{
	Adapter, AdapterError, AdapterResult, PartQuery, VendorAdapter, VendorQuoteData,
	VendorRuntimeConfig,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::client_cache::{ClientCache, ClientConfig};

/// PartsTrader adapter for marketplace quotes
#[derive(Debug)]
pub struct PartsTraderAdapter {
	config: Adapter,
	client_cache: ClientCache,
}

/// Marketplace quote response payload
#[derive(Debug, Deserialize)]
struct PartsTraderResponse {
	quote: Option<PartsTraderQuote>,
}

#[derive(Debug, Deserialize)]
struct PartsTraderQuote {
	stock_status: String,
	unit_price: Option<f64>,
	delivery_days: Option<u32>,
	supplier_rating: Option<f64>,
}

impl PartsTraderAdapter {
	/// Create a new PartsTrader adapter with a shared client cache
	pub fn new() -> Self {
		Self::with_cache(ClientCache::new())
	}

	/// Create a PartsTrader adapter with a custom client cache
	pub fn with_cache(client_cache: ClientCache) -> Self {
		Self {
			config: Adapter::new(
				"partstrader-v1".to_string(),
				"PartsTrader marketplace quoting".to_string(),
				"PartsTrader Adapter".to_string(),
				"1.0.0".to_string(),
			),
			client_cache,
		}
	}

	fn get_client(&self, config: &VendorRuntimeConfig) -> AdapterResult<Arc<reqwest::Client>> {
		self.client_cache.get_client(&ClientConfig::from(config))
	}

	/// Normalize a marketplace response into the fixed quote shape
	fn normalize(response: PartsTraderResponse) -> VendorQuoteData {
		let Some(quote) = response.quote else {
			return VendorQuoteData::unavailable();
		};

		let in_stock = quote.stock_status.eq_ignore_ascii_case("in_stock");
		if !in_stock || quote.unit_price.is_none() {
			return VendorQuoteData::unavailable();
		}

		VendorQuoteData {
			available: true,
			price: quote.unit_price,
			lead_time_days: quote.delivery_days,
			// Marketplace ratings are 0-5 stars
			reliability: quote.supplier_rating.map(|r| (r / 5.0).clamp(0.0, 1.0)),
			fallback_used: false,
		}
	}
}

impl Default for PartsTraderAdapter {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl VendorAdapter for PartsTraderAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	async fn query(
		&self,
		request: &PartQuery,
		config: &VendorRuntimeConfig,
	) -> AdapterResult<VendorQuoteData> {
		debug!(
			"PartsTrader adapter querying part {} for vendor {}",
			request.normalized_part_number, config.vendor_id
		);

		let url = format!("{}/quotes", config.endpoint.trim_end_matches('/'));
		let client = self.get_client(config)?;

		let response = client
			.get(url)
			.query(&[
				("part", request.normalized_part_number.as_str()),
				("year", &request.vehicle.year.to_string()),
				("make", &request.vehicle.make),
				("model", &request.vehicle.model),
			])
			.send()
			.await
			.map_err(AdapterError::Http)?;

		if !response.status().is_success() {
			return Err(AdapterError::InvalidResponse {
				reason: format!(
					"PartsTrader quote endpoint returned status {}",
					response.status()
				),
			});
		}

		let payload: PartsTraderResponse =
			response
				.json()
				.await
				.map_err(|e| AdapterError::InvalidResponse {
					reason: format!("Failed to parse PartsTrader quote response: {}", e),
				})?;

		Ok(Self::normalize(payload))
	}

	async fn health_check(&self, config: &VendorRuntimeConfig) -> AdapterResult<bool> {
		let url = format!("{}/ping", config.endpoint.trim_end_matches('/'));
		let client = self.get_client(config)?;

		let response = client.get(url).send().await.map_err(AdapterError::Http)?;
		Ok(response.status().is_success())
	}
}
