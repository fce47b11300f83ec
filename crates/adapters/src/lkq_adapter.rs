//! LKQ adapter implementation
//!
//! Recycled and aftermarket parts supplier. Quotes come from the inventory
//! search endpoint; the first matching listing wins.

use async_trait::async_trait;
use partsource_types::{
	Adapter, AdapterError, AdapterResult, PartQuery, VendorAdapter, VendorQuoteData,
	VendorRuntimeConfig,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::client_cache::{ClientCache, ClientConfig};

/// LKQ adapter for recycled/aftermarket inventory quotes
#[derive(Debug)]
pub struct LkqAdapter {
	config: Adapter,
	client_cache: ClientCache,
}

/// Inventory search request body
#[derive(Debug, Serialize)]
struct LkqSearchRequest<'a> {
	part_number: &'a str,
	quantity: f64,
	vehicle: LkqVehicle<'a>,
}

#[derive(Debug, Serialize)]
struct LkqVehicle<'a> {
	year: i32,
	make: &'a str,
	model: &'a str,
}

/// Inventory search response payload
#[derive(Debug, Deserialize)]
struct LkqSearchResponse {
	#[serde(default)]
	results: Vec<LkqListing>,
}

#[derive(Debug, Deserialize)]
struct LkqListing {
	in_stock: bool,
	price: Option<f64>,
	ships_in_days: Option<u32>,
	fill_rate: Option<f64>,
}

impl LkqAdapter {
	/// Create a new LKQ adapter with a shared client cache
	pub fn new() -> Self {
		Self::with_cache(ClientCache::new())
	}

	/// Create an LKQ adapter with a custom client cache
	pub fn with_cache(client_cache: ClientCache) -> Self {
		Self {
			config: Adapter::new(
				"lkq-v1".to_string(),
				"LKQ recycled/aftermarket inventory search".to_string(),
				"LKQ Adapter".to_string(),
				"1.0.0".to_string(),
			),
			client_cache,
		}
	}

	fn get_client(&self, config: &VendorRuntimeConfig) -> AdapterResult<Arc<reqwest::Client>> {
		self.client_cache.get_client(&ClientConfig::from(config))
	}

	/// Normalize a search response into the fixed quote shape
	fn normalize(response: LkqSearchResponse) -> VendorQuoteData {
		match response.results.into_iter().next() {
			Some(listing) if listing.in_stock && listing.price.is_some() => {
				let mut data = VendorQuoteData {
					available: true,
					price: listing.price,
					lead_time_days: listing.ships_in_days,
					reliability: listing.fill_rate,
					fallback_used: false,
				};
				// Defensive clamp: fill rates occasionally arrive as percentages
				if let Some(rate) = data.reliability {
					if rate > 1.0 {
						data.reliability = Some((rate / 100.0).min(1.0));
					}
				}
				data
			},
			_ => VendorQuoteData::unavailable(),
		}
	}
}

impl Default for LkqAdapter {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl VendorAdapter for LkqAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	async fn query(
		&self,
		request: &PartQuery,
		config: &VendorRuntimeConfig,
	) -> AdapterResult<VendorQuoteData> {
		debug!(
			"LKQ adapter querying part {} for vendor {}",
			request.normalized_part_number, config.vendor_id
		);

		let url = format!(
			"{}/inventory/search",
			config.endpoint.trim_end_matches('/')
		);
		let client = self.get_client(config)?;

		let body = LkqSearchRequest {
			part_number: &request.normalized_part_number,
			quantity: request.quantity,
			vehicle: LkqVehicle {
				year: request.vehicle.year,
				make: &request.vehicle.make,
				model: &request.vehicle.model,
			},
		};

		let response = client
			.post(url)
			.json(&body)
			.send()
			.await
			.map_err(AdapterError::Http)?;

		if !response.status().is_success() {
			return Err(AdapterError::InvalidResponse {
				reason: format!(
					"LKQ inventory endpoint returned status {}",
					response.status()
				),
			});
		}

		let payload: LkqSearchResponse =
			response
				.json()
				.await
				.map_err(|e| AdapterError::InvalidResponse {
					reason: format!("Failed to parse LKQ inventory response: {}", e),
				})?;

		Ok(Self::normalize(payload))
	}

	async fn health_check(&self, config: &VendorRuntimeConfig) -> AdapterResult<bool> {
		let url = format!("{}/health", config.endpoint.trim_end_matches('/'));
		let client = self.get_client(config)?;

		let response = client.get(url).send().await.map_err(AdapterError::Http)?;
		Ok(response.status().is_success())
	}
}
