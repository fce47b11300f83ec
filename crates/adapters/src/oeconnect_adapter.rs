//! OE Connection adapter implementation
//!
//! OEM dealer network lookup. Dealer pricing is preferred; when the payload
//! carries only the list-price book value the adapter degrades to it and
//! marks the quote as a fallback.

use async_trait::async_trait;
use partsource_types::{
	Adapter, AdapterError, AdapterResult, PartQuery, VendorAdapter, VendorQuoteData,
	VendorRuntimeConfig,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::client_cache::{ClientCache, ClientConfig};

/// OE Connection adapter for OEM dealer quotes
#[derive(Debug)]
pub struct OeConnectAdapter {
	config: Adapter,
	client_cache: ClientCache,
}

/// Part lookup request body
#[derive(Debug, Serialize)]
struct OeLookupRequest<'a> {
	oem_number: &'a str,
	year: i32,
	make: &'a str,
	model: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	vin: Option<&'a str>,
}

/// Part lookup response payload
#[derive(Debug, Deserialize)]
struct OeLookupResponse {
	part: Option<OePart>,
}

#[derive(Debug, Deserialize)]
struct OePart {
	/// "A" available, "B" backorder, anything else unavailable
	availability_code: String,
	dealer_price: Option<f64>,
	list_price: Option<f64>,
	eta_days: Option<u32>,
}

impl OeConnectAdapter {
	/// Create a new OE Connection adapter with a shared client cache
	pub fn new() -> Self {
		Self::with_cache(ClientCache::new())
	}

	/// Create an OE Connection adapter with a custom client cache
	pub fn with_cache(client_cache: ClientCache) -> Self {
		Self {
			config: Adapter::new(
				"oeconnect-v1".to_string(),
				"OE Connection dealer network lookup".to_string(),
				"OE Connection Adapter".to_string(),
				"1.0.0".to_string(),
			),
			client_cache,
		}
	}

	fn get_client(&self, config: &VendorRuntimeConfig) -> AdapterResult<Arc<reqwest::Client>> {
		self.client_cache.get_client(&ClientConfig::from(config))
	}

	/// Normalize a dealer lookup into the fixed quote shape
	fn normalize(response: OeLookupResponse) -> VendorQuoteData {
		let Some(part) = response.part else {
			return VendorQuoteData::unavailable();
		};

		let available = matches!(part.availability_code.as_str(), "A" | "B");
		if !available {
			return VendorQuoteData::unavailable();
		}

		// Backorders push the ETA out a week when the dealer gave none
		let lead_time_days = part
			.eta_days
			.or(if part.availability_code == "B" {
				Some(7)
			} else {
				Some(2)
			});

		match (part.dealer_price, part.list_price) {
			(Some(price), _) => VendorQuoteData {
				available: true,
				price: Some(price),
				lead_time_days,
				reliability: None,
				fallback_used: false,
			},
			(None, Some(list)) => VendorQuoteData {
				available: true,
				price: Some(list),
				lead_time_days,
				reliability: None,
				fallback_used: true,
			},
			(None, None) => VendorQuoteData::unavailable(),
		}
	}
}

impl Default for OeConnectAdapter {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl VendorAdapter for OeConnectAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	async fn query(
		&self,
		request: &PartQuery,
		config: &VendorRuntimeConfig,
	) -> AdapterResult<VendorQuoteData> {
		debug!(
			"OE Connection adapter querying part {} for vendor {}",
			request.normalized_part_number, config.vendor_id
		);

		let url = format!("{}/parts/lookup", config.endpoint.trim_end_matches('/'));
		let client = self.get_client(config)?;

		let body = OeLookupRequest {
			oem_number: &request.normalized_part_number,
			year: request.vehicle.year,
			make: &request.vehicle.make,
			model: &request.vehicle.model,
			vin: request.vehicle.vin.as_deref(),
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
					"OE Connection lookup endpoint returned status {}",
					response.status()
				),
			});
		}

		let payload: OeLookupResponse =
			response
				.json()
				.await
				.map_err(|e| AdapterError::InvalidResponse {
					reason: format!("Failed to parse OE Connection lookup response: {}", e),
				})?;

		Ok(Self::normalize(payload))
	}

	async fn health_check(&self, config: &VendorRuntimeConfig) -> AdapterResult<bool> {
		let url = format!("{}/status", config.endpoint.trim_end_matches('/'));
		let client = self.get_client(config)?;

		let response = client.get(url).send().await.map_err(AdapterError::Http)?;
		Ok(response.status().is_success())
	}
}
