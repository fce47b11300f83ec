//! Sourcing orchestration
//!
//! The sole entry point external callers use. Drives classify, cache/fan-out,
//! select, and generate per part, runs parts over a bounded worker pool, and
//! aggregates statistics plus a structured error list. Per-part failures are
//! isolated: one bad part never fails the batch.

use crate::aggregator::VendorAggregatorService;
use crate::classifier::PartClassifier;
use crate::po::PoLineGenerator;
use crate::selector::VendorSelector;
use crate::vin::VinDecoder;
use futures::stream::{self, StreamExt};
use partsource_config::{BatchSettings, PricingSettings, TimeoutSettings};
use partsource_types::{
	PartFailure, PartSourcing, RawPartLine, SourcingError, SourcingOptions, SourcingResult,
	SourcingStatistics, VehicleContext,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::time::{timeout_at, Instant as TokioInstant};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Orchestrates batch part sourcing
pub struct SourcingService {
	aggregator: Arc<VendorAggregatorService>,
	classifier: PartClassifier,
	selector: VendorSelector,
	pricing: PricingSettings,
	batch: BatchSettings,
	timeouts: TimeoutSettings,
	vin_decoder: Option<Arc<dyn VinDecoder>>,
}

/// Everything one spawned part pipeline needs, cloneable per part
#[derive(Clone)]
struct PartPipeline {
	aggregator: Arc<VendorAggregatorService>,
	classifier: PartClassifier,
	selector: VendorSelector,
	generator: PoLineGenerator,
	vehicle: VehicleContext,
	per_vendor_timeout_ms: u64,
	generate_po: bool,
}

impl PartPipeline {
	/// Classify, source, select, and price one part
	async fn run(self, line: RawPartLine) -> PartSourcing {
		let part = self.classifier.classify(&line, &self.vehicle);

		let (quotes, from_cache) = self
			.aggregator
			.source_quotes(&part, self.per_vendor_timeout_ms)
			.await;

		let decision = self.selector.select(&quotes, &part);

		let po_line = if self.generate_po {
			self.generator.generate(&part, &decision)
		} else {
			None
		};

		PartSourcing {
			part,
			quotes,
			decision,
			po_line,
			from_cache,
		}
	}
}

impl SourcingService {
	/// Create a new sourcing service
	pub fn new(
		aggregator: Arc<VendorAggregatorService>,
		classifier: PartClassifier,
		selector: VendorSelector,
		pricing: PricingSettings,
		batch: BatchSettings,
		timeouts: TimeoutSettings,
	) -> Self {
		Self {
			aggregator,
			classifier,
			selector,
			pricing,
			batch,
			timeouts,
			vin_decoder: None,
		}
	}

	/// Attach an optional VIN decoding collaborator
	pub fn with_vin_decoder(mut self, decoder: Arc<dyn VinDecoder>) -> Self {
		self.vin_decoder = Some(decoder);
		self
	}

	/// Process a batch of damage lines against one vehicle
	///
	/// Batch-fatal conditions (invalid vehicle, empty input) reject the call;
	/// everything else degrades into `errors[]` entries on a successful
	/// result.
	pub async fn process(
		&self,
		raw_lines: Vec<RawPartLine>,
		vehicle: VehicleContext,
		options: SourcingOptions,
	) -> Result<SourcingResult, SourcingError> {
		vehicle.validate()?;
		if raw_lines.is_empty() {
			return Err(SourcingError::EmptyBatch);
		}

		let started = Instant::now();
		let batch_id = Uuid::new_v4().to_string();
		let total_parts = raw_lines.len();

		let vehicle = self.maybe_enrich_vehicle(vehicle, &options).await;

		let pipeline = PartPipeline {
			aggregator: Arc::clone(&self.aggregator),
			classifier: self.classifier.clone(),
			selector: self.selector.clone(),
			generator: PoLineGenerator::new(self.effective_pricing(&options)),
			vehicle: vehicle.clone(),
			per_vendor_timeout_ms: options
				.vendor_timeout_ms
				.unwrap_or(self.timeouts.per_vendor_ms),
			generate_po: options.generate_po,
		};

		let concurrency = self.batch.max_concurrency.min(total_parts).max(1);
		let deadline = self
			.batch
			.deadline_ms
			.map(|ms| TokioInstant::now() + std::time::Duration::from_millis(ms));

		info!(
			"Processing batch {} ({} parts, concurrency {})",
			batch_id, total_parts, concurrency
		);

		let mut work = stream::iter(raw_lines.iter().cloned().map(|line| {
			let pipeline = pipeline.clone();
			let line_number = line.line_number;
			let part_number = line.part_number.clone();

			async move {
				// Spawning isolates a panicking part pipeline from its
				// siblings; the JoinError degrades to a part failure
				match tokio::spawn(pipeline.run(line)).await {
					Ok(sourcing) => Ok(sourcing),
					Err(e) => Err(PartFailure {
						line_number,
						part_number,
						message: format!("Part pipeline panicked: {}", e),
					}),
				}
			}
		}))
		.buffer_unordered(concurrency);

		let mut results: Vec<PartSourcing> = Vec::with_capacity(total_parts);
		let mut errors: Vec<PartFailure> = Vec::new();
		let mut deadline_hit = false;

		loop {
			let next = match deadline {
				Some(deadline) => match timeout_at(deadline, work.next()).await {
					Ok(next) => next,
					Err(_) => {
						deadline_hit = true;
						break;
					},
				},
				None => work.next().await,
			};

			match next {
				Some(Ok(sourcing)) => results.push(sourcing),
				Some(Err(failure)) => {
					debug!(
						"Part {} (line {}) failed: {}",
						failure.part_number, failure.line_number, failure.message
					);
					errors.push(failure);
				},
				None => break,
			}
		}

		if deadline_hit {
			// Keep what completed; everything still in flight becomes an
			// error entry. Dropping the stream cancels pending pipelines, so
			// no torn PO line can be observed.
			drop(work);
			warn!(
				"Batch {} deadline exceeded with {} of {} parts completed",
				batch_id,
				results.len() + errors.len(),
				total_parts
			);

			let mut completed: Vec<u32> = results.iter().map(|r| r.part.line_number).collect();
			completed.extend(errors.iter().map(|e| e.line_number));

			for line in &raw_lines {
				if !completed.contains(&line.line_number) {
					errors.push(PartFailure {
						line_number: line.line_number,
						part_number: line.part_number.clone(),
						message: "Batch deadline exceeded".to_string(),
					});
				}
			}
		}

		let statistics = SourcingStatistics {
			total_parts,
			processed_parts: results.len(),
			sourced_parts: results.iter().filter(|r| r.decision.recommended).count(),
			cache_hits: results.iter().filter(|r| r.from_cache).count(),
			processing_time_ms: started.elapsed().as_millis() as u64,
		};

		info!(
			"Batch {} finished: {}/{} parts processed, {} sourced, {} errors in {}ms",
			batch_id,
			statistics.processed_parts,
			statistics.total_parts,
			statistics.sourced_parts,
			errors.len(),
			statistics.processing_time_ms
		);

		Ok(SourcingResult {
			success: true,
			batch_id,
			results,
			statistics,
			errors,
			vehicle,
		})
	}

	/// Pricing policy with per-call overrides applied
	fn effective_pricing(&self, options: &SourcingOptions) -> PricingSettings {
		PricingSettings {
			base_markup: options.base_markup.unwrap_or(self.pricing.base_markup),
			approval_threshold: options
				.approval_threshold
				.unwrap_or(self.pricing.approval_threshold),
		}
	}

	/// Enrich the vehicle context from its VIN when asked and possible
	///
	/// Decode failure leaves the context unenriched; it never propagates.
	async fn maybe_enrich_vehicle(
		&self,
		mut vehicle: VehicleContext,
		options: &SourcingOptions,
	) -> VehicleContext {
		if !options.enhance_with_vin_decoding {
			return vehicle;
		}

		let (Some(decoder), Some(vin)) = (&self.vin_decoder, vehicle.vin.clone()) else {
			return vehicle;
		};

		match decoder.decode(&vin).await {
			Ok(details) => {
				if vehicle.body_style.is_none() {
					vehicle.body_style = details.body_style;
				}
				if vehicle.engine_size.is_none() {
					vehicle.engine_size = details.engine_size;
				}
				vehicle.decoded_from_vin = true;
				debug!("VIN {} decoded successfully", vin);
			},
			Err(e) => {
				warn!("VIN decode failed for {}: {} (continuing unenriched)", vin, e);
			},
		}

		vehicle
	}
}
