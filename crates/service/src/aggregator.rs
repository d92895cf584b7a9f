//! Core fan-out aggregation logic

use chorus_adapters::AdapterRegistry;
use chorus_types::{
	Provider, ProviderOutcome, ProviderResult, ProviderRuntimeConfig, QueryError,
};
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

/// Service for fanning one prompt out to multiple AI providers
///
/// Providers are held in a fixed order, so the outcome sequence is
/// index-stable across requests: the same configuration always yields the
/// same labeling downstream.
pub struct AggregatorService {
	providers: Vec<Provider>,
	adapter_registry: Arc<AdapterRegistry>,
}

impl AggregatorService {
	/// Create a new aggregator service with pre-configured providers
	pub fn new(providers: Vec<Provider>, adapter_registry: Arc<AdapterRegistry>) -> Self {
		Self {
			providers,
			adapter_registry,
		}
	}

	/// Validate that every provider references a registered adapter
	pub fn validate_providers(&self) -> Result<(), String> {
		for provider in &self.providers {
			if self.adapter_registry.get(&provider.adapter_id).is_none() {
				return Err(format!(
					"Provider '{}' references unknown adapter '{}'",
					provider.provider_id, provider.adapter_id
				));
			}
		}
		Ok(())
	}

	/// The configured providers, in invocation order
	pub fn providers(&self) -> &[Provider] {
		&self.providers
	}

	/// Resolve a service preference to the subset of providers to invoke
	///
	/// `None` selects every active provider. A preference naming one
	/// provider selects exactly that one; the rest are skipped, not
	/// invoked-and-discarded. An unknown preference is a client fault.
	fn select(&self, preference: Option<&str>) -> Result<Vec<&Provider>, QueryError> {
		match preference {
			None => Ok(self.providers.iter().filter(|p| p.is_active()).collect()),
			Some(preference) => {
				let provider = self
					.providers
					.iter()
					.find(|p| p.is_active() && p.provider_id == preference)
					.ok_or_else(|| QueryError::UnknownProvider {
						preference: preference.to_string(),
					})?;
				Ok(vec![provider])
			},
		}
	}

	/// Check a preference without dispatching anything
	pub fn validate_preference(&self, preference: Option<&str>) -> Result<(), QueryError> {
		self.select(preference).map(|_| ())
	}

	/// Fan the prompt out to the selected providers and wait for every
	/// call to settle
	///
	/// This is an all-settled join: no short-circuit on the first failure
	/// and no first-success race, so a partial vendor outage never hides
	/// the answers that did arrive. Each call runs under the provider's
	/// own deadline; a call that outlives it settles as a failure instead
	/// of stalling the aggregate. The returned outcomes preserve
	/// invocation order regardless of completion order.
	pub async fn dispatch(
		&self,
		prompt: &str,
		preference: Option<&str>,
	) -> Result<Vec<ProviderOutcome>, QueryError> {
		let selected = self.select(preference)?;

		info!(
			"Dispatching prompt to {} of {} providers",
			selected.len(),
			self.providers.len()
		);

		let provider_ids: Vec<String> =
			selected.iter().map(|p| p.provider_id.clone()).collect();

		let tasks = selected.into_iter().map(|provider| {
			let prompt = prompt.to_string();
			let provider = provider.clone();
			let adapter_registry = Arc::clone(&self.adapter_registry);

			tokio::spawn(async move {
				debug!("Starting completion from provider {}", provider.provider_id);

				let adapter = match adapter_registry.get(&provider.adapter_id) {
					Some(adapter) => adapter,
					None => {
						warn!(
							"No adapter found for provider {} (adapter_id: {})",
							provider.provider_id, provider.adapter_id
						);
						return ProviderResult::failure(format!(
							"adapter '{}' not registered",
							provider.adapter_id
						));
					},
				};

				let config = ProviderRuntimeConfig::from(&provider);
				let deadline = Duration::from_millis(provider.timeout_ms);

				match timeout(deadline, adapter.complete(&prompt, &config)).await {
					Ok(Ok(text)) => {
						debug!("Provider {} answered", provider.provider_id);
						ProviderResult::success(text)
					},
					Ok(Err(e)) => {
						warn!("Provider {} returned error: {}", provider.provider_id, e);
						ProviderResult::failure(e.to_string())
					},
					Err(_) => {
						warn!(
							"Provider {} timed out after {}ms",
							provider.provider_id, provider.timeout_ms
						);
						ProviderResult::failure(format!(
							"timed out after {}ms",
							provider.timeout_ms
						))
					},
				}
			})
		});

		// join_all preserves task order, which keeps outcomes index-stable
		let settled = join_all(tasks).await;

		let outcomes: Vec<ProviderOutcome> = settled
			.into_iter()
			.zip(provider_ids)
			.map(|(result, provider_id)| match result {
				Ok(result) => ProviderOutcome::new(provider_id, result),
				Err(e) => {
					warn!("Provider task for {} panicked: {}", provider_id, e);
					ProviderOutcome::new(
						provider_id,
						ProviderResult::failure("internal task failure"),
					)
				},
			})
			.collect();

		info!(
			"Aggregation settled: {} of {} providers succeeded",
			outcomes.iter().filter(|o| o.result.is_success()).count(),
			outcomes.len()
		);

		Ok(outcomes)
	}

	/// Perform health checks on all providers
	pub async fn health_check_all(&self) -> HashMap<String, bool> {
		let mut results = HashMap::new();

		for provider in &self.providers {
			if let Some(adapter) = self.adapter_registry.get(&provider.adapter_id) {
				let config = ProviderRuntimeConfig::from(provider);
				let healthy = matches!(adapter.health_check(&config).await, Ok(true));
				results.insert(provider.provider_id.clone(), healthy);
			} else {
				results.insert(provider.provider_id.clone(), false);
			}
		}

		results
	}

	/// Get aggregation statistics
	pub fn stats(&self) -> AggregationStats {
		AggregationStats {
			total_providers: self.providers.len(),
			registered_adapters: self.adapter_registry.len(),
		}
	}
}

/// Aggregation service statistics
#[derive(Debug, Clone)]
pub struct AggregationStats {
	pub total_providers: usize,
	pub registered_adapters: usize,
}
