//! Core adapter trait for vendor integrations

use super::{Adapter, AdapterResult};
use crate::providers::ProviderRuntimeConfig;
use async_trait::async_trait;
use std::fmt::Debug;

/// Core trait every AI vendor adapter must implement
///
/// An adapter issues exactly one outbound HTTP call per completion and
/// returns either the extracted answer text or a normalized
/// [`AdapterError`](super::AdapterError). It must never panic on a vendor
/// response and never retries on its own; a vendor hiccup is a single
/// failure, not a retry loop.
#[async_trait]
pub trait ProviderAdapter: Send + Sync + Debug {
	/// Get adapter metadata
	fn adapter_info(&self) -> &Adapter;

	/// Adapter ID (for registration and provider matching)
	fn id(&self) -> &str {
		&self.adapter_info().adapter_id
	}

	/// Human-readable adapter name
	fn name(&self) -> &str {
		&self.adapter_info().name
	}

	/// Request a completion for the prompt from the vendor
	///
	/// Returns the extracted answer text on success. All vendor failure
	/// modes (network error, non-2xx status, malformed payload, missing
	/// field) come back as `Err`, never as a panic.
	async fn complete(
		&self,
		prompt: &str,
		config: &ProviderRuntimeConfig,
	) -> AdapterResult<String>;

	/// Cheap reachability probe against the vendor
	async fn health_check(&self, config: &ProviderRuntimeConfig) -> AdapterResult<bool>;
}
