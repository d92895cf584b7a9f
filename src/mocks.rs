//! Mock adapters for examples and testing
//!
//! This module provides simple, working mock adapters that can be used
//! in examples and tests without real vendor credentials.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use chorus_types::{
	Adapter, AdapterError, AdapterResult, Provider, ProviderAdapter, ProviderRuntimeConfig,
	SecretString,
};

/// Scripted behavior for a [`MockProviderAdapter`]
#[derive(Debug, Clone)]
enum MockBehavior {
	/// Answer every prompt with the given text
	Reply(String),
	/// Fail every call with the given reason
	Fail(String),
	/// Never complete, forcing the caller's timeout to fire
	Hang,
}

/// Configurable mock adapter
///
/// Tracks how many completions were requested so tests can assert which
/// providers were actually invoked.
#[derive(Debug, Clone)]
pub struct MockProviderAdapter {
	adapter: Adapter,
	behavior: MockBehavior,
	calls: Arc<AtomicUsize>,
}

impl MockProviderAdapter {
	fn with_behavior(adapter_id: &str, behavior: MockBehavior) -> Self {
		Self {
			adapter: Adapter::new(
				adapter_id.to_string(),
				format!("Mock adapter {}", adapter_id),
				Some("Mock adapter for examples and tests".to_string()),
				"1.0.0".to_string(),
			),
			behavior,
			calls: Arc::new(AtomicUsize::new(0)),
		}
	}

	/// Adapter that answers every prompt with `reply`
	pub fn replying(adapter_id: &str, reply: &str) -> Self {
		Self::with_behavior(adapter_id, MockBehavior::Reply(reply.to_string()))
	}

	/// Adapter that fails every call with `reason`
	pub fn failing(adapter_id: &str, reason: &str) -> Self {
		Self::with_behavior(adapter_id, MockBehavior::Fail(reason.to_string()))
	}

	/// Adapter that never completes a call
	pub fn hanging(adapter_id: &str) -> Self {
		Self::with_behavior(adapter_id, MockBehavior::Hang)
	}

	/// Number of completion calls received so far
	pub fn call_count(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl ProviderAdapter for MockProviderAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.adapter
	}

	async fn complete(
		&self,
		_prompt: &str,
		_config: &ProviderRuntimeConfig,
	) -> AdapterResult<String> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		match &self.behavior {
			MockBehavior::Reply(reply) => Ok(reply.clone()),
			MockBehavior::Fail(reason) => Err(AdapterError::InvalidResponse {
				reason: reason.clone(),
			}),
			MockBehavior::Hang => {
				std::future::pending::<()>().await;
				unreachable!("pending future never resolves")
			},
		}
	}

	async fn health_check(&self, _config: &ProviderRuntimeConfig) -> AdapterResult<bool> {
		Ok(!matches!(self.behavior, MockBehavior::Fail(_)))
	}
}

/// Provider wired to a mock adapter, valid by construction
pub fn mock_provider(provider_id: &str, adapter_id: &str) -> Provider {
	Provider::new(
		provider_id.to_string(),
		adapter_id.to_string(),
		"http://localhost:8080".to_string(),
		"mock-model".to_string(),
		SecretString::from_str("mock-key"),
		3_000,
	)
}
