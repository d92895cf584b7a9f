//! Chorus Adapters
//!
//! Vendor-specific adapters for the chorus aggregator. Each adapter turns a
//! generic prompt into one AI vendor's request shape and extracts the answer
//! text from that vendor's response shape.

pub mod cohere_adapter;
pub mod gemini_adapter;
pub mod openai_adapter;

mod endpoint;

pub use cohere_adapter::CohereAdapter;
pub use gemini_adapter::GeminiAdapter;
pub use openai_adapter::OpenAiAdapter;

pub use chorus_types::{AdapterError, AdapterResult, ProviderAdapter};

use std::collections::HashMap;

/// Registry of available adapters, keyed by adapter ID
///
/// Providers reference adapters by ID; the registry is the only place that
/// knows which concrete implementations exist. Registering a custom adapter
/// is all it takes to support a new vendor.
pub struct AdapterRegistry {
	adapters: HashMap<String, Box<dyn ProviderAdapter>>,
}

impl AdapterRegistry {
	/// Create an empty registry
	pub fn new() -> Self {
		Self {
			adapters: HashMap::new(),
		}
	}

	/// Create a registry with all built-in adapters registered
	pub fn with_defaults() -> Self {
		let mut registry = Self::new();

		// Built-in adapters have distinct ids, so these cannot collide
		let defaults: Vec<Box<dyn ProviderAdapter>> = vec![
			Box::new(OpenAiAdapter::new()),
			Box::new(GeminiAdapter::new()),
			Box::new(CohereAdapter::new()),
		];
		for adapter in defaults {
			registry
				.adapters
				.insert(adapter.id().to_string(), adapter);
		}

		registry
	}

	/// Register an adapter under its own ID
	pub fn register(&mut self, adapter: Box<dyn ProviderAdapter>) -> AdapterResult<()> {
		let id = adapter.id().to_string();
		if self.adapters.contains_key(&id) {
			return Err(AdapterError::AlreadyRegistered { adapter_id: id });
		}
		self.adapters.insert(id, adapter);
		Ok(())
	}

	pub fn get(&self, adapter_id: &str) -> Option<&dyn ProviderAdapter> {
		self.adapters.get(adapter_id).map(|a| a.as_ref())
	}

	pub fn ids(&self) -> Vec<&str> {
		self.adapters.keys().map(|k| k.as_str()).collect()
	}

	pub fn len(&self) -> usize {
		self.adapters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.adapters.is_empty()
	}
}

impl Default for AdapterRegistry {
	fn default() -> Self {
		Self::with_defaults()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_registry_has_builtin_adapters() {
		let registry = AdapterRegistry::with_defaults();
		assert_eq!(registry.len(), 3);
		assert!(registry.get("openai-chat-v1").is_some());
		assert!(registry.get("gemini-v1").is_some());
		assert!(registry.get("cohere-chat-v1").is_some());
		assert!(registry.get("unknown").is_none());
	}

	#[test]
	fn test_register_rejects_duplicate_id() {
		let mut registry = AdapterRegistry::new();
		registry
			.register(Box::new(OpenAiAdapter::new()))
			.expect("first registration succeeds");

		let result = registry.register(Box::new(OpenAiAdapter::new()));
		assert!(matches!(
			result,
			Err(AdapterError::AlreadyRegistered { .. })
		));
	}
}
