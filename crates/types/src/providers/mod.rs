//! Provider models
//!
//! A provider is one configured AI vendor instance: which adapter speaks its
//! protocol, where its endpoint lives, which model to ask for, and the
//! credential to use.

use crate::models::SecretString;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type for provider validation
pub type ProviderValidationResult = Result<(), ProviderValidationError>;

/// Validation errors for provider configurations
#[derive(Error, Debug)]
pub enum ProviderValidationError {
	#[error("Provider ID must not be empty")]
	EmptyProviderId,

	#[error("Provider '{provider_id}' has no adapter ID")]
	EmptyAdapterId { provider_id: String },

	#[error("Provider '{provider_id}' has an invalid endpoint: {endpoint}")]
	InvalidEndpoint {
		provider_id: String,
		endpoint: String,
	},

	#[error("Provider '{provider_id}' has an empty API key")]
	EmptyApiKey { provider_id: String },
}

/// Operational status of a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderStatus {
	Active,
	Disabled,
}

/// One configured AI vendor instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
	/// Unique provider identifier, also the value accepted as a
	/// service preference on incoming queries
	pub provider_id: String,
	/// ID of the adapter that speaks this vendor's protocol
	pub adapter_id: String,
	/// Vendor API base endpoint
	pub endpoint: String,
	/// Vendor model identifier to request
	pub model: String,
	/// API credential (redacted in all serialized output)
	pub api_key: SecretString,
	/// Per-call deadline in milliseconds
	pub timeout_ms: u64,
	/// Extra headers to send with every vendor request
	pub headers: Option<HashMap<String, String>>,
	pub status: ProviderStatus,
	pub created_at: DateTime<Utc>,
}

impl Provider {
	pub fn new(
		provider_id: String,
		adapter_id: String,
		endpoint: String,
		model: String,
		api_key: SecretString,
		timeout_ms: u64,
	) -> Self {
		Self {
			provider_id,
			adapter_id,
			endpoint,
			model,
			api_key,
			timeout_ms,
			headers: None,
			status: ProviderStatus::Active,
			created_at: Utc::now(),
		}
	}

	pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
		self.headers = Some(headers);
		self
	}

	pub fn is_active(&self) -> bool {
		self.status == ProviderStatus::Active
	}

	/// Validate the provider configuration before it is registered
	pub fn validate(&self) -> ProviderValidationResult {
		if self.provider_id.trim().is_empty() {
			return Err(ProviderValidationError::EmptyProviderId);
		}
		if self.adapter_id.trim().is_empty() {
			return Err(ProviderValidationError::EmptyAdapterId {
				provider_id: self.provider_id.clone(),
			});
		}
		if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
			return Err(ProviderValidationError::InvalidEndpoint {
				provider_id: self.provider_id.clone(),
				endpoint: self.endpoint.clone(),
			});
		}
		if self.api_key.is_empty() {
			return Err(ProviderValidationError::EmptyApiKey {
				provider_id: self.provider_id.clone(),
			});
		}
		Ok(())
	}
}

/// Runtime configuration handed to an adapter for a single call
///
/// Derived from a [`Provider`] so adapters stay stateless: the same adapter
/// instance can serve any number of providers that speak its protocol.
#[derive(Debug, Clone)]
pub struct ProviderRuntimeConfig {
	pub provider_id: String,
	pub endpoint: String,
	pub model: String,
	pub api_key: SecretString,
	pub timeout_ms: u64,
	pub headers: Option<HashMap<String, String>>,
}

impl From<&Provider> for ProviderRuntimeConfig {
	fn from(provider: &Provider) -> Self {
		Self {
			provider_id: provider.provider_id.clone(),
			endpoint: provider.endpoint.clone(),
			model: provider.model.clone(),
			api_key: provider.api_key.clone(),
			timeout_ms: provider.timeout_ms,
			headers: provider.headers.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn test_provider() -> Provider {
		Provider::new(
			"openai".to_string(),
			"openai-chat-v1".to_string(),
			"https://api.openai.com/v1".to_string(),
			"gpt-4o-mini".to_string(),
			SecretString::from_str("sk-test"),
			30_000,
		)
	}

	#[test]
	fn test_valid_provider() {
		assert!(test_provider().validate().is_ok());
	}

	#[test]
	fn test_rejects_empty_provider_id() {
		let mut provider = test_provider();
		provider.provider_id = "  ".to_string();
		assert!(matches!(
			provider.validate(),
			Err(ProviderValidationError::EmptyProviderId)
		));
	}

	#[test]
	fn test_rejects_non_http_endpoint() {
		let mut provider = test_provider();
		provider.endpoint = "ftp://api.openai.com".to_string();
		assert!(matches!(
			provider.validate(),
			Err(ProviderValidationError::InvalidEndpoint { .. })
		));
	}

	#[test]
	fn test_rejects_empty_api_key() {
		let mut provider = test_provider();
		provider.api_key = SecretString::from_str("");
		assert!(matches!(
			provider.validate(),
			Err(ProviderValidationError::EmptyApiKey { .. })
		));
	}

	#[test]
	fn test_runtime_config_from_provider() {
		let provider = test_provider();
		let config = ProviderRuntimeConfig::from(&provider);
		assert_eq!(config.provider_id, "openai");
		assert_eq!(config.model, "gpt-4o-mini");
		assert_eq!(config.timeout_ms, 30_000);
	}
}
