//! Configuration settings structures

use crate::configurable_value::{ConfigurableValue, ConfigurableValueError};
use chorus_types::Provider;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
	pub server: ServerSettings,
	pub providers: HashMap<String, ProviderConfig>,
	pub timeouts: TimeoutSettings,
	pub cache: CacheSettings,
	pub logging: LoggingSettings,
}

/// Server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
}

/// Individual provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
	pub provider_id: String,
	pub adapter_id: String,
	pub endpoint: String,
	pub model: String,
	/// API credential, usually `{ type = "env", value = "OPENAI_API_KEY" }`
	pub api_key: ConfigurableValue,
	/// Per-call deadline; falls back to `timeouts.per_provider_ms`
	pub timeout_ms: Option<u64>,
	pub enabled: bool,
	pub headers: Option<HashMap<String, String>>,
}

impl ProviderConfig {
	/// Build the domain provider, resolving the credential
	pub fn to_provider(&self, default_timeout_ms: u64) -> Result<Provider, ConfigurableValueError> {
		let api_key = self.api_key.resolve_for_secret()?;
		let mut provider = Provider::new(
			self.provider_id.clone(),
			self.adapter_id.clone(),
			self.endpoint.clone(),
			self.model.clone(),
			api_key,
			self.timeout_ms.unwrap_or(default_timeout_ms),
		);
		if let Some(headers) = &self.headers {
			provider = provider.with_headers(headers.clone());
		}
		Ok(provider)
	}
}

/// Timeout configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TimeoutSettings {
	/// Deadline applied to each provider invocation in milliseconds.
	/// A provider that blows past it settles as a failure; the rest of the
	/// aggregate is unaffected.
	pub per_provider_ms: u64,
}

/// Response cache configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheSettings {
	/// Absolute entry lifetime in seconds, measured from the write
	pub ttl_seconds: u64,
	/// Redis connection URL; in-memory cache when absent
	pub redis_url: Option<String>,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			server: ServerSettings {
				host: "0.0.0.0".to_string(),
				port: 3000,
			},
			providers: HashMap::new(),
			timeouts: TimeoutSettings {
				per_provider_ms: 30_000,
			},
			cache: CacheSettings {
				ttl_seconds: 600,
				redis_url: None,
			},
			logging: LoggingSettings {
				level: "info".to_string(),
				format: LogFormat::Pretty,
				structured: false,
			},
		}
	}
}

impl Settings {
	/// Get server bind address
	pub fn bind_address(&self) -> String {
		format!("{}:{}", self.server.host, self.server.port)
	}

	/// Get enabled providers only
	pub fn enabled_providers(&self) -> HashMap<String, ProviderConfig> {
		self.providers
			.iter()
			.filter(|(_, config)| config.enabled)
			.map(|(k, v)| (k.clone(), v.clone()))
			.collect()
	}

	/// Cache TTL as a std duration
	pub fn cache_ttl(&self) -> std::time::Duration {
		std::time::Duration::from_secs(self.cache.ttl_seconds)
	}
}
