//! Cohere chat adapter

use async_trait::async_trait;
use chorus_types::{
	Adapter, AdapterError, AdapterResult, ProviderAdapter, ProviderRuntimeConfig,
};
use reqwest::{
	header::{HeaderMap, HeaderValue},
	Client,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Chat request body
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
	model: &'a str,
	message: &'a str,
}

/// Chat response shape, trimmed to the extraction path
#[derive(Debug, Deserialize)]
struct ChatResponse {
	text: Option<String>,
}

/// Extract the answer text from a parsed chat response
fn extract_text(response: ChatResponse) -> AdapterResult<String> {
	response.text.ok_or(AdapterError::MissingField {
		field: "text".to_string(),
	})
}

/// Adapter for the Cohere chat API
#[derive(Debug)]
pub struct CohereAdapter {
	config: Adapter,
	client: Client,
}

impl CohereAdapter {
	pub fn new() -> Self {
		let mut headers = HeaderMap::new();
		headers.insert("Content-Type", HeaderValue::from_static("application/json"));
		headers.insert("User-Agent", HeaderValue::from_static("chorus-aggregator/0.3"));

		let client = Client::builder()
			.default_headers(headers)
			.build()
			.unwrap_or_default();

		Self {
			config: Adapter::new(
				"cohere-chat-v1".to_string(),
				"Cohere Chat".to_string(),
				Some("Cohere chat API".to_string()),
				"1.0.0".to_string(),
			),
			client,
		}
	}
}

impl Default for CohereAdapter {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl ProviderAdapter for CohereAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	async fn complete(
		&self,
		prompt: &str,
		config: &ProviderRuntimeConfig,
	) -> AdapterResult<String> {
		debug!(
			"Cohere adapter requesting completion via provider {} (model {})",
			config.provider_id, config.model
		);

		let url = crate::endpoint::join_url(&config.endpoint, "chat")?;
		let body = ChatRequest {
			model: &config.model,
			message: prompt,
		};

		let response = self
			.client
			.post(url)
			.bearer_auth(config.api_key.expose_secret())
			.timeout(Duration::from_millis(config.timeout_ms))
			.json(&body)
			.send()
			.await
			.map_err(AdapterError::Http)?;

		let status = response.status();
		if !status.is_success() {
			return Err(AdapterError::from_http_failure(status.as_u16()));
		}

		let parsed: ChatResponse =
			response
				.json()
				.await
				.map_err(|e| AdapterError::InvalidResponse {
					reason: format!("Failed to parse Cohere response: {}", e),
				})?;

		extract_text(parsed)
	}

	async fn health_check(&self, config: &ProviderRuntimeConfig) -> AdapterResult<bool> {
		let url = crate::endpoint::join_url(&config.endpoint, "check-api-key")?;
		let response = self
			.client
			.post(url)
			.bearer_auth(config.api_key.expose_secret())
			.timeout(Duration::from_millis(config.timeout_ms))
			.send()
			.await
			.map_err(AdapterError::Http)?;

		Ok(response.status().is_success())
	}
}
