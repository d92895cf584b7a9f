//! OpenAI chat completions adapter

use async_trait::async_trait;
use chorus_types::{
	Adapter, AdapterError, AdapterResult, ProviderAdapter, ProviderRuntimeConfig,
};
use reqwest::{
	header::{HeaderMap, HeaderValue},
	Client,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Chat completions request body
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
	model: &'a str,
	messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
	role: &'a str,
	content: &'a str,
}

/// Chat completions response shape
///
/// Only the fields the extraction path touches are modeled; everything else
/// in the vendor payload is ignored.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
	choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
	message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
	content: Option<String>,
}

/// Extract the answer text from a parsed chat completions response
fn extract_text(response: ChatCompletionResponse) -> AdapterResult<String> {
	let choice = response
		.choices
		.into_iter()
		.next()
		.ok_or(AdapterError::MissingField {
			field: "choices[0]".to_string(),
		})?;

	choice
		.message
		.content
		.ok_or(AdapterError::MissingField {
			field: "choices[0].message.content".to_string(),
		})
}

/// Adapter for the OpenAI chat completions API
#[derive(Debug)]
pub struct OpenAiAdapter {
	config: Adapter,
	client: Client,
}

impl OpenAiAdapter {
	pub fn new() -> Self {
		let mut headers = HeaderMap::new();
		headers.insert("Content-Type", HeaderValue::from_static("application/json"));
		headers.insert("User-Agent", HeaderValue::from_static("chorus-aggregator/0.3"));

		// Default headers cannot fail to build, so this cannot either
		let client = Client::builder()
			.default_headers(headers)
			.build()
			.unwrap_or_default();

		Self {
			config: Adapter::new(
				"openai-chat-v1".to_string(),
				"OpenAI Chat".to_string(),
				Some("OpenAI chat completions API".to_string()),
				"1.0.0".to_string(),
			),
			client,
		}
	}

	fn apply_custom_headers(
		mut request: reqwest::RequestBuilder,
		config: &ProviderRuntimeConfig,
	) -> reqwest::RequestBuilder {
		if let Some(headers) = &config.headers {
			for (key, value) in headers {
				if let (Ok(name), Ok(value)) = (
					reqwest::header::HeaderName::from_str(key),
					HeaderValue::from_str(value),
				) {
					request = request.header(name, value);
				}
			}
		}
		request
	}
}

impl Default for OpenAiAdapter {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl ProviderAdapter for OpenAiAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	async fn complete(
		&self,
		prompt: &str,
		config: &ProviderRuntimeConfig,
	) -> AdapterResult<String> {
		debug!(
			"OpenAI adapter requesting completion via provider {} (model {})",
			config.provider_id, config.model
		);

		let url = crate::endpoint::join_url(&config.endpoint, "chat/completions")?;
		let body = ChatCompletionRequest {
			model: &config.model,
			messages: vec![ChatMessage {
				role: "user",
				content: prompt,
			}],
		};

		let request = self
			.client
			.post(url)
			.bearer_auth(config.api_key.expose_secret())
			.timeout(Duration::from_millis(config.timeout_ms))
			.json(&body);
		let response = Self::apply_custom_headers(request, config)
			.send()
			.await
			.map_err(AdapterError::Http)?;

		let status = response.status();
		if !status.is_success() {
			return Err(AdapterError::from_http_failure(status.as_u16()));
		}

		let parsed: ChatCompletionResponse =
			response
				.json()
				.await
				.map_err(|e| AdapterError::InvalidResponse {
					reason: format!("Failed to parse OpenAI response: {}", e),
				})?;

		extract_text(parsed)
	}

	async fn health_check(&self, config: &ProviderRuntimeConfig) -> AdapterResult<bool> {
		let url = crate::endpoint::join_url(&config.endpoint, "models")?;
		let response = self
			.client
			.get(url)
			.bearer_auth(config.api_key.expose_secret())
			.timeout(Duration::from_millis(config.timeout_ms))
			.send()
			.await
			.map_err(AdapterError::Http)?;

		Ok(response.status().is_success())
	}
}
