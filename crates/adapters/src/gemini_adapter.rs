//! Google Gemini generateContent adapter

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

/// generateContent request body
#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
	contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
	parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
	text: &'a str,
}

/// generateContent response shape, trimmed to the extraction path
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
	candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
	content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
	parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
	text: Option<String>,
}

/// Extract the answer text from a parsed generateContent response
///
/// Gemini nests the text three levels deep and every level is optional in
/// practice (safety blocks return candidates without content), so each hop
/// maps to its own missing-field failure.
fn extract_text(response: GenerateContentResponse) -> AdapterResult<String> {
	let candidate = response
		.candidates
		.and_then(|c| c.into_iter().next())
		.ok_or(AdapterError::MissingField {
			field: "candidates[0]".to_string(),
		})?;

	let part = candidate
		.content
		.and_then(|c| c.parts)
		.and_then(|p| p.into_iter().next())
		.ok_or(AdapterError::MissingField {
			field: "candidates[0].content.parts[0]".to_string(),
		})?;

	part.text.ok_or(AdapterError::MissingField {
		field: "candidates[0].content.parts[0].text".to_string(),
	})
}

/// Adapter for the Google Gemini generateContent API
#[derive(Debug)]
pub struct GeminiAdapter {
	config: Adapter,
	client: Client,
}

impl GeminiAdapter {
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
				"gemini-v1".to_string(),
				"Google Gemini".to_string(),
				Some("Google Gemini generateContent API".to_string()),
				"1.0.0".to_string(),
			),
			client,
		}
	}
}

impl Default for GeminiAdapter {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl ProviderAdapter for GeminiAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	async fn complete(
		&self,
		prompt: &str,
		config: &ProviderRuntimeConfig,
	) -> AdapterResult<String> {
		debug!(
			"Gemini adapter requesting completion via provider {} (model {})",
			config.provider_id, config.model
		);

		// The key travels in a header rather than the query string so it
		// can never end up in access logs
		let path = format!("models/{}:generateContent", config.model);
		let url = crate::endpoint::join_url(&config.endpoint, &path)?;
		let body = GenerateContentRequest {
			contents: vec![Content {
				parts: vec![Part { text: prompt }],
			}],
		};

		let response = self
			.client
			.post(url)
			.header("x-goog-api-key", config.api_key.expose_secret())
			.timeout(Duration::from_millis(config.timeout_ms))
			.json(&body)
			.send()
			.await
			.map_err(AdapterError::Http)?;

		let status = response.status();
		if !status.is_success() {
			return Err(AdapterError::from_http_failure(status.as_u16()));
		}

		let parsed: GenerateContentResponse =
			response
				.json()
				.await
				.map_err(|e| AdapterError::InvalidResponse {
					reason: format!("Failed to parse Gemini response: {}", e),
				})?;

		extract_text(parsed)
	}

	async fn health_check(&self, config: &ProviderRuntimeConfig) -> AdapterResult<bool> {
		let url = crate::endpoint::join_url(&config.endpoint, "models")?;
		let response = self
			.client
			.get(url)
			.header("x-goog-api-key", config.api_key.expose_secret())
			.timeout(Duration::from_millis(config.timeout_ms))
			.send()
			.await
			.map_err(AdapterError::Http)?;

		Ok(response.status().is_success())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_extract_text_happy_path() {
		let response: GenerateContentResponse = serde_json::from_value(json!({
			"candidates": [{
				"content": {"parts": [{"text": "bonjour"}], "role": "model"}
			}]
		}))
		.unwrap();

		assert_eq!(extract_text(response).unwrap(), "bonjour");
	}

	#[test]
	fn test_extract_text_no_candidates() {
		let response: GenerateContentResponse =
			serde_json::from_value(json!({"candidates": []})).unwrap();

		assert!(matches!(
			extract_text(response),
			Err(AdapterError::MissingField { field }) if field == "candidates[0]"
		));
	}

	#[test]
	fn test_extract_text_safety_blocked_candidate() {
		// A blocked candidate arrives without content
		let response: GenerateContentResponse = serde_json::from_value(json!({
			"candidates": [{"finishReason": "SAFETY"}]
		}))
		.unwrap();

		assert!(matches!(
			extract_text(response),
			Err(AdapterError::MissingField { .. })
		));
	}

	#[test]
	fn test_adapter_metadata() {
		let adapter = GeminiAdapter::new();
		assert_eq!(adapter.id(), "gemini-v1");
	}
}
