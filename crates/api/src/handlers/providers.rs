use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::state::AppState;
use chorus_types::{Provider, ProviderStatus};

/// Public view of one configured provider
///
/// Deliberately excludes the credential and endpoint details.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSummary {
	pub provider_id: String,
	pub adapter_id: String,
	pub model: String,
	pub status: ProviderStatus,
}

impl From<&Provider> for ProviderSummary {
	fn from(provider: &Provider) -> Self {
		Self {
			provider_id: provider.provider_id.clone(),
			adapter_id: provider.adapter_id.clone(),
			model: provider.model.clone(),
			status: provider.status,
		}
	}
}

/// Providers listing response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvidersResponse {
	pub total: usize,
	pub providers: Vec<ProviderSummary>,
}

/// GET /api/v1/providers - List configured providers
pub async fn get_providers(State(state): State<AppState>) -> Json<ProvidersResponse> {
	let providers: Vec<ProviderSummary> = state
		.aggregator_service
		.providers()
		.iter()
		.map(ProviderSummary::from)
		.collect();

	Json(ProvidersResponse {
		total: providers.len(),
		providers,
	})
}
