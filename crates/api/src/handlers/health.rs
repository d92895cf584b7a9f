use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;

use crate::state::AppState;

/// GET /health - Liveness probe
pub async fn health() -> &'static str {
	"OK"
}

/// Readiness response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessResponse {
	pub status: String,
	pub version: String,
	pub storage_healthy: bool,
	pub providers: std::collections::HashMap<String, bool>,
}

/// GET /ready - Readiness probe with storage and provider checks
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
	let storage_healthy = state.storage.health_check().await.unwrap_or(false);
	let providers = state.aggregator_service.health_check_all().await;
	let providers_healthy = providers.values().all(|v| *v) || providers.is_empty();

	let overall = storage_healthy && providers_healthy;
	let status = if overall { "ready" } else { "degraded" };

	let body = ReadinessResponse {
		status: status.to_string(),
		version: env!("CARGO_PKG_VERSION").to_string(),
		storage_healthy,
		providers,
	};
	let code = if overall {
		StatusCode::OK
	} else {
		StatusCode::SERVICE_UNAVAILABLE
	};
	(code, Json(body))
}
