use axum::{extract::State, http::StatusCode, response::Json};
use tracing::info;

use crate::handlers::common::{error_reply, ErrorResponse};
use crate::state::AppState;
use chorus_types::{QueryError, QueryRequest, QueryResponse};

/// POST /api/v1/queries - Ask the configured AI providers
pub async fn post_query(
	State(state): State<AppState>,
	Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, (StatusCode, Json<ErrorResponse>)> {
	info!(
		"Received query from user {} (preference: {})",
		request.user_id,
		request.preference().unwrap_or("all")
	);

	let response = state
		.query_service
		.execute(request)
		.await
		.map_err(map_query_error)?;

	info!(
		"Returning {} answer ({} bytes)",
		if response.from_cache { "cached" } else { "fresh" },
		response.response.len()
	);
	Ok(Json(response))
}

fn map_query_error(error: QueryError) -> (StatusCode, Json<ErrorResponse>) {
	match &error {
		QueryError::Validation(e) => {
			error_reply(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
		},
		QueryError::UnknownProvider { .. } => {
			error_reply(StatusCode::BAD_REQUEST, "UNKNOWN_PROVIDER", error.to_string())
		},
		QueryError::AllProvidersFailed => error_reply(
			StatusCode::BAD_GATEWAY,
			"ALL_PROVIDERS_FAILED",
			"All AI services failed",
		),
		QueryError::Storage(e) => error_reply(
			StatusCode::INTERNAL_SERVER_ERROR,
			"STORAGE_ERROR",
			e.to_string(),
		),
	}
}
