use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::Json,
};
use serde::Serialize;
use tracing::info;

use crate::handlers::common::{error_reply, ErrorResponse};
use crate::state::AppState;
use chorus_types::Turn;

/// Conversation history response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationHistoryResponse {
	pub user_id: String,
	pub total_turns: usize,
	pub turns: Vec<Turn>,
}

/// GET /api/v1/conversations/{user_id} - Recorded turns for a user
pub async fn get_conversation_history(
	State(state): State<AppState>,
	Path(user_id): Path<String>,
) -> Result<Json<ConversationHistoryResponse>, (StatusCode, Json<ErrorResponse>)> {
	let turns = state
		.conversation_service
		.history(&user_id)
		.await
		.map_err(|e| {
			error_reply(
				StatusCode::INTERNAL_SERVER_ERROR,
				"STORAGE_ERROR",
				e.to_string(),
			)
		})?;

	info!("Returning {} turns for user {}", turns.len(), user_id);

	Ok(Json(ConversationHistoryResponse {
		total_turns: turns.len(),
		user_id,
		turns,
	}))
}
