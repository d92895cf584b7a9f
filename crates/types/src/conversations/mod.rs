//! Conversation history models
//!
//! One conversation record exists per (user, service label) pair; turns are
//! appended to it and never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One prompt/response exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
	pub prompt: String,
	pub response: String,
	pub created_at: DateTime<Utc>,
}

impl Turn {
	pub fn new(prompt: impl Into<String>, response: impl Into<String>) -> Self {
		Self {
			prompt: prompt.into(),
			response: response.into(),
			created_at: Utc::now(),
		}
	}
}

/// Durable conversation record for one (user, service label) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
	pub conversation_id: String,
	pub user_id: String,
	/// Which provider (or "all") produced the answers in this record
	pub service_label: String,
	pub turns: Vec<Turn>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl Conversation {
	pub fn new(user_id: impl Into<String>, service_label: impl Into<String>) -> Self {
		let now = Utc::now();
		Self {
			conversation_id: Uuid::new_v4().to_string(),
			user_id: user_id.into(),
			service_label: service_label.into(),
			turns: Vec::new(),
			created_at: now,
			updated_at: now,
		}
	}

	/// Append a turn; existing turns are never rewritten
	pub fn push_turn(&mut self, turn: Turn) {
		self.updated_at = turn.created_at;
		self.turns.push(turn);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_push_turn_appends_and_bumps_updated_at() {
		let mut conversation = Conversation::new("user-1", "all");
		assert!(conversation.turns.is_empty());

		conversation.push_turn(Turn::new("hi", "AI 1: hello"));
		conversation.push_turn(Turn::new("again", "AI 1: hello again"));

		assert_eq!(conversation.turns.len(), 2);
		assert_eq!(conversation.turns[0].prompt, "hi");
		assert_eq!(
			conversation.updated_at,
			conversation.turns[1].created_at
		);
	}
}
