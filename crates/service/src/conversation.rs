//! Conversation history reads

use async_trait::async_trait;
use chorus_types::{Conversation, ConversationStorage, StorageResult, Turn};
use std::sync::Arc;

/// Read-side contract for conversation history
#[async_trait]
pub trait ConversationServiceTrait: Send + Sync {
	/// All turns recorded for a user, oldest first
	async fn history(&self, user_id: &str) -> StorageResult<Vec<Turn>>;

	/// One conversation record, if it exists
	async fn conversation(
		&self,
		user_id: &str,
		service_label: &str,
	) -> StorageResult<Option<Conversation>>;
}

/// Thin read service over the conversation store
pub struct ConversationService {
	storage: Arc<dyn ConversationStorage>,
}

impl ConversationService {
	pub fn new(storage: Arc<dyn ConversationStorage>) -> Self {
		Self { storage }
	}
}

#[async_trait]
impl ConversationServiceTrait for ConversationService {
	async fn history(&self, user_id: &str) -> StorageResult<Vec<Turn>> {
		self.storage.list_turns(user_id).await
	}

	async fn conversation(
		&self,
		user_id: &str,
		service_label: &str,
	) -> StorageResult<Option<Conversation>> {
		self.storage.get_conversation(user_id, service_label).await
	}
}
