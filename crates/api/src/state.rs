use std::sync::Arc;

use chorus_service::{AggregatorService, ConversationServiceTrait, QueryServiceTrait};
use chorus_storage::Storage;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
	pub query_service: Arc<dyn QueryServiceTrait>,
	pub conversation_service: Arc<dyn ConversationServiceTrait>,
	pub aggregator_service: Arc<AggregatorService>,
	pub storage: Arc<dyn Storage>,
}
