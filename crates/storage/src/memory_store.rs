//! In-memory storage implementation using DashMap with TTL support

use crate::traits::{
	CacheStorage, ConversationStorage, Storage, StorageResult, StorageStats,
};
use async_trait::async_trait;
use chorus_types::{Conversation, Turn};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::debug;

/// A cached merged response with its absolute expiry
#[derive(Debug, Clone)]
struct CachedEntry {
	response: String,
	expires_at: DateTime<Utc>,
}

impl CachedEntry {
	fn is_expired(&self) -> bool {
		self.expires_at <= Utc::now()
	}
}

/// In-memory cache and conversation store
///
/// Cache entries carry an absolute expiry; expired entries are treated as
/// misses on read and swept periodically by the cleanup task. Conversations
/// are keyed by (user, service label).
#[derive(Clone, Default)]
pub struct MemoryStore {
	responses: Arc<DashMap<String, CachedEntry>>,
	conversations: Arc<DashMap<(String, String), Conversation>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self {
			responses: Arc::new(DashMap::new()),
			conversations: Arc::new(DashMap::new()),
		}
	}

	/// Start the periodic sweep of expired cache entries
	pub fn start_ttl_cleanup(&self) -> tokio::task::JoinHandle<()> {
		let responses = Arc::clone(&self.responses);
		tokio::spawn(async move {
			let mut cleanup_interval = interval(Duration::from_secs(60));

			loop {
				cleanup_interval.tick().await;

				let before = responses.len();
				responses.retain(|_, entry| !entry.is_expired());
				let removed = before - responses.len();
				if removed > 0 {
					debug!("Cleaned up {} expired cached responses", removed);
				}
			}
		})
	}

	/// Remove expired cache entries immediately, returning how many went
	pub fn cleanup_expired(&self) -> usize {
		let before = self.responses.len();
		self.responses.retain(|_, entry| !entry.is_expired());
		before - self.responses.len()
	}
}

#[async_trait]
impl CacheStorage for MemoryStore {
	async fn get_response(&self, fingerprint: &str) -> StorageResult<Option<String>> {
		// Read-through expiry: a stale entry is a miss even before the
		// sweep gets to it
		if let Some(entry) = self.responses.get(fingerprint) {
			if !entry.is_expired() {
				return Ok(Some(entry.response.clone()));
			}
		}
		self.responses
			.remove_if(fingerprint, |_, entry| entry.is_expired());
		Ok(None)
	}

	async fn put_response(
		&self,
		fingerprint: &str,
		response: &str,
		ttl: Duration,
	) -> StorageResult<()> {
		let expires_at = Utc::now()
			+ chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::zero());
		self.responses.insert(
			fingerprint.to_string(),
			CachedEntry {
				response: response.to_string(),
				expires_at,
			},
		);
		Ok(())
	}
}

#[async_trait]
impl ConversationStorage for MemoryStore {
	async fn append_turn(
		&self,
		user_id: &str,
		service_label: &str,
		turn: Turn,
	) -> StorageResult<()> {
		let key = (user_id.to_string(), service_label.to_string());
		let mut conversation = self
			.conversations
			.entry(key)
			.or_insert_with(|| Conversation::new(user_id, service_label));
		conversation.push_turn(turn);
		Ok(())
	}

	async fn get_conversation(
		&self,
		user_id: &str,
		service_label: &str,
	) -> StorageResult<Option<Conversation>> {
		let key = (user_id.to_string(), service_label.to_string());
		Ok(self.conversations.get(&key).map(|c| c.clone()))
	}

	async fn list_turns(&self, user_id: &str) -> StorageResult<Vec<Turn>> {
		let mut turns: Vec<Turn> = self
			.conversations
			.iter()
			.filter(|entry| entry.key().0 == user_id)
			.flat_map(|entry| entry.value().turns.clone())
			.collect();
		turns.sort_by_key(|turn| turn.created_at);
		Ok(turns)
	}
}

#[async_trait]
impl Storage for MemoryStore {
	fn start_maintenance(&self) {
		self.start_ttl_cleanup();
	}

	async fn health_check(&self) -> StorageResult<bool> {
		Ok(true)
	}

	async fn stats(&self) -> StorageResult<StorageStats> {
		let total_turns = self
			.conversations
			.iter()
			.map(|entry| entry.value().turns.len())
			.sum();

		Ok(StorageStats {
			cached_responses: self.responses.len(),
			conversations: self.conversations.len(),
			total_turns,
		})
	}

	async fn close(&self) -> StorageResult<()> {
		Ok(())
	}
}
