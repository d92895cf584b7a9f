//! Storage traits for pluggable backends
//!
//! The cache and the conversation store are separate seams: deployments
//! commonly back the cache with Redis while conversations live elsewhere.
//! `MemoryStore` implements both for development and tests.

use super::errors::StorageResult;
use crate::conversations::{Conversation, Turn};
use async_trait::async_trait;
use std::time::Duration;

/// Merged-response cache keyed by request fingerprint
///
/// Entries expire a fixed TTL after the write (absolute, not sliding).
/// There is no invalidation API beyond expiry.
#[async_trait]
pub trait CacheStorage: Send + Sync {
	/// Look up a cached merged response. Expired entries are a miss.
	async fn get_response(&self, fingerprint: &str) -> StorageResult<Option<String>>;

	/// Store a merged response under the fingerprint with the given TTL.
	/// Overwrites any existing entry (last write wins).
	async fn put_response(
		&self,
		fingerprint: &str,
		response: &str,
		ttl: Duration,
	) -> StorageResult<()>;
}

/// Durable conversation history, append-only per record
#[async_trait]
pub trait ConversationStorage: Send + Sync {
	/// Append a turn to the (user, service label) conversation, creating
	/// the record on first use.
	async fn append_turn(
		&self,
		user_id: &str,
		service_label: &str,
		turn: Turn,
	) -> StorageResult<()>;

	/// Fetch one conversation record, if it exists
	async fn get_conversation(
		&self,
		user_id: &str,
		service_label: &str,
	) -> StorageResult<Option<Conversation>>;

	/// All turns recorded for a user across service labels,
	/// oldest first
	async fn list_turns(&self, user_id: &str) -> StorageResult<Vec<Turn>>;
}

/// Counters reported by a storage backend
#[derive(Debug, Clone, Default)]
pub struct StorageStats {
	pub cached_responses: usize,
	pub conversations: usize,
	pub total_turns: usize,
}

/// Combined storage backend with lifecycle hooks
#[async_trait]
pub trait Storage: CacheStorage + ConversationStorage {
	/// Spawn backend-owned background maintenance such as TTL sweeps.
	/// Called once at startup, inside a runtime. No-op by default.
	fn start_maintenance(&self) {}

	async fn health_check(&self) -> StorageResult<bool>;

	async fn stats(&self) -> StorageResult<StorageStats>;

	/// Release connections / stop background work on shutdown
	async fn close(&self) -> StorageResult<()>;
}
