//! Redis-backed cache for production deployments
//!
//! Only the response cache lives in Redis; expiry rides on the server-side
//! TTL (`SET .. EX`), so entries vanish on their own and need no sweeper.
//! Conversations stay in whatever [`ConversationStorage`] the builder was
//! given.
//!
//! [`ConversationStorage`]: crate::traits::ConversationStorage

use crate::traits::{CacheStorage, StorageError, StorageResult};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::time::Duration;
use tracing::debug;

/// Cache backend over a Redis connection manager
///
/// `ConnectionManager` multiplexes and reconnects internally, so cloning the
/// cache is cheap and all clones share one underlying connection.
#[derive(Clone)]
pub struct RedisCache {
	manager: ConnectionManager,
	connection_url: String,
}

impl RedisCache {
	/// Connect to Redis at the given URL (e.g. `redis://localhost:6379`)
	pub async fn connect(connection_url: &str) -> StorageResult<Self> {
		let client =
			redis::Client::open(connection_url).map_err(|e| StorageError::Connection {
				message: format!("Invalid Redis URL '{}': {}", connection_url, e),
			})?;

		let manager =
			ConnectionManager::new(client)
				.await
				.map_err(|e| StorageError::Connection {
					message: format!("Failed to connect to Redis: {}", e),
				})?;

		debug!("Connected to Redis at {}", connection_url);

		Ok(Self {
			manager,
			connection_url: connection_url.to_string(),
		})
	}

	pub fn connection_url(&self) -> &str {
		&self.connection_url
	}

	/// PING the server
	pub async fn ping(&self) -> StorageResult<bool> {
		let mut conn = self.manager.clone();
		let reply: String = redis::cmd("PING")
			.query_async(&mut conn)
			.await
			.map_err(|e| StorageError::Connection {
				message: format!("Redis PING failed: {}", e),
			})?;
		Ok(reply == "PONG")
	}
}

#[async_trait]
impl CacheStorage for RedisCache {
	async fn get_response(&self, fingerprint: &str) -> StorageResult<Option<String>> {
		let mut conn = self.manager.clone();
		conn.get::<_, Option<String>>(fingerprint)
			.await
			.map_err(|e| StorageError::Operation {
				message: format!("Redis GET failed: {}", e),
			})
	}

	async fn put_response(
		&self,
		fingerprint: &str,
		response: &str,
		ttl: Duration,
	) -> StorageResult<()> {
		let mut conn = self.manager.clone();
		// SET EX wants whole seconds; anything under a second still gets one
		let ttl_seconds = ttl.as_secs().max(1);
		conn.set_ex::<_, _, ()>(fingerprint, response, ttl_seconds)
			.await
			.map_err(|e| StorageError::Operation {
				message: format!("Redis SET failed: {}", e),
			})
	}
}
