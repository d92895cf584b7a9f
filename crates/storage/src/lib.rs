//! Chorus Storage
//!
//! Pluggable storage backends for the chorus aggregator: an in-memory store
//! for development and tests, and a Redis-backed cache for production.

pub mod memory_store;
pub mod redis_cache;
pub mod traits;

pub use memory_store::MemoryStore;
pub use redis_cache::RedisCache;
pub use traits::{CacheStorage, ConversationStorage, Storage, StorageError, StorageResult};
