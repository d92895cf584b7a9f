//! Storage traits for pluggable storage implementations

// Re-export the storage traits from the types crate
pub use chorus_types::storage::{
	CacheStorage, ConversationStorage, Storage, StorageError, StorageResult, StorageStats,
};
