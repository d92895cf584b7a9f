//! Chorus Types
//!
//! Shared models and traits for the chorus aggregator.
//! This crate contains all domain models organized by business entity.

pub mod adapters;
pub mod conversations;
pub mod models;
pub mod providers;
pub mod queries;
pub mod storage;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

// Re-export commonly used types for convenience
pub use queries::{
	ProviderOutcome, ProviderResult, QueryError, QueryRequest, QueryResponse, QueryResult,
	QueryValidationError,
};

pub use providers::{
	Provider, ProviderRuntimeConfig, ProviderStatus, ProviderValidationError,
	ProviderValidationResult,
};

pub use adapters::{Adapter, AdapterError, AdapterResult, ProviderAdapter};

pub use conversations::{Conversation, Turn};

pub use models::SecretString;

pub use storage::{
	CacheStorage, ConversationStorage, Storage, StorageError, StorageResult, StorageStats,
};
