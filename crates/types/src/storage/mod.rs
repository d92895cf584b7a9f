//! Storage traits and errors

pub mod errors;
pub mod traits;

pub use errors::{StorageError, StorageResult};
pub use traits::{CacheStorage, ConversationStorage, Storage, StorageStats};
