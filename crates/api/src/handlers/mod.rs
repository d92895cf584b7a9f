//! HTTP request handlers

pub mod common;
pub mod conversations;
pub mod health;
pub mod providers;
pub mod queries;

pub use conversations::get_conversation_history;
pub use health::{health, ready};
pub use providers::get_providers;
pub use queries::post_query;
