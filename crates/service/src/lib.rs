//! Chorus Service
//!
//! Core logic: provider fan-out, response merging, and query orchestration.

pub mod aggregator;
pub mod conversation;
pub mod merger;
pub mod query;

pub use aggregator::{AggregationStats, AggregatorService};
pub use conversation::{ConversationService, ConversationServiceTrait};
pub use merger::{merge, MergeError, RESPONSE_SEPARATOR};
pub use query::{QueryService, QueryServiceTrait};
