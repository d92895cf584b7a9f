//! Query models
//!
//! A query is one user prompt fanned out to the configured providers. The
//! settled per-provider results are collected into an ordered outcome
//! sequence which the merger turns into a single composite answer.

pub mod errors;
pub mod request;
pub mod response;

pub use errors::{QueryError, QueryResult, QueryValidationError};
pub use request::QueryRequest;
pub use response::QueryResponse;

use serde::{Deserialize, Serialize};

/// Terminal result of one adapter invocation
///
/// Adapters themselves return `AdapterResult<String>`; the aggregator folds
/// each settled call into this shape so failures travel as data rather than
/// as errors. A failure carries only a reason string, never the vendor's
/// raw error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProviderResult {
	Success { text: String },
	Failure { reason: String },
}

impl ProviderResult {
	pub fn success(text: impl Into<String>) -> Self {
		Self::Success { text: text.into() }
	}

	pub fn failure(reason: impl Into<String>) -> Self {
		Self::Failure {
			reason: reason.into(),
		}
	}

	pub fn is_success(&self) -> bool {
		matches!(self, Self::Success { .. })
	}

	/// The answer text, if this result is a success
	pub fn text(&self) -> Option<&str> {
		match self {
			Self::Success { text } => Some(text),
			Self::Failure { .. } => None,
		}
	}
}

/// One provider's settled result within an aggregate
///
/// The aggregator returns outcomes in invocation order (index-stable), so
/// downstream labeling is deterministic for a fixed provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderOutcome {
	pub provider_id: String,
	pub result: ProviderResult,
}

impl ProviderOutcome {
	pub fn new(provider_id: impl Into<String>, result: ProviderResult) -> Self {
		Self {
			provider_id: provider_id.into(),
			result,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_provider_result_accessors() {
		let ok = ProviderResult::success("hello");
		assert!(ok.is_success());
		assert_eq!(ok.text(), Some("hello"));

		let err = ProviderResult::failure("connection refused");
		assert!(!err.is_success());
		assert_eq!(err.text(), None);
	}
}
