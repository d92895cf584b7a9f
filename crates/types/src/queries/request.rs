//! Incoming query request model and validation

use super::errors::QueryValidationError;
use serde::{Deserialize, Serialize};

/// Preference value that means "ask every provider"
pub const PREFERENCE_ALL: &str = "all";

/// An incoming user query
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
	/// Identifier of the requesting user; part of the cache fingerprint
	pub user_id: String,
	/// The prompt text, passed to adapters verbatim
	pub message: String,
	/// Optional single-provider preference. Absent or `"all"` means
	/// every enabled provider is asked.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub ai_service_preference: Option<String>,
}

impl QueryRequest {
	pub fn new(user_id: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			user_id: user_id.into(),
			message: message.into(),
			ai_service_preference: None,
		}
	}

	pub fn with_preference(mut self, preference: impl Into<String>) -> Self {
		self.ai_service_preference = Some(preference.into());
		self
	}

	/// The effective preference: `None` when absent, empty, or `"all"`
	pub fn preference(&self) -> Option<&str> {
		match self.ai_service_preference.as_deref() {
			None | Some("") | Some(PREFERENCE_ALL) => None,
			Some(preference) => Some(preference),
		}
	}

	/// Cache fingerprint for this request
	///
	/// Deterministic concatenation of user and prompt. Deliberately no
	/// normalization: whitespace or case differences produce distinct
	/// entries.
	pub fn fingerprint(&self) -> String {
		format!("ai:{}:{}", self.user_id, self.message)
	}

	/// Reject structurally invalid requests before any adapter is invoked
	pub fn validate(&self) -> Result<(), QueryValidationError> {
		if self.user_id.trim().is_empty() {
			return Err(QueryValidationError::MissingUserId);
		}
		if self.message.trim().is_empty() {
			return Err(QueryValidationError::EmptyMessage);
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_validate_rejects_missing_user() {
		let request = QueryRequest::new("", "hello");
		assert!(matches!(
			request.validate(),
			Err(QueryValidationError::MissingUserId)
		));
	}

	#[test]
	fn test_validate_rejects_empty_message() {
		let request = QueryRequest::new("user-1", "   ");
		assert!(matches!(
			request.validate(),
			Err(QueryValidationError::EmptyMessage)
		));
	}

	#[test]
	fn test_preference_normalization() {
		assert_eq!(QueryRequest::new("u", "m").preference(), None);
		assert_eq!(
			QueryRequest::new("u", "m").with_preference("all").preference(),
			None
		);
		assert_eq!(
			QueryRequest::new("u", "m").with_preference("").preference(),
			None
		);
		assert_eq!(
			QueryRequest::new("u", "m")
				.with_preference("gemini")
				.preference(),
			Some("gemini")
		);
	}

	#[test]
	fn test_fingerprint_is_deterministic_and_unnormalized() {
		let a = QueryRequest::new("u1", "Hello");
		let b = QueryRequest::new("u1", "Hello");
		let c = QueryRequest::new("u1", "hello");

		assert_eq!(a.fingerprint(), b.fingerprint());
		assert_eq!(a.fingerprint(), "ai:u1:Hello");
		// Case differences are distinct entries by design
		assert_ne!(a.fingerprint(), c.fingerprint());
	}

	#[test]
	fn test_wire_shape_is_camel_case() {
		let json = r#"{"userId":"u1","message":"hi","aiServicePreference":"openai"}"#;
		let request: QueryRequest = serde_json::from_str(json).unwrap();
		assert_eq!(request.user_id, "u1");
		assert_eq!(request.preference(), Some("openai"));
	}
}
