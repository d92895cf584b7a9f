//! Outbound query response model

use serde::{Deserialize, Serialize};

/// The merged answer returned to the caller
///
/// A cached answer is byte-identical to the fresh one it was computed from;
/// `fromCache` is the only way callers can tell the two apart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
	/// Composite answer text ("AI 1: ...", separated sections)
	pub response: String,
	/// Whether the answer was served from the cache
	pub from_cache: bool,
}

impl QueryResponse {
	pub fn fresh(response: String) -> Self {
		Self {
			response,
			from_cache: false,
		}
	}

	pub fn cached(response: String) -> Self {
		Self {
			response,
			from_cache: true,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_wire_shape() {
		let response = QueryResponse::cached("AI 1: hi".to_string());
		let json = serde_json::to_value(&response).unwrap();
		assert_eq!(json["response"], "AI 1: hi");
		assert_eq!(json["fromCache"], true);
	}
}
