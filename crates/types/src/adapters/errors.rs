//! Error types for adapter operations

use thiserror::Error;

/// Result type for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Adapter operation errors
///
/// Every vendor-side failure mode (network, status, payload shape) is
/// normalized into one of these variants at the adapter boundary. Nothing
/// vendor-specific escapes past it.
#[derive(Error, Debug)]
pub enum AdapterError {
	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("HTTP {status_code}: {reason}")]
	HttpStatus { status_code: u16, reason: String },

	#[error("Invalid response format: {reason}")]
	InvalidResponse { reason: String },

	#[error("Missing expected field in vendor payload: {field}")]
	MissingField { field: String },

	#[error("Configuration error: {reason}")]
	Config { reason: String },

	#[error("Adapter already registered: {adapter_id}")]
	AlreadyRegistered { adapter_id: String },
}

impl AdapterError {
	/// Extract the HTTP status code from the error if one is available
	pub fn status_code(&self) -> Option<u16> {
		match self {
			AdapterError::HttpStatus { status_code, .. } => Some(*status_code),
			AdapterError::Http(e) => e.status().map(|status| status.as_u16()),
			_ => None,
		}
	}

	/// Create an error from a non-2xx vendor response status
	pub fn from_http_failure(status_code: u16) -> Self {
		let reason = match status_code {
			400 => "Bad Request".to_string(),
			401 => "Unauthorized".to_string(),
			403 => "Forbidden".to_string(),
			404 => "Not Found".to_string(),
			408 => "Request Timeout".to_string(),
			429 => "Too Many Requests".to_string(),
			500 => "Internal Server Error".to_string(),
			502 => "Bad Gateway".to_string(),
			503 => "Service Unavailable".to_string(),
			504 => "Gateway Timeout".to_string(),
			_ => format!("HTTP Error {}", status_code),
		};

		Self::HttpStatus {
			status_code,
			reason,
		}
	}
}
