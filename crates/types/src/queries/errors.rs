//! Error types for query processing

use crate::storage::StorageError;
use thiserror::Error;

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Validation errors for incoming query requests
#[derive(Error, Debug)]
pub enum QueryValidationError {
	#[error("userId is required")]
	MissingUserId,

	#[error("message must not be empty")]
	EmptyMessage,
}

/// Errors surfaced while answering a query
#[derive(Error, Debug)]
pub enum QueryError {
	#[error("Invalid request: {0}")]
	Validation(#[from] QueryValidationError),

	#[error("Unknown AI service preference: {preference}")]
	UnknownProvider { preference: String },

	#[error("All AI services failed")]
	AllProvidersFailed,

	#[error("Storage error: {0}")]
	Storage(#[from] StorageError),
}

impl QueryError {
	/// Whether the caller is at fault (as opposed to a server-side failure)
	pub fn is_client_fault(&self) -> bool {
		matches!(
			self,
			QueryError::Validation(_) | QueryError::UnknownProvider { .. }
		)
	}
}
