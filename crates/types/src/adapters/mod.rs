//! Adapter metadata and contracts
//!
//! An adapter translates a generic prompt into one AI vendor's
//! request/response shape. Everything vendor-specific lives behind the
//! [`ProviderAdapter`] trait; adding a vendor means adding one adapter and
//! nothing else.

pub mod errors;
pub mod traits;

pub use errors::{AdapterError, AdapterResult};
pub use traits::ProviderAdapter;

use serde::{Deserialize, Serialize};

/// Static metadata describing an adapter implementation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adapter {
	/// Unique adapter identifier (referenced by provider configs)
	pub adapter_id: String,
	/// Human-readable adapter name
	pub name: String,
	/// Optional description of the vendor integration
	pub description: Option<String>,
	/// Adapter version
	pub version: String,
}

impl Adapter {
	pub fn new(
		adapter_id: String,
		name: String,
		description: Option<String>,
		version: String,
	) -> Self {
		Self {
			adapter_id,
			name,
			description,
			version,
		}
	}
}
