//! Endpoint URL handling shared by the adapters

use chorus_types::{AdapterError, AdapterResult};
use url::Url;

/// Join a vendor base endpoint with a request path
///
/// Trailing slashes on the endpoint and leading slashes on the path are
/// tolerated so config values do not have to agree on either.
pub(crate) fn join_url(endpoint: &str, path: &str) -> AdapterResult<Url> {
	let base = format!("{}/", endpoint.trim_end_matches('/'));
	let url = Url::parse(&base)
		.and_then(|base| base.join(path.trim_start_matches('/')))
		.map_err(|e| AdapterError::Config {
			reason: format!("Invalid endpoint '{}': {}", endpoint, e),
		})?;
	Ok(url)
}
