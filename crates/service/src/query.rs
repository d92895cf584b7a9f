//! Query orchestration
//!
//! Ties the cache, the fan-out aggregator, the merger, and the conversation
//! store together into the single path a query travels: cache lookup, then
//! fan-out and merge on a miss, then cache write and a detached history
//! append.

use crate::aggregator::AggregatorService;
use crate::merger::{self, MergeError};
use async_trait::async_trait;
use chorus_types::{
	CacheStorage, ConversationStorage, QueryError, QueryRequest, QueryResponse, QueryResult,
	Turn,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Service label recorded for fan-out-to-all answers
const ALL_SERVICES_LABEL: &str = "all";

/// Behavioral contract of the query path, for handler injection and mocking
#[async_trait]
pub trait QueryServiceTrait: Send + Sync {
	async fn execute(&self, request: QueryRequest) -> QueryResult<QueryResponse>;
}

/// Orchestrates a query end to end
///
/// All collaborators are injected; the service owns no connections of its
/// own and holds no per-request state.
pub struct QueryService {
	aggregator: Arc<AggregatorService>,
	cache: Arc<dyn CacheStorage>,
	conversations: Arc<dyn ConversationStorage>,
	cache_ttl: Duration,
}

impl QueryService {
	pub fn new(
		aggregator: Arc<AggregatorService>,
		cache: Arc<dyn CacheStorage>,
		conversations: Arc<dyn ConversationStorage>,
		cache_ttl: Duration,
	) -> Self {
		Self {
			aggregator,
			cache,
			conversations,
			cache_ttl,
		}
	}

	/// Record the turn off the request path
	///
	/// Durability here is best-effort: the answer has already been
	/// computed, so a failed append is logged and swallowed rather than
	/// failing the caller.
	fn append_turn_detached(&self, request: &QueryRequest, response: &str) {
		let conversations = Arc::clone(&self.conversations);
		let user_id = request.user_id.clone();
		let service_label = request
			.preference()
			.unwrap_or(ALL_SERVICES_LABEL)
			.to_string();
		let turn = Turn::new(request.message.clone(), response.to_string());

		tokio::spawn(async move {
			if let Err(e) = conversations
				.append_turn(&user_id, &service_label, turn)
				.await
			{
				warn!(
					"Failed to append conversation turn for user {}: {}",
					user_id, e
				);
			}
		});
	}
}

#[async_trait]
impl QueryServiceTrait for QueryService {
	async fn execute(&self, request: QueryRequest) -> QueryResult<QueryResponse> {
		// Client faults are rejected before any adapter or store is touched
		request.validate()?;
		let preference = request.preference().map(str::to_owned);
		self.aggregator.validate_preference(preference.as_deref())?;

		let fingerprint = request.fingerprint();

		// A cache fault downgrades to a miss; it never fails the request
		match self.cache.get_response(&fingerprint).await {
			Ok(Some(cached)) => {
				debug!("Cache hit for user {}", request.user_id);
				return Ok(QueryResponse::cached(cached));
			},
			Ok(None) => {},
			Err(e) => {
				warn!("Cache read failed, treating as miss: {}", e);
			},
		}

		let outcomes = self
			.aggregator
			.dispatch(&request.message, preference.as_deref())
			.await?;

		let merged = match merger::merge(&outcomes) {
			Ok(merged) => merged,
			Err(MergeError::AllFailed) => {
				// A transient total outage must not poison the cache for
				// the TTL window, so nothing is written here
				info!(
					"All {} dispatched providers failed for user {}",
					outcomes.len(),
					request.user_id
				);
				return Err(QueryError::AllProvidersFailed);
			},
		};

		if let Err(e) = self
			.cache
			.put_response(&fingerprint, &merged, self.cache_ttl)
			.await
		{
			warn!("Cache write failed, returning fresh result anyway: {}", e);
		}

		self.append_turn_detached(&request, &merged);

		Ok(QueryResponse::fresh(merged))
	}
}
