//! Chorus Aggregator Library
//!
//! Fans a single user question out to multiple third-party AI services,
//! merges the answers into one labeled response, and caches the result.

use chorus_service::{
	ConversationService, ConversationServiceTrait, QueryService, QueryServiceTrait,
};

// Core domain types - the most commonly used types
pub use chorus_types::{
	chrono,
	// External dependencies for convenience
	serde_json,
	// Core types
	Adapter,
	AdapterError,
	AdapterResult,
	Conversation,
	// Primary domain entities
	Provider,
	ProviderAdapter,
	ProviderOutcome,
	ProviderResult,
	ProviderRuntimeConfig,
	ProviderStatus,
	// Error types
	QueryError,
	QueryRequest,
	QueryResponse,
	QueryValidationError,
	SecretString,
	Turn,
};

// Service layer
pub use chorus_service::{
	merge, AggregationStats, AggregatorService, MergeError, RESPONSE_SEPARATOR,
};

// Storage layer
pub use chorus_storage::{
	traits::{CacheStorage, ConversationStorage, StorageError, StorageResult},
	MemoryStore, RedisCache, Storage,
};

// Storage traits module for advanced usage
pub mod traits {
	pub use chorus_storage::traits::*;
}

// API layer
pub use chorus_api::{create_router, AppState};

// Adapters
pub use chorus_adapters::AdapterRegistry;

// Config
pub use chorus_config::{load_config, log_service_info, log_startup_complete, Settings};

// Module aliases for backward compatibility
pub mod models {
	pub use chorus_types::*;
}

pub mod storage {
	pub use chorus_storage::*;
}

pub mod config {
	pub use chorus_config::*;
}

pub mod adapters {
	pub use chorus_adapters::*;
}

pub mod api {
	pub use chorus_api::*;
	pub mod routes {
		pub use chorus_api::{create_router, AppState};
	}
}

pub mod service {
	pub use chorus_service::*;
}

pub mod mocks;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

// Re-export external dependencies for examples
pub use async_trait;
pub use reqwest;

/// Builder pattern for configuring the aggregator
pub struct AggregatorBuilder<S = MemoryStore>
where
	S: Storage + 'static,
{
	settings: Option<Settings>,
	storage: S,
	cache: Option<Arc<dyn CacheStorage>>,
	adapter_registry: Option<AdapterRegistry>,
	providers: Vec<Provider>,
}

// Default constructor using MemoryStore for convenience
impl Default for AggregatorBuilder<MemoryStore> {
	fn default() -> Self {
		Self::new()
	}
}

impl AggregatorBuilder<MemoryStore> {
	/// Create a new aggregator builder with default memory storage
	pub fn new() -> Self {
		Self::with_storage(MemoryStore::new())
	}

	/// Create aggregator builder from configuration using default memory storage
	pub fn from_config(settings: Settings) -> Self {
		Self::new().with_settings(settings)
	}
}

impl<S> AggregatorBuilder<S>
where
	S: Storage + Clone + 'static,
{
	/// Create a new aggregator builder with the provided storage
	pub fn with_storage(storage: S) -> Self {
		Self {
			settings: None,
			storage,
			cache: None,
			adapter_registry: None,
			providers: Vec::new(),
		}
	}

	/// Back the response cache with a dedicated store (e.g. Redis) while
	/// conversations stay in the main storage backend
	pub fn with_cache(mut self, cache: Arc<dyn CacheStorage>) -> Self {
		self.cache = Some(cache);
		self
	}

	/// Register a custom adapter (uses adapter's own ID)
	/// Panics if adapter registration fails (this is intentional for startup-time configuration errors)
	pub fn with_adapter(mut self, adapter: Box<dyn ProviderAdapter>) -> Self {
		let mut registry = self
			.adapter_registry
			.unwrap_or_else(AdapterRegistry::with_defaults);
		registry.register(adapter).expect(
			"Failed to register adapter during startup - this is a fatal configuration error",
		);
		self.adapter_registry = Some(registry);
		self
	}

	/// Add a provider to the aggregator
	pub fn with_provider(mut self, provider: Provider) -> Self {
		self.providers.push(provider);
		self
	}

	/// Set custom settings
	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Get the current settings
	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	/// Resolve providers from settings plus any added via with_provider()
	///
	/// Settings-derived providers are sorted by id so dispatch order (and
	/// the numbering of merged answers) does not depend on map iteration.
	fn collect_providers(&self, settings: &Settings) -> Result<Vec<Provider>, String> {
		let mut errors = Vec::new();
		let mut from_settings = Vec::new();

		for (id, provider_config) in settings.enabled_providers() {
			match provider_config.to_provider(settings.timeouts.per_provider_ms) {
				Ok(provider) => from_settings.push(provider),
				Err(e) => errors.push(format!("Provider '{}' configuration failed: {}", id, e)),
			}
		}
		from_settings.sort_by(|a, b| a.provider_id.cmp(&b.provider_id));

		let mut providers = from_settings;
		providers.extend(self.providers.iter().cloned());

		for provider in &providers {
			if let Err(validation_error) = provider.validate() {
				errors.push(format!(
					"Provider '{}' validation failed: {}",
					provider.provider_id, validation_error
				));
			}
		}

		if !errors.is_empty() {
			return Err(format!(
				"Configuration errors found:\n{}",
				errors.join("\n")
			));
		}

		Ok(providers)
	}

	/// Initialize tracing with configuration-based settings
	fn init_tracing_from_settings(
		&self,
		settings: &Settings,
	) -> Result<(), Box<dyn std::error::Error>> {
		use chorus_config::settings::LogFormat;

		// Create env filter using config level or environment variable
		let log_level = &settings.logging.level;
		let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

		// Initialize tracing with the configuration
		match settings.logging.format {
			LogFormat::Json => {
				let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);

				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).init();
				} else {
					subscriber.init();
				}
			},
			LogFormat::Pretty => {
				let subscriber = tracing_subscriber::fmt()
					.pretty()
					.with_env_filter(env_filter);

				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).init();
				} else {
					subscriber.init();
				}
			},
			LogFormat::Compact => {
				let subscriber = tracing_subscriber::fmt()
					.compact()
					.with_env_filter(env_filter);

				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).init();
				} else {
					subscriber.init();
				}
			},
		}

		info!(
			"Logging configuration applied: level={}, format={:?}, structured={}",
			settings.logging.level, settings.logging.format, settings.logging.structured
		);

		Ok(())
	}

	/// Start the aggregator and return the configured router with state
	pub async fn start(self) -> Result<(axum::Router, AppState), Box<dyn std::error::Error>> {
		let settings = self.settings.clone().unwrap_or_default();

		let providers = self.collect_providers(&settings)?;
		info!(
			"Successfully initialized with {} provider(s)",
			providers.len()
		);

		// Use custom registry or create with defaults
		let adapter_registry = Arc::new(
			self.adapter_registry
				.unwrap_or_else(AdapterRegistry::with_defaults),
		);

		let aggregator_service =
			AggregatorService::new(providers, Arc::clone(&adapter_registry));

		// Validate that all providers have matching adapters
		aggregator_service
			.validate_providers()
			.map_err(|e| format!("Provider validation failed: {}", e))?;

		// Storage-owned background work (TTL sweeps) starts here, inside
		// the runtime
		self.storage.start_maintenance();

		// Create application state
		let storage_arc: Arc<dyn Storage> = Arc::new(self.storage.clone());
		let conversations: Arc<dyn ConversationStorage> = Arc::new(self.storage.clone());
		let cache: Arc<dyn CacheStorage> = match self.cache {
			Some(cache) => cache,
			None => Arc::new(self.storage.clone()),
		};

		let aggregator_service = Arc::new(aggregator_service);
		let query_service = QueryService::new(
			Arc::clone(&aggregator_service),
			cache,
			Arc::clone(&conversations),
			settings.cache_ttl(),
		);

		let app_state = AppState {
			query_service: Arc::new(query_service) as Arc<dyn QueryServiceTrait>,
			conversation_service: Arc::new(ConversationService::new(conversations))
				as Arc<dyn ConversationServiceTrait>,
			aggregator_service,
			storage: storage_arc,
		};

		// Create router with state
		let router = create_router().with_state(app_state.clone());

		Ok((router, app_state))
	}

	/// Start the complete server with all defaults and setup
	/// This method handles everything needed to run the server, including:
	/// - Loading .env file
	/// - Loading configuration with defaults
	/// - Initializing tracing
	/// - Connecting the Redis cache when configured
	/// - Binding and serving the application
	pub async fn start_server(mut self) -> Result<(), Box<dyn std::error::Error>> {
		// Load .env file if it exists
		dotenvy::dotenv().ok();

		// Use provided settings or load from config with defaults
		let using_provided_settings = self.settings.is_some();
		let settings = if using_provided_settings {
			self.settings.take().unwrap()
		} else {
			load_config().unwrap_or_default()
		};

		// Initialize tracing with configuration-based settings
		self.init_tracing_from_settings(&settings)?;

		// Log comprehensive service startup information
		log_service_info();

		info!(
			"Using configuration: loaded from {}",
			if using_provided_settings {
				"provided settings"
			} else {
				"config file or defaults"
			}
		);

		// Log enabled providers
		let enabled_providers = settings.enabled_providers();
		info!("Enabled providers: {}", enabled_providers.len());
		for (id, provider) in &enabled_providers {
			info!(
				"  - {}: {} (model {})",
				id, provider.endpoint, provider.model
			);
		}

		// Connect the Redis cache when one is configured; conversations
		// stay in the main storage backend either way
		if self.cache.is_none() {
			if let Some(redis_url) = settings.cache.redis_url.clone() {
				let redis = RedisCache::connect(&redis_url).await?;
				info!("Response cache backed by Redis at {}", redis_url);
				self.cache = Some(Arc::new(redis));
			}
		}

		// Parse bind address
		let bind_addr = settings.bind_address();
		let addr: SocketAddr = bind_addr
			.parse()
			.map_err(|e| format!("Invalid bind address '{}': {}", bind_addr, e))?;

		// Ensure we have proper configuration in the builder
		if self.settings.is_none() {
			self.settings = Some(settings.clone());
		}

		// Create the router using the builder pattern
		let (app, _) = self.start().await?;

		// Start the server
		let listener = tokio::net::TcpListener::bind(addr).await?;

		// Log startup completion with comprehensive information
		log_startup_complete(&bind_addr);
		info!("API endpoints available:");
		info!("  GET  /health");
		info!("  GET  /ready");
		info!("  POST /api/v1/queries");
		info!("  GET  /api/v1/providers");
		info!("  GET  /api/v1/conversations/{{user_id}}");

		axum::serve(listener, app).await?;

		Ok(())
	}
}
