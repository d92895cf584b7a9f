//! Chorus Config
//!
//! Configuration loading and settings for the chorus aggregator.

pub mod configurable_value;
pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use configurable_value::{ConfigurableValue, ConfigurableValueError};
pub use loader::load_config;
pub use settings::{
	CacheSettings, LogFormat, LoggingSettings, ProviderConfig, ServerSettings, Settings,
	TimeoutSettings,
};
pub use startup_logger::{log_service_info, log_startup_complete};
