//! Startup logging helpers

use tracing::info;

/// Log service identification at startup
pub fn log_service_info() {
	info!(
		"Starting chorus aggregator v{}",
		env!("CARGO_PKG_VERSION")
	);
	info!(
		"Build profile: {}",
		if cfg!(debug_assertions) {
			"debug"
		} else {
			"release"
		}
	);
}

/// Log startup completion with the bound address
pub fn log_startup_complete(bind_address: &str) {
	info!("chorus aggregator listening on {}", bind_address);
}
