//! Test server for integration tests
//!
//! Spawns the full application on an ephemeral port with mock adapters so
//! tests exercise the real router, services, and storage.

use axum::Router;
use chorus_aggregator::{
	api::routes::create_router,
	mocks::{mock_provider, MockProviderAdapter},
	AggregatorBuilder,
};
use tokio::task::JoinHandle;

/// Test server instance bound to an ephemeral port
pub struct TestServer {
	#[allow(dead_code)]
	pub base_url: String,
	pub handle: JoinHandle<()>,
}

impl TestServer {
	/// Spawn a server with two providers that both answer
	///
	/// Returns the adapters so tests can assert call counts.
	#[allow(dead_code)]
	pub async fn spawn_two_replying(
	) -> Result<(Self, Vec<MockProviderAdapter>), Box<dyn std::error::Error>> {
		let alpha = MockProviderAdapter::replying("mock-alpha", "Alpha answer");
		let beta = MockProviderAdapter::replying("mock-beta", "Beta answer");
		let adapters = vec![alpha.clone(), beta.clone()];

		let server = Self::spawn_with(vec![
			(Box::new(alpha), mock_provider("alpha", "mock-alpha")),
			(Box::new(beta), mock_provider("beta", "mock-beta")),
		])
		.await?;

		Ok((server, adapters))
	}

	/// Spawn a server where one provider answers and one always fails
	#[allow(dead_code)]
	pub async fn spawn_mixed() -> Result<Self, Box<dyn std::error::Error>> {
		let alpha = MockProviderAdapter::replying("mock-alpha", "Alpha answer");
		let broken = MockProviderAdapter::failing("mock-broken", "vendor exploded");

		Self::spawn_with(vec![
			(Box::new(alpha), mock_provider("alpha", "mock-alpha")),
			(Box::new(broken), mock_provider("broken", "mock-broken")),
		])
		.await
	}

	/// Spawn a server where every provider fails
	#[allow(dead_code)]
	pub async fn spawn_all_failing() -> Result<Self, Box<dyn std::error::Error>> {
		let broken = MockProviderAdapter::failing("mock-broken", "vendor exploded");

		Self::spawn_with(vec![(
			Box::new(broken),
			mock_provider("broken", "mock-broken"),
		)])
		.await
	}

	async fn spawn_with(
		providers: Vec<(Box<MockProviderAdapter>, chorus_aggregator::Provider)>,
	) -> Result<Self, Box<dyn std::error::Error>> {
		let mut builder = AggregatorBuilder::default();
		for (adapter, provider) in providers {
			builder = builder.with_adapter(adapter).with_provider(provider);
		}

		let (_router, state) = builder.start().await?;
		let app: Router = create_router().with_state(state);

		Self::spawn_server_with_app(app).await
	}

	/// Common server spawning logic
	async fn spawn_server_with_app(app: Router) -> Result<Self, Box<dyn std::error::Error>> {
		let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
			.await
			.expect("bind test port");
		let addr = listener.local_addr().unwrap();
		let base_url = format!("http://{}:{}", addr.ip(), addr.port());

		let handle = tokio::spawn(async move {
			let _ = axum::serve(listener, app).await;
		});

		// Give server time to start
		tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

		Ok(Self { base_url, handle })
	}

	#[allow(dead_code)]
	pub fn abort(self) {
		self.handle.abort();
	}
}
