//! End-to-end tests starting a live HTTP server

use reqwest::Client;
use serde_json::json;

mod mocks;
use mocks::TestServer;

#[tokio::test]
async fn test_health_endpoint() {
	let (server, _adapters) = TestServer::spawn_two_replying()
		.await
		.expect("Failed to start server");

	let response = reqwest::get(&format!("{}/health", server.base_url))
		.await
		.expect("Failed to get health endpoint");

	assert_eq!(response.status(), 200);
	assert_eq!(response.text().await.expect("Failed to read body"), "OK");

	server.handle.abort();
}

#[tokio::test]
async fn test_ready_endpoint() {
	let (server, _adapters) = TestServer::spawn_two_replying()
		.await
		.expect("Failed to start server");

	let response = reqwest::get(&format!("{}/ready", server.base_url))
		.await
		.expect("Failed to get ready endpoint");

	assert_eq!(response.status(), 200);

	let json_body: serde_json::Value = response
		.json()
		.await
		.expect("Failed to parse JSON response");

	assert_eq!(json_body["status"], "ready");
	assert!(json_body["storageHealthy"].as_bool().unwrap());
	assert_eq!(
		json_body["version"].as_str().unwrap(),
		env!("CARGO_PKG_VERSION")
	);

	server.handle.abort();
}

#[tokio::test]
async fn test_ready_degraded_when_provider_unhealthy() {
	let server = TestServer::spawn_mixed()
		.await
		.expect("Failed to start server");

	let response = reqwest::get(&format!("{}/ready", server.base_url))
		.await
		.expect("Failed to get ready endpoint");

	assert_eq!(response.status(), 503);

	let json_body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
	assert_eq!(json_body["status"], "degraded");
	assert_eq!(json_body["providers"]["broken"], false);

	server.handle.abort();
}

#[tokio::test]
async fn test_query_merges_answers_in_provider_order() {
	let (server, _adapters) = TestServer::spawn_two_replying()
		.await
		.expect("Failed to start server");

	let client = Client::new();
	let response = client
		.post(format!("{}/api/v1/queries", server.base_url))
		.json(&json!({ "userId": "u1", "message": "hello" }))
		.send()
		.await
		.expect("Failed to post query");

	assert_eq!(response.status(), 200);

	let json_body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
	assert_eq!(
		json_body["response"],
		"AI 1: Alpha answer\n\n---\n\nAI 2: Beta answer"
	);
	assert_eq!(json_body["fromCache"], false);

	server.handle.abort();
}

#[tokio::test]
async fn test_query_second_call_served_from_cache() {
	let (server, adapters) = TestServer::spawn_two_replying()
		.await
		.expect("Failed to start server");
	let client = Client::new();
	let body = json!({ "userId": "u1", "message": "hello" });

	let first: serde_json::Value = client
		.post(format!("{}/api/v1/queries", server.base_url))
		.json(&body)
		.send()
		.await
		.expect("Failed to post query")
		.json()
		.await
		.expect("Failed to parse JSON");
	assert_eq!(first["fromCache"], false);

	let second: serde_json::Value = client
		.post(format!("{}/api/v1/queries", server.base_url))
		.json(&body)
		.send()
		.await
		.expect("Failed to post query")
		.json()
		.await
		.expect("Failed to parse JSON");

	assert_eq!(second["fromCache"], true);
	assert_eq!(second["response"], first["response"]);

	// Cached replay never reaches the providers
	for adapter in &adapters {
		assert_eq!(adapter.call_count(), 1);
	}

	server.handle.abort();
}

#[tokio::test]
async fn test_query_merge_skips_failed_provider() {
	let server = TestServer::spawn_mixed()
		.await
		.expect("Failed to start server");

	let client = Client::new();
	let response = client
		.post(format!("{}/api/v1/queries", server.base_url))
		.json(&json!({ "userId": "u1", "message": "hello" }))
		.send()
		.await
		.expect("Failed to post query");

	assert_eq!(response.status(), 200);

	let json_body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
	// The failure is dropped from the merge, not rendered as a blank slot
	assert_eq!(json_body["response"], "AI 1: Alpha answer");

	server.handle.abort();
}

#[tokio::test]
async fn test_query_all_providers_failed() {
	let server = TestServer::spawn_all_failing()
		.await
		.expect("Failed to start server");
	let client = Client::new();
	let body = json!({ "userId": "u1", "message": "hello" });

	let response = client
		.post(format!("{}/api/v1/queries", server.base_url))
		.json(&body)
		.send()
		.await
		.expect("Failed to post query");

	assert_eq!(response.status(), 502);

	let json_body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
	assert_eq!(json_body["error"], "ALL_PROVIDERS_FAILED");
	assert_eq!(json_body["message"], "All AI services failed");

	// The failure must not be cached: the retry fails again instead of
	// replaying a cached error
	let retry = client
		.post(format!("{}/api/v1/queries", server.base_url))
		.json(&body)
		.send()
		.await
		.expect("Failed to post query");
	assert_eq!(retry.status(), 502);

	server.handle.abort();
}

#[tokio::test]
async fn test_query_rejects_empty_message() {
	let (server, adapters) = TestServer::spawn_two_replying()
		.await
		.expect("Failed to start server");

	let client = Client::new();
	let response = client
		.post(format!("{}/api/v1/queries", server.base_url))
		.json(&json!({ "userId": "u1", "message": "   " }))
		.send()
		.await
		.expect("Failed to post query");

	assert_eq!(response.status(), 400);

	let json_body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
	assert_eq!(json_body["error"], "VALIDATION_ERROR");

	for adapter in &adapters {
		assert_eq!(adapter.call_count(), 0);
	}

	server.handle.abort();
}

#[tokio::test]
async fn test_query_rejects_unknown_preference() {
	let (server, adapters) = TestServer::spawn_two_replying()
		.await
		.expect("Failed to start server");

	let client = Client::new();
	let response = client
		.post(format!("{}/api/v1/queries", server.base_url))
		.json(&json!({
			"userId": "u1",
			"message": "hello",
			"aiServicePreference": "no-such-provider"
		}))
		.send()
		.await
		.expect("Failed to post query");

	assert_eq!(response.status(), 400);

	let json_body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
	assert_eq!(json_body["error"], "UNKNOWN_PROVIDER");

	// Rejected before any provider is invoked
	for adapter in &adapters {
		assert_eq!(adapter.call_count(), 0);
	}

	server.handle.abort();
}

#[tokio::test]
async fn test_query_preference_selects_single_provider() {
	let (server, adapters) = TestServer::spawn_two_replying()
		.await
		.expect("Failed to start server");

	let client = Client::new();
	let response = client
		.post(format!("{}/api/v1/queries", server.base_url))
		.json(&json!({
			"userId": "u1",
			"message": "hello",
			"aiServicePreference": "beta"
		}))
		.send()
		.await
		.expect("Failed to post query");

	assert_eq!(response.status(), 200);

	let json_body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
	assert_eq!(json_body["response"], "AI 1: Beta answer");

	// alpha was skipped entirely, not invoked and discarded
	assert_eq!(adapters[0].call_count(), 0);
	assert_eq!(adapters[1].call_count(), 1);

	server.handle.abort();
}

#[tokio::test]
async fn test_providers_endpoint() {
	let (server, _adapters) = TestServer::spawn_two_replying()
		.await
		.expect("Failed to start server");

	let response = reqwest::get(&format!("{}/api/v1/providers", server.base_url))
		.await
		.expect("Failed to get providers endpoint");

	assert_eq!(response.status(), 200);

	let json_body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
	assert_eq!(json_body["total"], 2);
	assert!(json_body["providers"].is_array());
	assert_eq!(json_body["providers"][0]["providerId"], "alpha");
	// The credential never appears in the listing
	assert!(json_body["providers"][0].get("apiKey").is_none());

	server.handle.abort();
}

#[tokio::test]
async fn test_conversation_recorded_after_query() {
	let (server, _adapters) = TestServer::spawn_two_replying()
		.await
		.expect("Failed to start server");
	let client = Client::new();

	let response = client
		.post(format!("{}/api/v1/queries", server.base_url))
		.json(&json!({ "userId": "u42", "message": "remember me" }))
		.send()
		.await
		.expect("Failed to post query");
	assert_eq!(response.status(), 200);

	// The append runs off the request path
	tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

	let history: serde_json::Value =
		reqwest::get(&format!("{}/api/v1/conversations/u42", server.base_url))
			.await
			.expect("Failed to get conversations endpoint")
			.json()
			.await
			.expect("Failed to parse JSON");

	assert_eq!(history["userId"], "u42");
	assert_eq!(history["totalTurns"], 1);
	assert_eq!(history["turns"][0]["prompt"], "remember me");
	assert_eq!(
		history["turns"][0]["response"],
		"AI 1: Alpha answer\n\n---\n\nAI 2: Beta answer"
	);

	server.handle.abort();
}

#[tokio::test]
async fn test_conversation_history_empty_for_unknown_user() {
	let (server, _adapters) = TestServer::spawn_two_replying()
		.await
		.expect("Failed to start server");

	let history: serde_json::Value =
		reqwest::get(&format!("{}/api/v1/conversations/nobody", server.base_url))
			.await
			.expect("Failed to get conversations endpoint")
			.json()
			.await
			.expect("Failed to parse JSON");

	assert_eq!(history["totalTurns"], 0);

	server.handle.abort();
}
