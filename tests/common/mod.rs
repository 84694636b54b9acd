//! Shared fixtures for the integration suites.

#![allow(dead_code)]

// crates.io
use httpmock::{Mock, prelude::*};
use serde_json::json;
use time::{OffsetDateTime, macros};
// self
use mpesa_client::{ReqwestMpesaClient, auth::ClientConfig, clock::ManualClock, url::Url};

pub const CONSUMER_KEY: &str = "key";
pub const CONSUMER_SECRET: &str = "secret";
pub const SHORT_CODE: &str = "600988";
pub const PASSKEY: &str = "test_passkey";
pub const BASIC_AUTHORIZATION: &str = "Basic a2V5OnNlY3JldA==";
pub const TOKEN_PATH: &str = "/oauth/v1/generate";
pub const START: OffsetDateTime = macros::datetime!(2023-01-01 00:00:00 UTC);

/// Required fields only.
pub fn minimal_config() -> ClientConfig {
	ClientConfig::new(CONSUMER_KEY, CONSUMER_SECRET, SHORT_CODE)
}

/// Every optional credential configured.
pub fn full_config() -> ClientConfig {
	minimal_config().with_passkey(PASSKEY).with_initiator("testapi", "encrypted-credential")
}

/// Builds a reqwest-backed client pointed at `server` with a clock frozen at [`START`].
pub fn build_client(server: &MockServer, config: ClientConfig) -> (ReqwestMpesaClient, ManualClock) {
	let clock = ManualClock::new(START);
	let base_url = Url::parse(&server.base_url()).expect("Mock base URL should parse.");
	let client = ReqwestMpesaClient::new(config)
		.expect("Test configuration should be valid.")
		.with_base_url(base_url)
		.with_clock(clock.clone());

	(client, clock)
}

/// Registers a token endpoint that issues `token` for `expires_in` seconds.
pub async fn mock_token<'a>(server: &'a MockServer, token: &str, expires_in: &str) -> Mock<'a> {
	server
		.mock_async(|when, then| {
			when.method(GET)
				.path(TOKEN_PATH)
				.query_param("grant_type", "client_credentials")
				.header("authorization", BASIC_AUTHORIZATION);
			then.status(200).json_body(json!({ "access_token": token, "expires_in": expires_in }));
		})
		.await
}

/// Registers a POST endpoint at `path` that requires `token` and answers `status` + `body`.
pub async fn mock_endpoint<'a>(
	server: &'a MockServer,
	path: &str,
	token: &str,
	status: u16,
	body: serde_json::Value,
) -> Mock<'a> {
	server
		.mock_async(|when, then| {
			when.method(POST)
				.path(path)
				.header("authorization", format!("Bearer {token}"))
				.header("content-type", "application/json");
			then.status(status).json_body(body);
		})
		.await
}
