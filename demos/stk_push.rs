//! Demonstrates a prompt-pay (STK push) round trip against a local mock of the provider: one
//! token fetch, a derived password, and the provider's JSON handed back verbatim.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use mpesa_client::{
	ReqwestMpesaClient,
	api::{STK_PUSH_PATH, StkPushRequest},
	auth::ClientConfig,
	url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/oauth/v1/generate");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"demo-access\",\"expires_in\":\"3599\"}");
		})
		.await;
	let push_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(STK_PUSH_PATH).header("authorization", "Bearer demo-access");
			then.status(200).json_body(json!({
				"MerchantRequestID": "29115-34620561-1",
				"CheckoutRequestID": "ws_CO_191220191020363925",
				"ResponseCode": "0",
				"ResponseDescription": "Success. Request accepted for processing",
				"CustomerMessage": "Success. Request accepted for processing",
			}));
		})
		.await;
	let config = ClientConfig::new("demo-key", "demo-secret", "174379").with_passkey("demo-passkey");
	let client = ReqwestMpesaClient::new(config)?.with_base_url(Url::parse(&server.base_url())?);
	let request = StkPushRequest::new(
		1,
		"254708374149",
		Url::parse("https://example.com/mpesa/callback")?,
		"INV-001",
		"Demo payment",
	);
	let response = client.stk_push(&request).await?;

	println!("Checkout request: {}.", response["CheckoutRequestID"]);

	let again = client.stk_push(&request).await?;

	println!("Second push reused the cached token: {}.", again["ResponseDescription"]);

	token_mock.assert_async().await;
	push_mock.assert_calls_async(2).await;

	Ok(())
}
