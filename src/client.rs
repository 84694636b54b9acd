//! Client facade: construction, token acquisition, and the authenticated dispatcher.
//!
//! The client owns the HTTP transport, the transport error mapper, the validated credentials,
//! the clock, and the token slot. Clones share all of them, so a cloned client reuses the same
//! cached token. Endpoint families in [`crate::api`] add their operations through separate
//! `impl Client` blocks and funnel every call through [`Client::send`]'s pipeline.

// self
use crate::{
	_prelude::*,
	auth::{ClientConfig, Credentials, Secret},
	clock::{Clock, SystemClock},
	error::{ConfigError, RemoteError},
	http::{ApiHttpClient, ApiRequest, TransportErrorMapper},
	obs::{self, Operation, Outcome, RequestSpan},
	token::{TokenCache, TokenGrant},
};
#[cfg(feature = "reqwest")]
use crate::http::{ReqwestHttpClient, ReqwestTransportErrorMapper};

/// Token endpoint path, relative to the environment base URL.
pub const TOKEN_PATH: &str = "/oauth/v1/generate?grant_type=client_credentials";

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestMpesaClient = Client<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Authenticated API client bound to one set of credentials.
pub struct Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	credentials: Arc<Credentials>,
	base_url: Url,
	clock: Arc<dyn Clock>,
	tokens: Arc<TokenCache>,
}
impl<C, M> Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	///
	/// Validation happens here: missing required fields, a non-numeric shortcode, or an unknown
	/// environment fail with [`ConfigError`] before anything is sent.
	pub fn with_http_client(
		config: ClientConfig,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Result<Self> {
		let credentials = Credentials::try_from(config)?;
		let base_url = credentials.environment().base_url()?;

		Ok(Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			credentials: Arc::new(credentials),
			base_url,
			clock: Arc::new(SystemClock),
			tokens: Default::default(),
		})
	}

	/// Overrides the environment's base URL (mock servers, proxies).
	pub fn with_base_url(mut self, base_url: Url) -> Self {
		self.base_url = base_url;

		self
	}

	/// Replaces the clock used for token expiry and request timestamps.
	pub fn with_clock(mut self, clock: impl 'static + Clock) -> Self {
		self.clock = Arc::new(clock);

		self
	}

	/// Returns the validated credentials.
	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	/// Returns the base URL every path is appended to.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Returns the current instant according to the client's clock.
	pub fn now(&self) -> OffsetDateTime {
		self.clock.now()
	}

	/// Returns a valid bearer token, fetching one when the cache is cold or expired.
	pub async fn access_token(&self) -> Result<Secret> {
		self.tokens.valid_token(self.clock.as_ref(), || self.fetch_token()).await
	}

	/// Drops the cached token; the next operation fetches a fresh one.
	pub async fn invalidate_token(&self) {
		self.tokens.invalidate().await;
	}

	/// Posts `body` as JSON to `path` with bearer auth and returns the decoded response.
	///
	/// `path` is appended to the base URL verbatim and should start with `/`.
	pub async fn send<B>(&self, path: &str, body: &B) -> Result<Value>
	where
		B: ?Sized + Serialize + Sync,
	{
		self.dispatch(Operation::Send, path, body).await
	}

	pub(crate) async fn dispatch<B>(
		&self,
		operation: Operation,
		path: &str,
		body: &B,
	) -> Result<Value>
	where
		B: ?Sized + Serialize + Sync,
	{
		let span = RequestSpan::new(operation, "dispatch");

		obs::record_request_outcome(operation, Outcome::Attempt);

		let result = span
			.instrument(async move {
				let payload = serde_json::to_vec(body).map_err(Error::local_dispatch)?;
				let url = endpoint_url(&self.base_url, path)?;
				let token = self.access_token().await?;
				let authorization = Secret::new(format!("Bearer {}", token.expose()));
				let response = self
					.http_client
					.execute(ApiRequest::post(url, authorization, payload))
					.await
					.map_err(|e| self.transport_mapper.map_transport_error(e))?;

				if !response.is_success() {
					return Err(Error::remote(response.status, &response.body));
				}

				decode_payload(response.status, &response.body)
			})
			.await;

		match &result {
			Ok(_) => obs::record_request_outcome(operation, Outcome::Success),
			Err(_) => obs::record_request_outcome(operation, Outcome::Failure),
		}

		result
	}

	async fn fetch_token(&self) -> Result<TokenGrant> {
		const OPERATION: Operation = Operation::Token;

		let span = RequestSpan::new(OPERATION, "fetch_token");

		obs::record_request_outcome(OPERATION, Outcome::Attempt);

		let result = span
			.instrument(async move {
				let url = endpoint_url(&self.base_url, TOKEN_PATH)?;
				let response = self
					.http_client
					.execute(ApiRequest::get(url, self.credentials.basic_authorization()))
					.await
					.map_err(|e| self.transport_mapper.map_transport_error(e))?;

				if !response.is_success() {
					return Err(Error::remote(response.status, &response.body));
				}

				TokenGrant::parse(response.status, &response.body)
			})
			.await;

		match &result {
			Ok(_) => obs::record_request_outcome(OPERATION, Outcome::Success),
			Err(_) => obs::record_request_outcome(OPERATION, Outcome::Failure),
		}

		result
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client backed by a default reqwest transport.
	///
	/// Use [`Client::with_http_client`] with [`ReqwestHttpClient::with_client`] to pass a
	/// configured [`ReqwestClient`] (timeouts, proxies).
	pub fn new(config: ClientConfig) -> Result<Self> {
		Self::with_http_client(
			config,
			ReqwestHttpClient::default(),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}
}
impl<C, M> Clone for Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			transport_mapper: self.transport_mapper.clone(),
			credentials: self.credentials.clone(),
			base_url: self.base_url.clone(),
			clock: self.clock.clone(),
			tokens: self.tokens.clone(),
		}
	}
}
impl<C, M> Debug for Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("credentials", &self.credentials)
			.field("base_url", &self.base_url.as_str())
			.finish()
	}
}

fn endpoint_url(base_url: &Url, path: &str) -> Result<Url, ConfigError> {
	let raw = format!("{}{path}", base_url.as_str().trim_end_matches('/'));

	Url::parse(&raw).map_err(|source| ConfigError::InvalidPath { path: path.into(), source })
}

fn decode_payload(status: u16, body: &[u8]) -> Result<Value> {
	if body.iter().all(u8::is_ascii_whitespace) {
		return Ok(Value::Null);
	}

	serde_json::from_slice(body).map_err(|e| RemoteError::malformed(status, e).into())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn endpoint_url_appends_path_verbatim() {
		let base = Url::parse("https://sandbox.safaricom.co.ke").expect("Base should parse.");
		let url = endpoint_url(&base, TOKEN_PATH).expect("Token path should join.");

		assert_eq!(
			url.as_str(),
			"https://sandbox.safaricom.co.ke/oauth/v1/generate?grant_type=client_credentials"
		);

		let nested = Url::parse("http://127.0.0.1:8080/proxy/").expect("Base should parse.");
		let url = endpoint_url(&nested, "/mpesa/stkpush/v1/processrequest")
			.expect("Endpoint path should join.");

		assert_eq!(url.as_str(), "http://127.0.0.1:8080/proxy/mpesa/stkpush/v1/processrequest");
	}

	#[test]
	fn decode_payload_handles_empty_and_garbage() {
		assert_eq!(decode_payload(200, b"").expect("Empty body should decode."), Value::Null);
		assert_eq!(
			decode_payload(200, br#"{"ResponseCode":"0"}"#).expect("JSON body should decode."),
			serde_json::json!({ "ResponseCode": "0" })
		);

		let err = decode_payload(200, b"<html>").expect_err("HTML body should be rejected.");

		assert_eq!(err.category(), Some(crate::normalize::ErrorCategory::MalformedResponse));
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn construction_validates_config() {
		let err = ReqwestMpesaClient::new(
			ClientConfig::new("key", "secret", "600988").with_environment("staging"),
		)
		.expect_err("Unknown environment should fail construction.");

		assert!(matches!(err, Error::Config(ConfigError::UnknownEnvironment { .. })));

		let client = ReqwestMpesaClient::new(ClientConfig::new("key", "secret", "600988"))
			.expect("Minimal config should construct.");

		assert_eq!(client.base_url().as_str(), "https://sandbox.safaricom.co.ke/");
		assert!(!format!("{client:?}").contains("secret"));
	}
}
