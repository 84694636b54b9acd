//! Transport primitives for token and endpoint calls.
//!
//! The client's only dependency on an HTTP stack is [`ApiHttpClient`]: it receives a fully
//! built [`ApiRequest`] and answers with an [`ApiResponse`] carrying the status and raw body,
//! whatever that status is. Transport-level failures stay in the implementation's own error
//! type and are classified by a [`TransportErrorMapper`] into the unreachable/local split.

// std
use std::ops::Deref;
// self
use crate::{_prelude::*, auth::Secret};

/// Boxed future returned by [`ApiHttpClient::execute`].
pub type TransportFuture<'a, E> = Pin<Box<dyn Future<Output = Result<ApiResponse, E>> + 'a + Send>>;

/// HTTP methods used by the provider API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
	/// Token acquisition.
	Get,
	/// Every endpoint operation.
	Post,
}

/// Outbound request handed to an [`ApiHttpClient`].
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// Request method.
	pub method: HttpMethod,
	/// Absolute target URL.
	pub url: Url,
	/// Full `Authorization` header value (`Basic ...` or `Bearer ...`).
	pub authorization: Secret,
	/// JSON body; implementations must send `Content-Type: application/json` when present.
	pub body: Option<Vec<u8>>,
}
impl ApiRequest {
	/// Builds a body-less GET request.
	pub fn get(url: Url, authorization: Secret) -> Self {
		Self { method: HttpMethod::Get, url, authorization, body: None }
	}

	/// Builds a POST request carrying a serialized JSON body.
	pub fn post(url: Url, authorization: Secret, body: Vec<u8>) -> Self {
		Self { method: HttpMethod::Post, url, authorization, body: Some(body) }
	}
}

/// Raw provider response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw body bytes.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Abstraction over HTTP transports used by the client.
///
/// Implementations must return `Ok` for every response the provider sends, including non-2xx
/// ones; `Err` is reserved for failures where no complete response exists.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and collects the full response.
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_, Self::TransportError>;
}

/// Maps transport failures into client [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts a transport failure into [`Error::Unreachable`] or [`Error::LocalDispatch`].
	fn map_transport_error(&self, error: E) -> Error;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client whose requests give up after `timeout`.
	pub fn with_timeout(timeout: std::time::Duration) -> Result<Self, crate::error::ConfigError> {
		Ok(Self(ReqwestClient::builder().timeout(timeout).build()?))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: ApiRequest) -> TransportFuture<'_, Self::TransportError> {
		use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};

		let client = self.0.clone();

		Box::pin(async move {
			let mut builder = match request.method {
				HttpMethod::Get => client.get(request.url),
				HttpMethod::Post => client.post(request.url),
			}
			.header(AUTHORIZATION, request.authorization.expose())
			.header(ACCEPT, "application/json");

			if let Some(body) = request.body {
				builder = builder.header(CONTENT_TYPE, "application/json").body(body);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok::<_, ReqwestError>(ApiResponse { status, body })
		})
	}
}

/// Default mapper for reqwest-backed transports.
///
/// Builder failures (bad header values, unusable URLs) never left the process and map to
/// [`Error::LocalDispatch`]. Everything else (connect, timeout, reset, truncated body) maps to
/// [`Error::Unreachable`].
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(&self, error: ReqwestError) -> Error {
		if error.is_builder() {
			return Error::local_dispatch(error);
		}

		Error::unreachable(error)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn success_covers_only_2xx() {
		let ok = ApiResponse { status: 204, body: Vec::new() };
		let redirect = ApiResponse { status: 302, body: Vec::new() };
		let failure = ApiResponse { status: 400, body: Vec::new() };

		assert!(ok.is_success());
		assert!(!redirect.is_success());
		assert!(!failure.is_success());
	}

	#[cfg(feature = "reqwest")]
	#[tokio::test]
	async fn connection_refused_maps_to_unreachable() {
		let client = ReqwestHttpClient::default();
		let url = Url::parse("http://127.0.0.1:9/unreachable").expect("Fixture URL should parse.");
		let err = client
			.execute(ApiRequest::get(url, Secret::new("Bearer t")))
			.await
			.expect_err("Nothing listens on the discard port.");

		assert!(matches!(ReqwestTransportErrorMapper.map_transport_error(err), Error::Unreachable(_)));
	}

	#[cfg(feature = "reqwest")]
	#[tokio::test]
	async fn invalid_header_maps_to_local_dispatch() {
		let client = ReqwestHttpClient::default();
		let url = Url::parse("http://127.0.0.1:9/local").expect("Fixture URL should parse.");
		let err = client
			.execute(ApiRequest::get(url, Secret::new("Bearer bad\nvalue")))
			.await
			.expect_err("Header values with newlines are rejected before sending.");

		assert!(matches!(
			ReqwestTransportErrorMapper.map_transport_error(err),
			Error::LocalDispatch(_)
		));
	}
}
