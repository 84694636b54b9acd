//! Client-level error types shared by the token cache, dispatcher, and endpoint operations.

// self
use crate::{
	_prelude::*,
	normalize::{self, ErrorCategory, ErrorReport, Failure},
};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem, raised before any network activity.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The provider responded with a failure.
	#[error(transparent)]
	Remote(#[from] RemoteError),
	/// The request was sent but no response arrived; the only retryable category.
	#[error(transparent)]
	Unreachable(#[from] UnreachableError),
	/// The request could not be constructed or sent.
	#[error(transparent)]
	LocalDispatch(#[from] LocalDispatchError),
}
impl Error {
	/// Builds a [`RemoteError`] by normalizing a non-2xx response.
	pub fn remote(status: u16, body: &[u8]) -> Self {
		let (code, report) = normalize::normalize_response(status, body);

		RemoteError { status: Some(status), code, report }.into()
	}

	/// Builds an [`UnreachableError`] for a request that never received a response.
	pub fn unreachable(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		let report = normalize::normalize(&Failure::NoResponse);

		UnreachableError { report, source: Box::new(src) }.into()
	}

	/// Builds a [`LocalDispatchError`] for a request that could not be built or sent.
	pub fn local_dispatch(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		let report = normalize::normalize(&Failure::Local { detail: &src.to_string() });

		LocalDispatchError { report, source: Box::new(src) }.into()
	}

	/// Returns the normalized report; configuration errors carry none.
	pub fn report(&self) -> Option<&ErrorReport> {
		match self {
			Self::Config(_) => None,
			Self::Remote(e) => Some(&e.report),
			Self::Unreachable(e) => Some(&e.report),
			Self::LocalDispatch(e) => Some(&e.report),
		}
	}

	/// Returns the normalized category, if any.
	pub fn category(&self) -> Option<ErrorCategory> {
		self.report().map(|report| report.category)
	}

	/// Returns `true` when the failure may be transient and a caller-driven retry makes sense.
	pub fn is_retryable(&self) -> bool {
		matches!(self, Self::Unreachable(_))
	}
}

/// Configuration and validation failures raised before any request is sent.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A required construction field was empty.
	#[error("The `{field}` field is required.")]
	MissingField {
		/// Configuration field name.
		field: &'static str,
	},
	/// The environment selector is neither `sandbox` nor `production`.
	#[error("Unknown environment `{value}`; expected `sandbox` or `production`.")]
	UnknownEnvironment {
		/// Rejected selector value.
		value: String,
	},
	/// The shortcode is not a numeric account code.
	#[error("Shortcode `{value}` must contain only ASCII digits.")]
	InvalidShortCode {
		/// Rejected shortcode value.
		value: String,
	},
	/// An operation needs an optional credential that was not configured.
	#[error("The {operation} operation requires `{field}` to be configured.")]
	MissingCredential {
		/// Operation label.
		operation: &'static str,
		/// Missing credential field.
		field: &'static str,
	},
	/// Base URL cannot be parsed.
	#[error("Base URL `{url}` is invalid.")]
	InvalidBaseUrl {
		/// Rejected URL text.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoint path cannot be joined to the base URL.
	#[error("Path `{path}` cannot be joined to the base URL.")]
	InvalidPath {
		/// Rejected endpoint path.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// The provider answered with a failure status or an unusable payload.
#[derive(Debug, ThisError)]
#[error("{report}")]
pub struct RemoteError {
	/// HTTP status code returned by the provider, when available.
	pub status: Option<u16>,
	/// Provider error code extracted from the body, if any.
	pub code: Option<String>,
	/// Normalized category and message.
	pub report: ErrorReport,
}
impl RemoteError {
	/// Builds an error for a payload that could not be decoded.
	pub fn malformed(status: u16, detail: impl Display) -> Self {
		Self {
			status: Some(status),
			code: None,
			report: ErrorReport::new(
				ErrorCategory::MalformedResponse,
				format!("{}: {detail}", ErrorCategory::MalformedResponse.description()),
			),
		}
	}
}

/// No response was received from the provider.
#[derive(Debug, ThisError)]
#[error("{report}")]
pub struct UnreachableError {
	/// Normalized category and message.
	pub report: ErrorReport,
	/// Transport-specific failure.
	#[source]
	pub source: BoxError,
}

/// The request could not be constructed or handed to the transport.
#[derive(Debug, ThisError)]
#[error("{report}")]
pub struct LocalDispatchError {
	/// Normalized category and message.
	pub report: ErrorReport,
	/// Underlying failure.
	#[source]
	pub source: BoxError,
}
