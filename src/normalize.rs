//! Failure normalization: turns provider responses and transport failures into
//! [`ErrorReport`]s drawn from a closed set of [`ErrorCategory`] values.
//!
//! Three failure shapes are handled, each with its own category family:
//!
//! - [`Failure::Responded`]: the provider answered with a non-2xx status. The code and message are
//!   probed through [`CODE_PATHS`] and [`MESSAGE_PATHS`] in order, then the code is resolved
//!   through [`CODE_TABLE`]. Unknown codes fall back to [`ErrorCategory::RequestFailed`].
//! - [`Failure::NoResponse`]: always [`ErrorCategory::Unreachable`].
//! - [`Failure::Local`]: always [`ErrorCategory::LocalDispatch`].
//!
//! Normalization never fails; the worst case is a report wrapping the raw body text.

mod category;
mod extract;
mod table;

pub use category::*;
pub use extract::*;
pub use table::*;

// self
use crate::_prelude::*;

/// Failure shapes accepted by [`normalize`].
#[derive(Clone, Copy, Debug)]
pub enum Failure<'a> {
	/// The provider answered with a non-2xx status.
	Responded {
		/// HTTP status code.
		status: u16,
		/// Raw response body.
		body: &'a [u8],
	},
	/// The request was sent but nothing came back.
	NoResponse,
	/// The request could not be built or handed to the transport.
	Local {
		/// Description of the underlying failure.
		detail: &'a str,
	},
}

/// Normalized category plus human-readable message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
	/// Closed-set failure category.
	pub category: ErrorCategory,
	/// Descriptive message suitable for surfacing to callers.
	pub message: String,
}
impl ErrorReport {
	/// Creates a report from its parts.
	pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
		Self { category, message: message.into() }
	}
}
impl Display for ErrorReport {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.message)
	}
}

/// Classifies a failure into an [`ErrorReport`].
pub fn normalize(failure: &Failure) -> ErrorReport {
	match *failure {
		Failure::Responded { status, body } => normalize_response(status, body).1,
		Failure::NoResponse =>
			ErrorReport::new(ErrorCategory::Unreachable, ErrorCategory::Unreachable.description()),
		Failure::Local { detail } => ErrorReport::new(
			ErrorCategory::LocalDispatch,
			format!("{}: {detail}", ErrorCategory::LocalDispatch.description()),
		),
	}
}

/// Classifies a non-2xx response, returning the code found in the body alongside the report.
///
/// A code extracted from the body takes precedence; when it is absent or unmapped, the HTTP status
/// itself is looked up so status-level rules (such as `409`) still apply.
pub fn normalize_response(status: u16, body: &[u8]) -> (Option<String>, ErrorReport) {
	let parsed = serde_json::from_slice::<Value>(body).ok();
	let code = parsed.as_ref().and_then(|value| probe(value, CODE_PATHS));
	let message = parsed
		.as_ref()
		.and_then(|value| probe(value, MESSAGE_PATHS))
		.unwrap_or_else(|| raw_body(body));
	let report = match code.as_deref().and_then(lookup_code) {
		Some(rule) => {
			let category = rule.resolve(&message);
			let code = code.as_deref().unwrap_or_default();

			ErrorReport::new(category, format!("{} (code {code}): {message}", category.description()))
		},
		None => match lookup_code(&status.to_string()) {
			Some(rule) => {
				let category = rule.resolve(&message);

				ErrorReport::new(
					category,
					format!("{} (status {status}): {message}", category.description()),
				)
			},
			None => ErrorReport::new(
				ErrorCategory::RequestFailed,
				format!("Request failed with status {status}: {message}"),
			),
		},
	};

	(code, report)
}

fn raw_body(body: &[u8]) -> String {
	let text = String::from_utf8_lossy(body);
	let trimmed = text.trim();

	if trimmed.is_empty() { "<empty body>".into() } else { trimmed.to_owned() }
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn responded(status: u16, body: &str) -> ErrorReport {
		normalize(&Failure::Responded { status, body: body.as_bytes() })
	}

	#[test]
	fn push_timeout_and_cancellation_read_differently() {
		let timeout =
			responded(400, r#"{"ResultCode":1037,"ResultDesc":"DS timeout user cannot be reached"}"#);
		let cancelled = responded(400, r#"{"ResultCode":"1032","ResultDesc":"Request cancelled"}"#);

		assert_eq!(timeout.category, ErrorCategory::PushTimeout);
		assert!(timeout.message.contains("timed out"));
		assert!(timeout.message.contains("unreachable"));
		assert_eq!(cancelled.category, ErrorCategory::CancelledByUser);
		assert!(cancelled.message.contains("cancelled"));
		assert!(!cancelled.message.contains("timed out"));
	}

	#[test]
	fn unmapped_code_uses_generic_template() {
		let report = responded(502, r#"{"errorCode":"999","errorMessage":"Something odd"}"#);

		assert_eq!(report.category, ErrorCategory::RequestFailed);
		assert_eq!(report.message, "Request failed with status 502: Something odd");
	}

	#[test]
	fn non_json_body_is_dumped_verbatim() {
		let report = responded(503, "  Service Unavailable  ");

		assert_eq!(report.category, ErrorCategory::RequestFailed);
		assert_eq!(report.message, "Request failed with status 503: Service Unavailable");

		let empty = responded(500, "");

		assert_eq!(empty.message, "Request failed with status 500: <empty body>");
	}

	#[test]
	fn json_without_known_fields_dumps_body() {
		let report = responded(400, r#"{"unexpected":true}"#);

		assert_eq!(report.message, r#"Request failed with status 400: {"unexpected":true}"#);
	}

	#[test]
	fn fault_shape_is_understood() {
		let report = responded(
			401,
			r#"{"fault":{"faultstring":"Invalid credentials","detail":{"errorcode":"400.008.01"}}}"#,
		);

		assert_eq!(report.category, ErrorCategory::AuthenticationFailed);
		assert!(report.message.contains("Invalid credentials"));
		assert!(report.message.contains("400.008.01"));
	}

	#[test]
	fn server_fault_is_disambiguated_by_phrase() {
		let registered = responded(
			500,
			r#"{"errorCode":"500.003.1001","errorMessage":"Urls are already registered"}"#,
		);
		let duplicate = responded(
			500,
			r#"{"errorCode":"500.003.1001","errorMessage":"Duplicate notification detected"}"#,
		);
		let fault =
			responded(500, r#"{"errorCode":"500.003.1001","errorMessage":"Internal Server Error"}"#);

		assert_eq!(registered.category, ErrorCategory::UrlsAlreadyRegistered);
		assert_eq!(duplicate.category, ErrorCategory::DuplicateNotification);
		assert_eq!(fault.category, ErrorCategory::ServerFault);
	}

	#[test]
	fn conflict_status_uses_phrase_rules_without_body_code() {
		let exists = responded(409, r#"{"errorMessage":"Merchant already opted in"}"#);
		let duplicate = responded(409, r#"{"errorMessage":"Duplicate invoice reference"}"#);
		let conflict = responded(409, "Conflict");

		assert_eq!(exists.category, ErrorCategory::ResourceExists);
		assert!(exists.message.contains("(status 409): Merchant already opted in"));
		assert_eq!(duplicate.category, ErrorCategory::DuplicateRequest);
		assert_eq!(conflict.category, ErrorCategory::Conflict);
	}

	#[test]
	fn body_code_outranks_status_lookup() {
		let (code, report) = normalize_response(
			409,
			br#"{"errorCode":"1037","errorMessage":"Already waiting on the handset"}"#,
		);

		assert_eq!(code.as_deref(), Some("1037"));
		assert_eq!(report.category, ErrorCategory::PushTimeout);

		let (code, report) =
			normalize_response(409, br#"{"errorCode":"999","errorMessage":"duplicate entry"}"#);

		assert_eq!(code.as_deref(), Some("999"));
		assert_eq!(report.category, ErrorCategory::DuplicateRequest);
	}

	#[test]
	fn no_response_and_local_are_fixed_categories() {
		let unreachable = normalize(&Failure::NoResponse);
		let local = normalize(&Failure::Local { detail: "key must be a string" });

		assert_eq!(unreachable.category, ErrorCategory::Unreachable);
		assert_eq!(local.category, ErrorCategory::LocalDispatch);
		assert!(local.message.ends_with("key must be a string"));
	}
}
