// self
use crate::_prelude::*;

/// Closed set of failure categories surfaced to callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
	/// `400.008.01`: consumer key/secret rejected.
	AuthenticationFailed,
	/// `400.008.02`: token request used an unsupported grant type.
	InvalidGrantType,
	/// `404.001.04`: bearer header missing or malformed.
	InvalidAuthHeader,
	/// `400.002.05`: request body rejected.
	InvalidPayload,
	/// `400.003.01`: access token expired.
	ExpiredToken,
	/// `1`: payer balance too low.
	InsufficientFunds,
	/// `1001`: subscriber already has a transaction in flight.
	TransactionInProgress,
	/// `1019`: request expired before completion.
	RequestExpired,
	/// `1025`: provider failed to send the payment prompt.
	PushFailed,
	/// `1032`: payer cancelled the prompt.
	CancelledByUser,
	/// `1037`: prompt timed out; device unreachable.
	PushTimeout,
	/// `2001`: initiator information rejected.
	InvalidInitiator,
	/// `15`: duplicate request.
	DuplicateRequest,
	/// `17`: provider-side internal failure.
	InternalFailure,
	/// `18`: security credential rejected.
	InvalidSecurityCredential,
	/// `20`: initiator could not be resolved.
	UnresolvedInitiator,
	/// `21`: initiator lacks permission.
	PermissionDenied,
	/// `26`: provider system busy.
	SystemBusy,
	/// `4102`: merchant KYC validation failed.
	MerchantKycFailed,
	/// `4104`: merchant has no nominated number.
	MissingNominatedNumber,
	/// `4201`: USSD network error.
	UssdNetworkError,
	/// `4203`: USSD exception.
	UssdException,
	/// `500.003.1001` + "already registered".
	UrlsAlreadyRegistered,
	/// `500.003.1001` + "duplicate notification".
	DuplicateNotification,
	/// `500.003.1001` otherwise.
	ServerFault,
	/// `409` + "already".
	ResourceExists,
	/// `409` otherwise.
	Conflict,
	/// Unmapped or missing provider code.
	RequestFailed,
	/// Response could not be decoded.
	MalformedResponse,
	/// No response was received.
	Unreachable,
	/// Request could not be built or sent.
	LocalDispatch,
}
impl ErrorCategory {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::AuthenticationFailed => "authentication_failed",
			Self::InvalidGrantType => "invalid_grant_type",
			Self::InvalidAuthHeader => "invalid_auth_header",
			Self::InvalidPayload => "invalid_payload",
			Self::ExpiredToken => "expired_token",
			Self::InsufficientFunds => "insufficient_funds",
			Self::TransactionInProgress => "transaction_in_progress",
			Self::RequestExpired => "request_expired",
			Self::PushFailed => "push_failed",
			Self::CancelledByUser => "cancelled_by_user",
			Self::PushTimeout => "push_timeout",
			Self::InvalidInitiator => "invalid_initiator",
			Self::DuplicateRequest => "duplicate_request",
			Self::InternalFailure => "internal_failure",
			Self::InvalidSecurityCredential => "invalid_security_credential",
			Self::UnresolvedInitiator => "unresolved_initiator",
			Self::PermissionDenied => "permission_denied",
			Self::SystemBusy => "system_busy",
			Self::MerchantKycFailed => "merchant_kyc_failed",
			Self::MissingNominatedNumber => "missing_nominated_number",
			Self::UssdNetworkError => "ussd_network_error",
			Self::UssdException => "ussd_exception",
			Self::UrlsAlreadyRegistered => "urls_already_registered",
			Self::DuplicateNotification => "duplicate_notification",
			Self::ServerFault => "server_fault",
			Self::ResourceExists => "resource_exists",
			Self::Conflict => "conflict",
			Self::RequestFailed => "request_failed",
			Self::MalformedResponse => "malformed_response",
			Self::Unreachable => "unreachable",
			Self::LocalDispatch => "local_dispatch",
		}
	}

	/// Returns the descriptive template used as the message prefix.
	pub const fn description(self) -> &'static str {
		match self {
			Self::AuthenticationFailed =>
				"Authentication failed: the consumer key or consumer secret was rejected",
			Self::InvalidGrantType =>
				"Invalid grant type: the token endpoint only accepts client_credentials",
			Self::InvalidAuthHeader =>
				"Invalid authentication header: the bearer token is missing or malformed",
			Self::InvalidPayload => "Invalid request payload: one or more fields were rejected",
			Self::ExpiredToken => "The access token has expired; a new token is required",
			Self::InsufficientFunds => "Insufficient funds in the payer's account",
			Self::TransactionInProgress =>
				"Another transaction is already in progress for this subscriber",
			Self::RequestExpired => "The transaction request expired before it was completed",
			Self::PushFailed => "An internal error occurred while sending the payment prompt",
			Self::CancelledByUser => "The payment request was cancelled by the user",
			Self::PushTimeout =>
				"The payment prompt timed out: the user's device was unreachable",
			Self::InvalidInitiator =>
				"The initiator information is invalid: check the initiator name, security credential, and PIN",
			Self::DuplicateRequest => "Duplicate request detected",
			Self::InternalFailure => "The provider reported an internal failure",
			Self::InvalidSecurityCredential => "The initiator security credential is invalid",
			Self::UnresolvedInitiator => "The initiator could not be resolved",
			Self::PermissionDenied =>
				"The initiator is not permitted to perform this operation",
			Self::SystemBusy => "The provider system is busy; try again later",
			Self::MerchantKycFailed => "Merchant KYC validation failed",
			Self::MissingNominatedNumber => "The merchant has no nominated phone number",
			Self::UssdNetworkError => "A USSD network error prevented reaching the merchant",
			Self::UssdException => "A USSD exception occurred while reaching the merchant",
			Self::UrlsAlreadyRegistered =>
				"The validation and confirmation URLs are already registered",
			Self::DuplicateNotification => "Duplicate notification detected",
			Self::ServerFault => "The provider encountered an internal server error",
			Self::ResourceExists => "The resource already exists",
			Self::Conflict => "The request conflicts with the current state of the resource",
			Self::RequestFailed => "Request failed",
			Self::MalformedResponse => "The provider returned a response that could not be decoded",
			Self::Unreachable =>
				"No response was received from the payment provider; it may be unreachable",
			Self::LocalDispatch => "The request could not be dispatched",
		}
	}
}
impl Display for ErrorCategory {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
