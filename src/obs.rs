//! Optional observability helpers for client operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `mpesa_client.request` with the `operation`
//!   and `stage` fields.
//! - Enable `metrics` to increment `mpesa_client_request_total` for every attempt/success/failure
//!   (labeled by `operation` + `outcome`) and `mpesa_client_token_total` for token cache events
//!   (labeled by `event`).

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Client operations observed by the dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// OAuth token acquisition.
	Token,
	/// Caller-driven [`Client::send`](crate::Client::send).
	Send,
	/// Prompt-pay request.
	StkPush,
	/// Prompt-pay status query.
	StkPushQuery,
	/// C2B URL registration.
	C2bRegisterUrls,
	/// C2B payment simulation.
	C2bSimulate,
	/// Business-to-customer payment.
	B2cPayment,
	/// Business-to-business payment.
	B2bPayment,
	/// USSD push to a till for B2B checkout.
	B2bExpressCheckout,
	/// Account balance query.
	AccountBalance,
	/// Transaction status query.
	TransactionStatus,
	/// Transaction reversal.
	Reversal,
	/// Tax remittance.
	RemitTax,
	/// Dynamic QR generation.
	DynamicQr,
	/// Bill manager opt-in.
	BillManagerOptIn,
	/// Bill manager single invoice.
	BillManagerSingleInvoice,
	/// Bill manager invoice cancellation.
	BillManagerCancelInvoice,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Token => "token",
			Self::Send => "send",
			Self::StkPush => "stk_push",
			Self::StkPushQuery => "stk_push_query",
			Self::C2bRegisterUrls => "c2b_register_urls",
			Self::C2bSimulate => "c2b_simulate",
			Self::B2cPayment => "b2c_payment",
			Self::B2bPayment => "b2b_payment",
			Self::B2bExpressCheckout => "b2b_express_checkout",
			Self::AccountBalance => "account_balance",
			Self::TransactionStatus => "transaction_status",
			Self::Reversal => "reversal",
			Self::RemitTax => "remit_tax",
			Self::DynamicQr => "dynamic_qr",
			Self::BillManagerOptIn => "bill_manager_opt_in",
			Self::BillManagerSingleInvoice => "bill_manager_single_invoice",
			Self::BillManagerCancelInvoice => "bill_manager_cancel_invoice",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// Entry to an operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl Outcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Attempt => "attempt",
			Self::Success => "success",
			Self::Failure => "failure",
		}
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Token cache events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenEvent {
	/// A cached token was still valid.
	Reused,
	/// A new token was fetched and cached.
	Refreshed,
	/// The fetch failed; the slot was left as it was.
	RefreshFailed,
}
impl TokenEvent {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Reused => "reused",
			Self::Refreshed => "refreshed",
			Self::RefreshFailed => "refresh_failed",
		}
	}
}
impl Display for TokenEvent {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
