//! Account balance, transaction status, and reversal queries.

// self
use crate::{
	_prelude::*,
	api::{REVERSAL_RECEIVER_IDENTIFIER, SHORT_CODE_IDENTIFIER},
	auth::{Initiator, Secret},
	http::{ApiHttpClient, TransportErrorMapper},
	obs::Operation,
};

/// Account balance endpoint.
pub const ACCOUNT_BALANCE_PATH: &str = "/mpesa/accountbalance/v1/query";
/// Transaction status endpoint.
pub const TRANSACTION_STATUS_PATH: &str = "/mpesa/transactionstatus/v1/query";
/// Reversal endpoint.
pub const REVERSAL_PATH: &str = "/mpesa/reversal/v1/request";

/// Asynchronous result routing shared by initiator queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultCallbacks {
	/// Receives the notification when the request times out in the provider's queue.
	pub queue_timeout_url: Url,
	/// Receives the asynchronous result.
	pub result_url: Url,
}

/// Balance query for the client's shortcode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountBalanceRequest {
	/// Result routing.
	pub callbacks: ResultCallbacks,
	/// Free-form remarks.
	pub remarks: String,
}

/// Status query for a single transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionStatusRequest {
	/// Provider transaction ID (receipt number).
	pub transaction_id: String,
	/// Result routing.
	pub callbacks: ResultCallbacks,
	/// Free-form remarks.
	pub remarks: String,
	/// Optional free-form occasion.
	pub occasion: Option<String>,
}

/// Reversal of a completed transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReversalRequest {
	/// Provider transaction ID to reverse.
	pub transaction_id: String,
	/// Amount to reverse, in whole shillings.
	pub amount: u64,
	/// Result routing.
	pub callbacks: ResultCallbacks,
	/// Free-form remarks.
	pub remarks: String,
	/// Optional free-form occasion.
	pub occasion: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct AccountBalanceBody<'a> {
	initiator: &'a str,
	security_credential: &'a Secret,
	#[serde(rename = "CommandID")]
	command_id: &'static str,
	party_a: &'a str,
	identifier_type: &'static str,
	remarks: &'a str,
	#[serde(rename = "QueueTimeOutURL")]
	queue_time_out_url: &'a Url,
	#[serde(rename = "ResultURL")]
	result_url: &'a Url,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct TransactionStatusBody<'a> {
	initiator: &'a str,
	security_credential: &'a Secret,
	#[serde(rename = "CommandID")]
	command_id: &'static str,
	#[serde(rename = "TransactionID")]
	transaction_id: &'a str,
	party_a: &'a str,
	identifier_type: &'static str,
	#[serde(rename = "ResultURL")]
	result_url: &'a Url,
	#[serde(rename = "QueueTimeOutURL")]
	queue_time_out_url: &'a Url,
	remarks: &'a str,
	occasion: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ReversalBody<'a> {
	initiator: &'a str,
	security_credential: &'a Secret,
	#[serde(rename = "CommandID")]
	command_id: &'static str,
	#[serde(rename = "TransactionID")]
	transaction_id: &'a str,
	amount: u64,
	receiver_party: &'a str,
	// Provider spelling.
	#[serde(rename = "RecieverIdentifierType")]
	receiver_identifier_type: &'static str,
	#[serde(rename = "ResultURL")]
	result_url: &'a Url,
	#[serde(rename = "QueueTimeOutURL")]
	queue_time_out_url: &'a Url,
	remarks: &'a str,
	occasion: &'a str,
}

fn account_balance_body<'a>(
	short_code: &'a str,
	initiator: Initiator<'a>,
	request: &'a AccountBalanceRequest,
) -> AccountBalanceBody<'a> {
	AccountBalanceBody {
		initiator: initiator.name,
		security_credential: initiator.security_credential,
		command_id: "AccountBalance",
		party_a: short_code,
		identifier_type: SHORT_CODE_IDENTIFIER,
		remarks: &request.remarks,
		queue_time_out_url: &request.callbacks.queue_timeout_url,
		result_url: &request.callbacks.result_url,
	}
}

fn transaction_status_body<'a>(
	short_code: &'a str,
	initiator: Initiator<'a>,
	request: &'a TransactionStatusRequest,
) -> TransactionStatusBody<'a> {
	TransactionStatusBody {
		initiator: initiator.name,
		security_credential: initiator.security_credential,
		command_id: "TransactionStatusQuery",
		transaction_id: &request.transaction_id,
		party_a: short_code,
		identifier_type: SHORT_CODE_IDENTIFIER,
		result_url: &request.callbacks.result_url,
		queue_time_out_url: &request.callbacks.queue_timeout_url,
		remarks: &request.remarks,
		occasion: request.occasion.as_deref().unwrap_or_default(),
	}
}

fn reversal_body<'a>(
	short_code: &'a str,
	initiator: Initiator<'a>,
	request: &'a ReversalRequest,
) -> ReversalBody<'a> {
	ReversalBody {
		initiator: initiator.name,
		security_credential: initiator.security_credential,
		command_id: "TransactionReversal",
		transaction_id: &request.transaction_id,
		amount: request.amount,
		receiver_party: short_code,
		receiver_identifier_type: REVERSAL_RECEIVER_IDENTIFIER,
		result_url: &request.callbacks.result_url,
		queue_time_out_url: &request.callbacks.queue_timeout_url,
		remarks: &request.remarks,
		occasion: request.occasion.as_deref().unwrap_or_default(),
	}
}

impl<C, M> crate::Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Queries the client shortcode's balance. Requires the initiator identity.
	pub async fn account_balance(&self, request: &AccountBalanceRequest) -> Result<Value> {
		const OPERATION: Operation = Operation::AccountBalance;

		let credentials = self.credentials();
		let initiator = credentials.require_initiator(OPERATION.as_str())?;
		let body = account_balance_body(credentials.short_code(), initiator, request);

		self.dispatch(OPERATION, ACCOUNT_BALANCE_PATH, &body).await
	}

	/// Queries the status of a transaction. Requires the initiator identity.
	pub async fn transaction_status(&self, request: &TransactionStatusRequest) -> Result<Value> {
		const OPERATION: Operation = Operation::TransactionStatus;

		let credentials = self.credentials();
		let initiator = credentials.require_initiator(OPERATION.as_str())?;
		let body = transaction_status_body(credentials.short_code(), initiator, request);

		self.dispatch(OPERATION, TRANSACTION_STATUS_PATH, &body).await
	}

	/// Reverses a completed transaction. Requires the initiator identity.
	pub async fn reversal(&self, request: &ReversalRequest) -> Result<Value> {
		const OPERATION: Operation = Operation::Reversal;

		let credentials = self.credentials();
		let initiator = credentials.require_initiator(OPERATION.as_str())?;
		let body = reversal_body(credentials.short_code(), initiator, request);

		self.dispatch(OPERATION, REVERSAL_PATH, &body).await
	}
}
