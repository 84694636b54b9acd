//! Customer-to-business URL registration and sandbox payment simulation.

// self
use crate::{
	_prelude::*,
	api::TransactionType,
	http::{ApiHttpClient, TransportErrorMapper},
	obs::Operation,
};

/// C2B URL registration endpoint.
pub const C2B_REGISTER_URL_PATH: &str = "/mpesa/c2b/v1/registerurl";
/// C2B simulation endpoint (sandbox only on the provider side).
pub const C2B_SIMULATE_PATH: &str = "/mpesa/c2b/v1/simulate";

/// What the provider does when the validation URL cannot be reached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseType {
	/// Complete the payment.
	#[default]
	Completed,
	/// Cancel the payment.
	Cancelled,
}

/// Confirmation and validation callback registration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct C2bRegisterUrlsRequest {
	/// Receives completed payment notifications.
	pub confirmation_url: Url,
	/// Receives payments for approval before completion.
	pub validation_url: Url,
	/// Defaults to [`ResponseType::Completed`].
	pub response_type: ResponseType,
}
impl C2bRegisterUrlsRequest {
	/// Creates a registration with the default response type.
	pub fn new(confirmation_url: Url, validation_url: Url) -> Self {
		Self { confirmation_url, validation_url, response_type: ResponseType::default() }
	}
}

/// Simulated customer payment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct C2bSimulateRequest {
	/// Amount in whole shillings.
	pub amount: u64,
	/// Paying subscriber MSISDN.
	pub msisdn: String,
	/// Account number for paybill payments; omitted for till payments.
	pub bill_ref_number: Option<String>,
	/// Defaults to [`TransactionType::CustomerPayBillOnline`].
	pub command_id: TransactionType,
}
impl C2bSimulateRequest {
	/// Creates a paybill simulation for `amount` from `msisdn` against `bill_ref_number`.
	pub fn paybill(
		amount: u64,
		msisdn: impl Into<String>,
		bill_ref_number: impl Into<String>,
	) -> Self {
		Self {
			amount,
			msisdn: msisdn.into(),
			bill_ref_number: Some(bill_ref_number.into()),
			command_id: TransactionType::CustomerPayBillOnline,
		}
	}

	/// Creates a till (buy goods) simulation for `amount` from `msisdn`.
	pub fn buy_goods(amount: u64, msisdn: impl Into<String>) -> Self {
		Self {
			amount,
			msisdn: msisdn.into(),
			bill_ref_number: None,
			command_id: TransactionType::CustomerBuyGoodsOnline,
		}
	}
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct C2bRegisterUrlsBody<'a> {
	short_code: &'a str,
	response_type: ResponseType,
	#[serde(rename = "ConfirmationURL")]
	confirmation_url: &'a Url,
	#[serde(rename = "ValidationURL")]
	validation_url: &'a Url,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct C2bSimulateBody<'a> {
	short_code: &'a str,
	#[serde(rename = "CommandID")]
	command_id: TransactionType,
	amount: u64,
	msisdn: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	bill_ref_number: Option<&'a str>,
}

impl<C, M> crate::Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Registers the confirmation and validation URLs for the client's shortcode.
	pub async fn c2b_register_urls(&self, request: &C2bRegisterUrlsRequest) -> Result<Value> {
		let body = C2bRegisterUrlsBody {
			short_code: self.credentials().short_code(),
			response_type: request.response_type,
			confirmation_url: &request.confirmation_url,
			validation_url: &request.validation_url,
		};

		self.dispatch(Operation::C2bRegisterUrls, C2B_REGISTER_URL_PATH, &body).await
	}

	/// Simulates a customer paying into the client's shortcode.
	pub async fn c2b_simulate(&self, request: &C2bSimulateRequest) -> Result<Value> {
		let body = C2bSimulateBody {
			short_code: self.credentials().short_code(),
			command_id: request.command_id,
			amount: request.amount,
			msisdn: &request.msisdn,
			bill_ref_number: request.bill_ref_number.as_deref(),
		};

		self.dispatch(Operation::C2bSimulate, C2B_SIMULATE_PATH, &body).await
	}
}
