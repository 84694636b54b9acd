//! Business-to-customer disbursements.

// self
use crate::{
	_prelude::*,
	api,
	auth::{Initiator, Secret},
	http::{ApiHttpClient, TransportErrorMapper},
	obs::Operation,
};

/// B2C payment endpoint.
pub const B2C_PAYMENT_PATH: &str = "/mpesa/b2c/v3/paymentrequest";

/// B2C command identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum B2cCommand {
	/// Salary disbursement to registered and unregistered subscribers.
	SalaryPayment,
	/// Ordinary business payment to registered subscribers.
	#[default]
	BusinessPayment,
	/// Promotional payment to registered subscribers.
	PromotionPayment,
}

/// Business-to-customer payment request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct B2cPaymentRequest {
	/// Amount in whole shillings.
	pub amount: u64,
	/// Receiving subscriber MSISDN.
	pub party_b: String,
	/// Free-form remarks.
	pub remarks: String,
	/// Receives the notification when the request times out in the provider's queue.
	pub queue_timeout_url: Url,
	/// Receives the asynchronous result.
	pub result_url: Url,
	/// Defaults to [`B2cCommand::BusinessPayment`].
	pub command_id: B2cCommand,
	/// Optional free-form occasion.
	pub occasion: Option<String>,
	/// Caller-chosen idempotency reference; generated when absent.
	pub originator_conversation_id: Option<String>,
}
impl B2cPaymentRequest {
	/// Creates a business payment of `amount` to `party_b`.
	pub fn new(
		amount: u64,
		party_b: impl Into<String>,
		remarks: impl Into<String>,
		queue_timeout_url: Url,
		result_url: Url,
	) -> Self {
		Self {
			amount,
			party_b: party_b.into(),
			remarks: remarks.into(),
			queue_timeout_url,
			result_url,
			command_id: B2cCommand::default(),
			occasion: None,
			originator_conversation_id: None,
		}
	}

	/// Overrides the command identifier.
	pub fn with_command(mut self, command_id: B2cCommand) -> Self {
		self.command_id = command_id;

		self
	}

	/// Sets the originator conversation ID instead of generating one.
	pub fn with_originator_conversation_id(mut self, id: impl Into<String>) -> Self {
		self.originator_conversation_id = Some(id.into());

		self
	}

	fn to_body<'a>(
		&'a self,
		short_code: &'a str,
		initiator: Initiator<'a>,
		originator_conversation_id: &'a str,
	) -> B2cPaymentBody<'a> {
		B2cPaymentBody {
			originator_conversation_id,
			initiator_name: initiator.name,
			security_credential: initiator.security_credential,
			command_id: self.command_id,
			amount: self.amount,
			party_a: short_code,
			party_b: &self.party_b,
			remarks: &self.remarks,
			queue_time_out_url: &self.queue_timeout_url,
			result_url: &self.result_url,
			occasion: self.occasion.as_deref().unwrap_or_default(),
		}
	}
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct B2cPaymentBody<'a> {
	#[serde(rename = "OriginatorConversationID")]
	originator_conversation_id: &'a str,
	initiator_name: &'a str,
	security_credential: &'a Secret,
	#[serde(rename = "CommandID")]
	command_id: B2cCommand,
	amount: u64,
	party_a: &'a str,
	party_b: &'a str,
	remarks: &'a str,
	#[serde(rename = "QueueTimeOutURL")]
	queue_time_out_url: &'a Url,
	#[serde(rename = "ResultURL")]
	result_url: &'a Url,
	occasion: &'a str,
}

impl<C, M> crate::Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Pays a subscriber from the client's shortcode. Requires the initiator identity.
	pub async fn b2c_payment(&self, request: &B2cPaymentRequest) -> Result<Value> {
		const OPERATION: Operation = Operation::B2cPayment;

		let credentials = self.credentials();
		let initiator = credentials.require_initiator(OPERATION.as_str())?;
		let originator_conversation_id =
			request.originator_conversation_id.clone().unwrap_or_else(api::generate_reference);
		let body =
			request.to_body(credentials.short_code(), initiator, &originator_conversation_id);

		self.dispatch(OPERATION, B2C_PAYMENT_PATH, &body).await
	}
}
