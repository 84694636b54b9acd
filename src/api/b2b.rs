//! Business-to-business transfers and tax remittance.

// self
use crate::{
	_prelude::*,
	api::SHORT_CODE_IDENTIFIER,
	auth::{Initiator, Secret},
	http::{ApiHttpClient, TransportErrorMapper},
	obs::Operation,
};

/// B2B payment endpoint.
pub const B2B_PAYMENT_PATH: &str = "/mpesa/b2b/v1/paymentrequest";
/// Tax remittance endpoint.
pub const REMIT_TAX_PATH: &str = "/mpesa/b2b/v1/remittax";
/// Revenue authority shortcode receiving tax remittances.
pub const TAX_AUTHORITY_SHORT_CODE: &str = "572572";

/// B2B command identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum B2bCommand {
	/// Pay a paybill account.
	#[default]
	BusinessPayBill,
	/// Pay a till.
	BusinessBuyGoods,
	/// Move funds from a utility to a working account.
	DisburseFundsToBusiness,
	/// Transfer between businesses' working accounts.
	BusinessToBusinessTransfer,
	/// Transfer between merchant accounts.
	MerchantToMerchantTransfer,
	/// Remit tax to the revenue authority.
	PayTaxToKRA,
}

/// Business-to-business payment request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct B2bPaymentRequest {
	/// Amount in whole shillings.
	pub amount: u64,
	/// Receiving shortcode.
	pub party_b: String,
	/// Account number at the receiving business.
	pub account_reference: String,
	/// Free-form remarks.
	pub remarks: String,
	/// Receives the notification when the request times out in the provider's queue.
	pub queue_timeout_url: Url,
	/// Receives the asynchronous result.
	pub result_url: Url,
	/// Defaults to [`B2bCommand::BusinessPayBill`].
	pub command_id: B2bCommand,
	/// Optional MSISDN of the customer on whose behalf the business pays.
	pub requester: Option<String>,
}
impl B2bPaymentRequest {
	/// Creates a paybill transfer of `amount` to `party_b`.
	pub fn new(
		amount: u64,
		party_b: impl Into<String>,
		account_reference: impl Into<String>,
		remarks: impl Into<String>,
		queue_timeout_url: Url,
		result_url: Url,
	) -> Self {
		Self {
			amount,
			party_b: party_b.into(),
			account_reference: account_reference.into(),
			remarks: remarks.into(),
			queue_timeout_url,
			result_url,
			command_id: B2bCommand::default(),
			requester: None,
		}
	}

	/// Overrides the command identifier.
	pub fn with_command(mut self, command_id: B2bCommand) -> Self {
		self.command_id = command_id;

		self
	}

	/// Sets the requesting customer's MSISDN.
	pub fn with_requester(mut self, requester: impl Into<String>) -> Self {
		self.requester = Some(requester.into());

		self
	}
}

/// Tax remittance request; the receiver is always [`TAX_AUTHORITY_SHORT_CODE`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemitTaxRequest {
	/// Amount in whole shillings.
	pub amount: u64,
	/// Payment registration number issued by the revenue authority.
	pub account_reference: String,
	/// Free-form remarks.
	pub remarks: String,
	/// Receives the notification when the request times out in the provider's queue.
	pub queue_timeout_url: Url,
	/// Receives the asynchronous result.
	pub result_url: Url,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct B2bBody<'a> {
	initiator: &'a str,
	security_credential: &'a Secret,
	#[serde(rename = "CommandID")]
	command_id: B2bCommand,
	sender_identifier_type: &'static str,
	// Provider spelling.
	#[serde(rename = "RecieverIdentifierType")]
	receiver_identifier_type: &'static str,
	amount: u64,
	party_a: &'a str,
	party_b: &'a str,
	account_reference: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	requester: Option<&'a str>,
	remarks: &'a str,
	#[serde(rename = "QueueTimeOutURL")]
	queue_time_out_url: &'a Url,
	#[serde(rename = "ResultURL")]
	result_url: &'a Url,
}
impl<'a> B2bBody<'a> {
	fn payment(short_code: &'a str, initiator: Initiator<'a>, request: &'a B2bPaymentRequest) -> Self {
		Self {
			initiator: initiator.name,
			security_credential: initiator.security_credential,
			command_id: request.command_id,
			sender_identifier_type: SHORT_CODE_IDENTIFIER,
			receiver_identifier_type: SHORT_CODE_IDENTIFIER,
			amount: request.amount,
			party_a: short_code,
			party_b: &request.party_b,
			account_reference: &request.account_reference,
			requester: request.requester.as_deref(),
			remarks: &request.remarks,
			queue_time_out_url: &request.queue_timeout_url,
			result_url: &request.result_url,
		}
	}

	fn tax(short_code: &'a str, initiator: Initiator<'a>, request: &'a RemitTaxRequest) -> Self {
		Self {
			initiator: initiator.name,
			security_credential: initiator.security_credential,
			command_id: B2bCommand::PayTaxToKRA,
			sender_identifier_type: SHORT_CODE_IDENTIFIER,
			receiver_identifier_type: SHORT_CODE_IDENTIFIER,
			amount: request.amount,
			party_a: short_code,
			party_b: TAX_AUTHORITY_SHORT_CODE,
			account_reference: &request.account_reference,
			requester: None,
			remarks: &request.remarks,
			queue_time_out_url: &request.queue_timeout_url,
			result_url: &request.result_url,
		}
	}
}

impl<C, M> crate::Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Pays another business from the client's shortcode. Requires the initiator identity.
	pub async fn b2b_payment(&self, request: &B2bPaymentRequest) -> Result<Value> {
		const OPERATION: Operation = Operation::B2bPayment;

		let credentials = self.credentials();
		let initiator = credentials.require_initiator(OPERATION.as_str())?;
		let body = B2bBody::payment(credentials.short_code(), initiator, request);

		self.dispatch(OPERATION, B2B_PAYMENT_PATH, &body).await
	}

	/// Remits tax to the revenue authority. Requires the initiator identity.
	pub async fn remit_tax(&self, request: &RemitTaxRequest) -> Result<Value> {
		const OPERATION: Operation = Operation::RemitTax;

		let credentials = self.credentials();
		let initiator = credentials.require_initiator(OPERATION.as_str())?;
		let body = B2bBody::tax(credentials.short_code(), initiator, request);

		self.dispatch(OPERATION, REMIT_TAX_PATH, &body).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url(path: &str) -> Url {
		Url::parse(&format!("https://example.com/{path}")).expect("URL should parse.")
	}

	#[test]
	fn payment_body_defaults_to_paybill_with_shortcode_identifiers() {
		let credential = Secret::new("encrypted");
		let initiator = Initiator { name: "testapi", security_credential: &credential };
		let request =
			B2bPaymentRequest::new(250, "600000", "INV-1", "Stock", url("timeout"), url("result"));
		let body = serde_json::to_value(B2bBody::payment("600988", initiator, &request))
			.expect("Body should serialize.");

		assert_eq!(body["Initiator"], "testapi");
		assert_eq!(body["CommandID"], "BusinessPayBill");
		assert_eq!(body["SenderIdentifierType"], "4");
		assert_eq!(body["RecieverIdentifierType"], "4");
		assert_eq!(body["PartyA"], "600988");
		assert_eq!(body["PartyB"], "600000");
		assert_eq!(body["QueueTimeOutURL"], "https://example.com/timeout");
		assert!(body.get("Requester").is_none());
	}

	#[test]
	fn tax_body_targets_the_revenue_authority() {
		let credential = Secret::new("encrypted");
		let initiator = Initiator { name: "testapi", security_credential: &credential };
		let request = RemitTaxRequest {
			amount: 1000,
			account_reference: "PRN-42".into(),
			remarks: "VAT".into(),
			queue_timeout_url: url("timeout"),
			result_url: url("result"),
		};
		let body = serde_json::to_value(B2bBody::tax("600988", initiator, &request))
			.expect("Body should serialize.");

		assert_eq!(body["CommandID"], "PayTaxToKRA");
		assert_eq!(body["PartyB"], "572572");
		assert_eq!(body["AccountReference"], "PRN-42");
	}
}
