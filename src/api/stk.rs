//! Prompt-pay (STK push) initiation and status queries.

// self
use crate::{
	_prelude::*,
	auth::{PasskeyAuth, Secret, Timestamp},
	http::{ApiHttpClient, TransportErrorMapper},
	obs::Operation,
};

/// Prompt-pay initiation endpoint.
pub const STK_PUSH_PATH: &str = "/mpesa/stkpush/v1/processrequest";
/// Prompt-pay status query endpoint.
pub const STK_PUSH_QUERY_PATH: &str = "/mpesa/stkpushquery/v1/query";

/// Customer-to-business transaction type, shared by prompt-pay and C2B simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
	/// Paybill payment.
	#[default]
	CustomerPayBillOnline,
	/// Till (buy goods) payment.
	CustomerBuyGoodsOnline,
}

/// Prompt-pay request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StkPushRequest {
	/// Amount in whole shillings.
	pub amount: u64,
	/// Subscriber MSISDN (`2547XXXXXXXX`), used as both `PartyA` and `PhoneNumber`.
	pub phone_number: String,
	/// URL receiving the asynchronous result.
	pub callback_url: Url,
	/// Reference shown to the subscriber.
	pub account_reference: String,
	/// Free-form description.
	pub transaction_desc: String,
	/// Defaults to [`TransactionType::CustomerPayBillOnline`].
	pub transaction_type: TransactionType,
	/// Receiving party; defaults to the client's shortcode (set a till number for buy goods).
	pub party_b: Option<String>,
}
impl StkPushRequest {
	/// Creates a paybill prompt for `amount` to `phone_number`.
	pub fn new(
		amount: u64,
		phone_number: impl Into<String>,
		callback_url: Url,
		account_reference: impl Into<String>,
		transaction_desc: impl Into<String>,
	) -> Self {
		Self {
			amount,
			phone_number: phone_number.into(),
			callback_url,
			account_reference: account_reference.into(),
			transaction_desc: transaction_desc.into(),
			transaction_type: TransactionType::default(),
			party_b: None,
		}
	}

	/// Overrides the transaction type.
	pub fn with_transaction_type(mut self, transaction_type: TransactionType) -> Self {
		self.transaction_type = transaction_type;

		self
	}

	/// Overrides the receiving party.
	pub fn with_party_b(mut self, party_b: impl Into<String>) -> Self {
		self.party_b = Some(party_b.into());

		self
	}

	fn to_body<'a>(&'a self, short_code: &'a str, auth: &'a PasskeyAuth) -> StkPushBody<'a> {
		StkPushBody {
			business_short_code: short_code,
			password: &auth.password,
			timestamp: &auth.timestamp,
			transaction_type: self.transaction_type,
			amount: self.amount,
			party_a: &self.phone_number,
			party_b: self.party_b.as_deref().unwrap_or(short_code),
			phone_number: &self.phone_number,
			callback_url: &self.callback_url,
			account_reference: &self.account_reference,
			transaction_desc: &self.transaction_desc,
		}
	}
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct StkPushBody<'a> {
	business_short_code: &'a str,
	password: &'a Secret,
	timestamp: &'a Timestamp,
	transaction_type: TransactionType,
	amount: u64,
	party_a: &'a str,
	party_b: &'a str,
	phone_number: &'a str,
	#[serde(rename = "CallBackURL")]
	callback_url: &'a Url,
	account_reference: &'a str,
	transaction_desc: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct StkPushQueryBody<'a> {
	business_short_code: &'a str,
	password: &'a Secret,
	timestamp: &'a Timestamp,
	#[serde(rename = "CheckoutRequestID")]
	checkout_request_id: &'a str,
}

impl<C, M> crate::Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Prompts the subscriber's handset to authorize a payment.
	///
	/// Requires a configured passkey; the password and timestamp are derived from the client
	/// clock at call time.
	pub async fn stk_push(&self, request: &StkPushRequest) -> Result<Value> {
		const OPERATION: Operation = Operation::StkPush;

		let auth = self.passkey_auth(OPERATION)?;
		let short_code = self.credentials().short_code();

		self.dispatch(OPERATION, STK_PUSH_PATH, &request.to_body(short_code, &auth)).await
	}

	/// Queries the status of a prompt by its `CheckoutRequestID`.
	pub async fn stk_push_query(&self, checkout_request_id: &str) -> Result<Value> {
		const OPERATION: Operation = Operation::StkPushQuery;

		let auth = self.passkey_auth(OPERATION)?;
		let body = StkPushQueryBody {
			business_short_code: self.credentials().short_code(),
			password: &auth.password,
			timestamp: &auth.timestamp,
			checkout_request_id,
		};

		self.dispatch(OPERATION, STK_PUSH_QUERY_PATH, &body).await
	}

	fn passkey_auth(&self, operation: Operation) -> Result<PasskeyAuth> {
		let credentials = self.credentials();
		let passkey = credentials.require_passkey(operation.as_str())?;

		Ok(PasskeyAuth::derive(credentials.short_code(), passkey, self.now()))
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	use time::macros;
	// self
	use super::*;

	fn callback() -> Url {
		Url::parse("https://example.com/callback").expect("Callback URL should parse.")
	}

	#[test]
	fn body_fills_shortcode_password_and_defaults() {
		let auth = PasskeyAuth::derive(
			"600988",
			&Secret::new("test_passkey"),
			macros::datetime!(2023-01-01 00:00:00 UTC),
		);
		let request = StkPushRequest::new(100, "254712345678", callback(), "Test", "Test");
		let body = serde_json::to_value(request.to_body("600988", &auth))
			.expect("Body should serialize.");

		assert_eq!(
			body,
			json!({
				"BusinessShortCode": "600988",
				"Password": "NjAwOTg4dGVzdF9wYXNza2V5MjAyMzAxMDEwMDAwMDA=",
				"Timestamp": "20230101000000",
				"TransactionType": "CustomerPayBillOnline",
				"Amount": 100,
				"PartyA": "254712345678",
				"PartyB": "600988",
				"PhoneNumber": "254712345678",
				"CallBackURL": "https://example.com/callback",
				"AccountReference": "Test",
				"TransactionDesc": "Test",
			})
		);
	}

	#[test]
	fn buy_goods_overrides_party_b() {
		let auth = PasskeyAuth::derive(
			"174379",
			&Secret::new("pk"),
			macros::datetime!(2024-05-01 12:30:00 +03:00),
		);
		let request = StkPushRequest::new(1, "254700000000", callback(), "Till", "Goods")
			.with_transaction_type(TransactionType::CustomerBuyGoodsOnline)
			.with_party_b("5001234");
		let body = serde_json::to_value(request.to_body("174379", &auth))
			.expect("Body should serialize.");

		assert_eq!(body["TransactionType"], "CustomerBuyGoodsOnline");
		assert_eq!(body["PartyB"], "5001234");
		assert_eq!(body["BusinessShortCode"], "174379");
		assert_eq!(body["Timestamp"], "20240501123000");
	}
}
