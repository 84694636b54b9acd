//! B2B express checkout: a USSD prompt pushed to a merchant's till operator.

// self
use crate::{
	_prelude::*,
	api,
	http::{ApiHttpClient, TransportErrorMapper},
	obs::Operation,
};

/// B2B express checkout endpoint.
pub const B2B_EXPRESS_CHECKOUT_PATH: &str = "/v1/ussdpush/get-msisdn";

/// USSD push asking a merchant to pay the client's till.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct B2bExpressCheckoutRequest {
	/// Merchant till being debited.
	pub primary_short_code: String,
	/// Amount in whole shillings.
	pub amount: u64,
	/// Reference shown on the prompt.
	pub payment_ref: String,
	/// Receives the asynchronous result.
	pub callback_url: Url,
	/// Vendor name shown on the prompt.
	pub partner_name: String,
	/// Unique request reference; generated when absent.
	pub request_ref_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct B2bExpressCheckoutBody<'a> {
	primary_short_code: &'a str,
	receiver_short_code: &'a str,
	amount: u64,
	payment_ref: &'a str,
	callback_url: &'a Url,
	partner_name: &'a str,
	#[serde(rename = "RequestRefID")]
	request_ref_id: &'a str,
}

impl<C, M> crate::Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Pushes a USSD payment prompt to a merchant, paying into the client's shortcode.
	pub async fn b2b_express_checkout(
		&self,
		request: &B2bExpressCheckoutRequest,
	) -> Result<Value> {
		let request_ref_id = request.request_ref_id.clone().unwrap_or_else(api::generate_reference);
		let body = B2bExpressCheckoutBody {
			primary_short_code: &request.primary_short_code,
			receiver_short_code: self.credentials().short_code(),
			amount: request.amount,
			payment_ref: &request.payment_ref,
			callback_url: &request.callback_url,
			partner_name: &request.partner_name,
			request_ref_id: &request_ref_id,
		};

		self.dispatch(Operation::B2bExpressCheckout, B2B_EXPRESS_CHECKOUT_PATH, &body).await
	}
}
