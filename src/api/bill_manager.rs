//! Bill manager: invoicing on behalf of a paybill.

// self
use crate::{
	_prelude::*,
	http::{ApiHttpClient, TransportErrorMapper},
	obs::Operation,
};

/// Bill manager onboarding endpoint.
pub const BILL_MANAGER_OPT_IN_PATH: &str = "/v1/billmanager-invoice/optin";
/// Single invoice endpoint.
pub const BILL_MANAGER_SINGLE_INVOICE_PATH: &str = "/v1/billmanager-invoice/single-invoicing";
/// Invoice cancellation endpoint.
pub const BILL_MANAGER_CANCEL_INVOICE_PATH: &str = "/v1/billmanager-invoice/cancel-single-invoice";

/// Onboarding details for the client's shortcode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BillManagerOptInRequest {
	/// Contact email shown on invoices.
	pub email: String,
	/// Contact phone number shown on invoices.
	pub official_contact: String,
	/// Whether the provider sends payment reminders.
	pub send_reminders: bool,
	/// Optional logo URL.
	pub logo: Option<Url>,
	/// Receives payment notifications.
	pub callback_url: Url,
}

/// Invoice line item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
	/// Line item label.
	pub item_name: String,
	/// Line amount in whole shillings.
	pub amount: u64,
}

/// Single invoice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRequest {
	/// Caller's unique invoice reference.
	pub external_reference: String,
	/// Billed customer's full name.
	pub billed_full_name: String,
	/// Billed customer's MSISDN.
	pub billed_phone_number: String,
	/// Billing period label, e.g. `August 2021`.
	pub billed_period: String,
	/// Invoice title.
	pub invoice_name: String,
	/// Due date, `YYYY-MM-DD`.
	pub due_date: String,
	/// Account the customer pays against.
	pub account_reference: String,
	/// Total amount in whole shillings.
	pub amount: u64,
	/// Optional line items.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub invoice_items: Vec<InvoiceItem>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OptInBody<'a> {
	shortcode: &'a str,
	email: &'a str,
	official_contact: &'a str,
	send_reminders: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	logo: Option<&'a Url>,
	#[serde(rename = "callbackurl")]
	callback_url: &'a Url,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CancelInvoiceBody<'a> {
	external_reference: &'a str,
}

fn opt_in_body<'a>(short_code: &'a str, request: &'a BillManagerOptInRequest) -> OptInBody<'a> {
	OptInBody {
		shortcode: short_code,
		email: &request.email,
		official_contact: &request.official_contact,
		send_reminders: if request.send_reminders { "1" } else { "0" },
		logo: request.logo.as_ref(),
		callback_url: &request.callback_url,
	}
}

impl<C, M> crate::Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Onboards the client's shortcode to the bill manager.
	pub async fn bill_manager_opt_in(&self, request: &BillManagerOptInRequest) -> Result<Value> {
		let body = opt_in_body(self.credentials().short_code(), request);

		self.dispatch(Operation::BillManagerOptIn, BILL_MANAGER_OPT_IN_PATH, &body).await
	}

	/// Sends a single invoice to a customer.
	pub async fn bill_manager_single_invoice(&self, request: &InvoiceRequest) -> Result<Value> {
		self.dispatch(
			Operation::BillManagerSingleInvoice,
			BILL_MANAGER_SINGLE_INVOICE_PATH,
			request,
		)
		.await
	}

	/// Cancels a previously sent invoice by its external reference.
	pub async fn bill_manager_cancel_invoice(&self, external_reference: &str) -> Result<Value> {
		let body = [CancelInvoiceBody { external_reference }];

		self.dispatch(Operation::BillManagerCancelInvoice, BILL_MANAGER_CANCEL_INVOICE_PATH, &body)
			.await
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn opt_in_flags_reminders_as_digits() {
		let request = BillManagerOptInRequest {
			email: "billing@example.com".into(),
			official_contact: "0710000000".into(),
			send_reminders: true,
			logo: None,
			callback_url: Url::parse("https://example.com/bills").expect("URL should parse."),
		};
		let body =
			serde_json::to_value(opt_in_body("718003", &request)).expect("Body should serialize.");

		assert_eq!(
			body,
			json!({
				"shortcode": "718003",
				"email": "billing@example.com",
				"officialContact": "0710000000",
				"sendReminders": "1",
				"callbackurl": "https://example.com/bills",
			})
		);
	}

	#[test]
	fn invoice_serializes_items_in_camel_case() {
		let invoice = InvoiceRequest {
			external_reference: "#9932340".into(),
			billed_full_name: "John Doe".into(),
			billed_phone_number: "0722000000".into(),
			billed_period: "August 2021".into(),
			invoice_name: "Jentrys".into(),
			due_date: "2021-10-12".into(),
			account_reference: "1ASD678H".into(),
			amount: 800,
			invoice_items: vec![InvoiceItem { item_name: "food".into(), amount: 700 }],
		};
		let body = serde_json::to_value(&invoice).expect("Invoice should serialize.");

		assert_eq!(body["externalReference"], "#9932340");
		assert_eq!(body["invoiceItems"][0]["itemName"], "food");

		let cancel = serde_json::to_value([CancelInvoiceBody { external_reference: "#9932340" }])
			.expect("Cancel body should serialize.");

		assert_eq!(cancel, json!([{ "externalReference": "#9932340" }]));
	}
}
