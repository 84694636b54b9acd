//! Dynamic QR code generation.

// self
use crate::{
	_prelude::*,
	http::{ApiHttpClient, TransportErrorMapper},
	obs::Operation,
};

/// Dynamic QR endpoint.
pub const DYNAMIC_QR_PATH: &str = "/mpesa/qrcode/v1/generate";

/// Payment flow a QR code starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QrTransactionCode {
	/// Pay a till.
	#[serde(rename = "BG")]
	BuyGoods,
	/// Withdraw cash at an agent.
	#[serde(rename = "WA")]
	WithdrawAtAgent,
	/// Pay a paybill.
	#[serde(rename = "PB")]
	PayBill,
	/// Send money to a phone number.
	#[serde(rename = "SM")]
	SendMoney,
	/// Send to a business.
	#[serde(rename = "SB")]
	SendToBusiness,
}

/// QR generation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DynamicQrRequest {
	/// Merchant name shown after scanning.
	pub merchant_name: String,
	/// Transaction reference.
	pub ref_no: String,
	/// Amount in whole shillings.
	pub amount: u64,
	/// Payment flow.
	pub trx_code: QrTransactionCode,
	/// Credit party identifier: till, paybill, agent number, or MSISDN depending on `trx_code`.
	pub cpi: String,
	/// Image edge in pixels.
	pub size: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct DynamicQrBody<'a> {
	merchant_name: &'a str,
	ref_no: &'a str,
	amount: u64,
	trx_code: QrTransactionCode,
	#[serde(rename = "CPI")]
	cpi: &'a str,
	size: String,
}
impl<'a> From<&'a DynamicQrRequest> for DynamicQrBody<'a> {
	fn from(request: &'a DynamicQrRequest) -> Self {
		Self {
			merchant_name: &request.merchant_name,
			ref_no: &request.ref_no,
			amount: request.amount,
			trx_code: request.trx_code,
			cpi: &request.cpi,
			size: request.size.to_string(),
		}
	}
}

impl<C, M> crate::Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Generates a QR code; the response carries the base64-encoded image.
	pub async fn dynamic_qr(&self, request: &DynamicQrRequest) -> Result<Value> {
		self.dispatch(Operation::DynamicQr, DYNAMIC_QR_PATH, &DynamicQrBody::from(request)).await
	}
}
