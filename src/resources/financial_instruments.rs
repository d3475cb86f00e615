//! Financial instruments: stored cards and PSP tokens.

// self
use crate::{
	_prelude::*,
	client::{Client, Page, response::null_default},
	http::{HttpClient, TransportErrorMapper},
	obs::Operation,
	resources::{Card, PspToken},
};

/// Path of the financial instrument collection.
pub const FINANCIAL_INSTRUMENTS_PATH: &str = "/financial_instruments";

/// Stored financial instrument.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialInstrumentData {
	/// Instrument identifier.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub id: String,
	/// Creation time, UTC.
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "time::serde::rfc3339::option"
	)]
	pub created_at: Option<OffsetDateTime>,
	/// Last update time, UTC.
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "time::serde::rfc3339::option"
	)]
	pub updated_at: Option<OffsetDateTime>,
	/// Sub-account owning the record.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub sub_account_id: String,
	/// Card details when the instrument is a payment card.
	#[serde(default, deserialize_with = "null_default")]
	pub card: Card,
	/// Token details when the instrument is a PSP token.
	#[serde(default, deserialize_with = "null_default")]
	pub psp_token: PspToken,
}

/// Single-instrument envelope returned by create calls.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialInstrument {
	/// Created instrument.
	#[serde(default, deserialize_with = "null_default")]
	pub data: FinancialInstrumentData,
}

/// Body registering an existing PSP token as an instrument.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePspTokenRequest {
	/// PSP token to register.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub psp_token: Option<PspToken>,
}

/// Body registering a payment card as an instrument.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePaymentCardRequest {
	/// Card to register.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub card: Option<Card>,
}
impl From<Card> for CreatePaymentCardRequest {
	fn from(card: Card) -> Self {
		Self { card: Some(card) }
	}
}

impl<C, M> Client<C, M>
where
	C: ?Sized + HttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Lists stored instruments (first page only).
	pub async fn get_financial_instruments(&self) -> Result<Page<FinancialInstrumentData>> {
		self.call(Operation::GetFinancialInstruments, self.get(FINANCIAL_INSTRUMENTS_PATH)).await
	}

	/// Creates an instrument from an arbitrary JSON-serializable body.
	pub async fn create_financial_instrument<B>(&self, body: &B) -> Result<FinancialInstrument>
	where
		B: ?Sized + Serialize,
	{
		self.call(
			Operation::CreateFinancialInstrument,
			self.post(FINANCIAL_INSTRUMENTS_PATH, body),
		)
		.await
	}

	/// Registers the token `id` issued by `psp`.
	pub async fn create_psp_token(
		&self,
		psp: impl Into<String>,
		id: impl Into<String>,
	) -> Result<FinancialInstrument> {
		let body = CreatePspTokenRequest {
			psp_token: Some(PspToken { id: id.into(), psp: psp.into(), ..Default::default() }),
		};

		self.create_financial_instrument(&body).await
	}

	/// Registers a payment card.
	pub async fn create_payment_card(
		&self,
		body: &CreatePaymentCardRequest,
	) -> Result<FinancialInstrument> {
		self.create_financial_instrument(body).await
	}
}
