//! Card verifications run through a gateway.

// self
use crate::{
	_prelude::*,
	client::{Client, response::null_default},
	http::{HttpClient, TransportErrorMapper},
	obs::Operation,
	resources::{Card, ContactAddress, GatewayInfo, common::is_default},
};

/// Path of the verification collection, spelled as the deployed API expects.
pub const VERIFICATIONS_PATH: &str = "/verfications";

/// Gateway-level options for a verification.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayOptions {
	/// ISO 4217 currency code.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub currency: String,
	/// Address the order ships to.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub shipping_address: Option<ContactAddress>,
}

/// Body of a verification request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationsRequest {
	/// Card to verify.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub card: Option<Card>,
	/// Gateway-level options.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gateway_options: Option<GatewayOptions>,
}

/// Gateway outcome for a verification.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayResponse {
	/// Gateway-side transaction identifier.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub id: String,
	/// Human-readable gateway message.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub message: String,
	/// Processing state.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub state: String,
	/// Gateway error code, if any.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub error_code: String,
	/// Unparsed gateway payload.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub raw_response: String,
}

/// Address verification result.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvsResult {
	/// AVS response code.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub code: String,
	/// Human-readable AVS description.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub message: String,
	/// Street match indicator.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub street_match: String,
	/// Postal code match indicator.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub postal_match: String,
}

/// Verification record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Verification {
	/// Verification identifier.
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
	/// Transfer type.
	#[serde(
		default,
		deserialize_with = "null_default",
		rename = "type",
		skip_serializing_if = "String::is_empty",
	)]
	pub type_: String,
	/// Amount in minor units.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "is_default")]
	pub amount: i64,
	/// Fee in minor units.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "is_default")]
	pub fee: i64,
	/// ISO 4217 currency code.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub currency: String,
	/// Gateway that processed the request.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gateway: Option<GatewayInfo>,
	/// Gateway outcome.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gateway_response: Option<GatewayResponse>,
	/// Source instrument.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub source: String,
	/// Destination instrument.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub destination: String,
	/// Processing state.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub state: String,
	/// Address verification result.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub avs_result: Option<AvsResult>,
	/// Sub-account owning the record.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub sub_account_id: String,
}

/// Envelope returned by [`Client::create_verifications`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationsResponse {
	/// Created verification.
	#[serde(default, deserialize_with = "null_default")]
	pub data: Verification,
}

impl<C, M> Client<C, M>
where
	C: ?Sized + HttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Verifies a card through the vault's gateway.
	pub async fn create_verifications(
		&self,
		body: &VerificationsRequest,
	) -> Result<VerificationsResponse> {
		self.call(Operation::CreateVerifications, self.post(VERIFICATIONS_PATH, body)).await
	}
}
