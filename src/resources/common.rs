//! Payment payload shapes shared by several endpoints.

// self
use crate::{_prelude::*, client::response::null_default};

/// Postal contact used for billing and shipping.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactAddress {
	/// Contact name.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub name: String,
	/// Company name.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub company: String,
	/// First address line.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub address1: String,
	/// Second address line.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub address2: String,
	/// City or locality.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub city: String,
	/// State, province, or region.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub region: String,
	/// ISO 3166 country code.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub country: String,
	/// Postal or ZIP code.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub postal_code: String,
	/// Contact phone number.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub phone: String,
}

/// Payment card. Sensitive fields are expected to carry VGS aliases, not raw values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
	/// Cardholder name.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub name: String,
	/// Expiry month, 1-12.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "is_default")]
	pub exp_month: u32,
	/// Four-digit expiry year.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "is_default")]
	pub exp_year: u32,
	/// Billing address on file for the card.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub billing_address: Option<ContactAddress>,
	/// Card number (or its alias).
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub number: String,
	/// Card brand reported by VGS.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub brand: String,
	/// Last four digits reported by VGS.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub last4: String,
	/// Security code (or its alias).
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub cvc: String,
}

/// Token issued by a payment service processor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PspToken {
	/// PSP-side identifier.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub id: String,
	/// Token value.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub value: String,
	/// PSP name, e.g. `stripe`.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub psp: String,
}

/// Gateway descriptor embedded in gateway listings and verification results.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayInfo {
	/// Gateway type, e.g. `stripe`.
	#[serde(
		default,
		deserialize_with = "null_default",
		rename = "type",
		skip_serializing_if = "String::is_empty",
	)]
	pub type_: String,
	/// Unique identifier used to refer to the gateway in routing rules.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub id: String,
	/// ISO 4217 currency code; VGS defaults it to USD.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub default_currency: String,
	/// Whether transfers matching no routing rule use this gateway.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "is_default")]
	pub default_gateway: bool,
	/// Gateway-specific configuration passed through verbatim.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub config: Option<serde_json::Value>,
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
}

/// Returns `true` for zero, `false`, and other default values omitted on the wire.
pub(crate) fn is_default<T>(value: &T) -> bool
where
	T: Default + PartialEq,
{
	*value == T::default()
}
