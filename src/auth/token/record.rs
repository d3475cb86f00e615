//! Immutable OAuth token record, its wire form, and lifetime checks.

// self
use crate::{_prelude::*, auth::token::secret::TokenSecret, client::response::null_default};

/// Token endpoint success body.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TokenResponse {
	/// Bearer token value.
	#[serde(default, deserialize_with = "null_default")]
	pub access_token: TokenSecret,
	/// Access token lifetime in seconds.
	#[serde(default, deserialize_with = "null_default")]
	pub expires_in: i64,
	/// Refresh token lifetime in seconds (informational).
	#[serde(default, deserialize_with = "null_default")]
	pub refresh_expires_in: i64,
	/// Token type, usually `Bearer`.
	#[serde(default, deserialize_with = "null_default")]
	pub token_type: String,
	/// Keycloak not-before policy (informational).
	#[serde(default, deserialize_with = "null_default", rename = "not-before-policy")]
	pub not_before_policy: i64,
	/// Space-delimited granted scopes.
	#[serde(default, deserialize_with = "null_default")]
	pub scope: String,
}
impl TokenResponse {
	/// Stamps the response with its creation instant.
	pub fn issued_at(self, created_at: OffsetDateTime) -> OAuthToken {
		OAuthToken {
			access_token: self.access_token,
			expires_in: self.expires_in,
			refresh_expires_in: self.refresh_expires_in,
			token_type: self.token_type,
			not_before_policy: self.not_before_policy,
			scope: self.scope,
			created_at,
		}
	}
}

/// Cached OAuth access token.
///
/// Records are replaced wholesale on refresh and never mutated in place.
#[derive(Clone)]
pub struct OAuthToken {
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Lifetime in seconds counted from `created_at`.
	pub expires_in: i64,
	/// Refresh token lifetime in seconds.
	pub refresh_expires_in: i64,
	/// Token type reported by the token endpoint.
	pub token_type: String,
	/// Keycloak not-before policy.
	pub not_before_policy: i64,
	/// Space-delimited granted scopes.
	pub scope: String,
	/// Instant the token was received.
	pub created_at: OffsetDateTime,
}
impl OAuthToken {
	/// Creates a bearer token record with the given lifetime.
	pub fn new(
		access_token: impl Into<String>,
		expires_in: i64,
		created_at: OffsetDateTime,
	) -> Self {
		TokenResponse {
			access_token: TokenSecret::new(access_token),
			expires_in,
			token_type: "Bearer".into(),
			..Default::default()
		}
		.issued_at(created_at)
	}

	/// Instant at which the token stops being valid.
	pub fn expires_at(&self) -> OffsetDateTime {
		self.created_at.saturating_add(Duration::seconds(self.expires_in))
	}

	/// Returns `true` if the token carries a value and `instant` is before its expiry.
	pub fn is_valid_at(&self, instant: OffsetDateTime) -> bool {
		!self.access_token.is_empty() && instant < self.expires_at()
	}

	/// Convenience helper that checks validity against the current UTC instant.
	pub fn is_valid(&self) -> bool {
		self.is_valid_at(OffsetDateTime::now_utc())
	}
}
impl Debug for OAuthToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuthToken")
			.field("access_token", &self.access_token)
			.field("expires_in", &self.expires_in)
			.field("token_type", &self.token_type)
			.field("scope", &self.scope)
			.field("created_at", &self.created_at)
			.finish()
	}
}
