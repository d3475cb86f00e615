//! OAuth client-credentials configuration and token request construction.

// crates.io
use oauth2::{
	ClientId, ClientSecret,
	http::{
		Method, Request,
		header::{ACCEPT, CONTENT_TYPE},
	},
};
use url::form_urlencoded;
// self
use crate::{_prelude::*, error::ConfigError, http::HttpRequest};

/// Default VGS token endpoint.
pub const AUTH_ENDPOINT: &str =
	"https://auth.verygoodsecurity.com/auth/realms/vgs/protocol/openid-connect/token";
/// Grant type used for every token request.
pub const CLIENT_CREDENTIALS: &str = "client_credentials";

/// Immutable client-credentials configuration.
///
/// The token endpoint is a plain field defaulting to [`AUTH_ENDPOINT`]; there is no
/// process-wide override.
#[derive(Clone, Debug)]
pub struct OauthConfig {
	/// OAuth client identifier.
	pub client_id: ClientId,
	/// OAuth client secret (redacted by `Debug`).
	pub client_secret: ClientSecret,
	/// Grant type sent as `grant_type`.
	pub grant_type: String,
	/// Token endpoint URL.
	pub token_endpoint: String,
}
impl OauthConfig {
	/// Creates a configuration targeting the default token endpoint.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self {
			client_id: ClientId::new(client_id.into()),
			client_secret: ClientSecret::new(client_secret.into()),
			grant_type: CLIENT_CREDENTIALS.into(),
			token_endpoint: AUTH_ENDPOINT.into(),
		}
	}

	/// Points the configuration at a different token endpoint.
	pub fn with_token_endpoint(mut self, endpoint: impl Into<String>) -> Self {
		self.token_endpoint = endpoint.into();

		self
	}

	/// Encodes `grant_type`, `client_id`, and `client_secret` as a form body.
	pub fn form_body(&self) -> String {
		form_urlencoded::Serializer::new(String::new())
			.append_pair("grant_type", &self.grant_type)
			.append_pair("client_id", self.client_id.as_str())
			.append_pair("client_secret", self.client_secret.secret())
			.finish()
	}

	/// Builds the form-encoded POST sent to the token endpoint.
	pub fn token_request(&self) -> Result<HttpRequest, ConfigError> {
		Ok(Request::builder()
			.method(Method::POST)
			.uri(self.token_endpoint.as_str())
			.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
			.header(ACCEPT, "application/json")
			.body(self.form_body().into_bytes())?)
	}
}
