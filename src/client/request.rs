//! Logical request (method, relative URI, optional JSON body) prior to authentication.

// crates.io
use oauth2::http::Method;
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, DecodeError},
};

/// Method/URI/body triple turned into a transport request by
/// [`Client::new_request`](crate::client::Client::new_request).
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
	/// HTTP method.
	pub method: Method,
	/// URI relative to the payment host.
	pub uri: String,
	/// Optional JSON payload.
	pub body: Option<Value>,
}
impl Request {
	/// Creates a body-less request.
	pub fn new(method: Method, uri: impl Into<String>) -> Self {
		Self { method, uri: uri.into(), body: None }
	}

	/// Creates a body-less `GET`.
	pub fn get(uri: impl Into<String>) -> Self {
		Self::new(Method::GET, uri)
	}

	/// Creates a `POST` carrying `payload` encoded as JSON.
	pub fn post<B>(uri: impl Into<String>, payload: &B) -> Result<Self, DecodeError>
	where
		B: ?Sized + Serialize,
	{
		Self::json(Method::POST, uri, payload)
	}

	/// Creates a request carrying `payload` encoded as JSON.
	pub fn json<B>(method: Method, uri: impl Into<String>, payload: &B) -> Result<Self, DecodeError>
	where
		B: ?Sized + Serialize,
	{
		let body = serde_json::to_value(payload).map_err(DecodeError::Encode)?;

		Ok(Self::new(method, uri).with_body(body))
	}

	/// Replaces the body.
	pub fn with_body(mut self, body: Value) -> Self {
		self.body = Some(body);

		self
	}

	/// Returns `true` if the request carries a payload.
	///
	/// An absent body, JSON `null`, and the empty string all count as "no body".
	pub fn has_body(&self) -> bool {
		match &self.body {
			None | Some(Value::Null) => false,
			Some(Value::String(s)) => !s.is_empty(),
			Some(_) => true,
		}
	}

	/// Serializes the body, or returns an empty buffer when there is none.
	pub fn json_body(&self) -> Result<Vec<u8>, DecodeError> {
		match &self.body {
			Some(body) if self.has_body() => serde_json::to_vec(body).map_err(DecodeError::Encode),
			_ => Ok(Vec::new()),
		}
	}

	/// Resolves the request URI against `base`.
	pub fn build_url(&self, base: &Url) -> Result<Url, ConfigError> {
		base.join(&self.uri)
			.map_err(|source| ConfigError::InvalidUrl { url: self.uri.clone(), source })
	}
}
