//! Client-level error types shared across the authenticator, the request pipeline, and the
//! resource endpoints.

// self
use crate::{_prelude::*, client::response::null_default};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// Every public operation fails with exactly one of these kinds. Nothing is retried by the
/// client; callers decide whether a failure is worth another attempt.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure or cancellation.
	#[error(transparent)]
	Network(#[from] NetworkError),
	/// Malformed JSON in a success or error body.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Structured error returned by the VGS API.
	#[error(transparent)]
	Api(#[from] VgsError),
	/// Authentication produced no usable token.
	#[error(transparent)]
	Auth(#[from] AuthError),
}
impl Error {
	/// Returns the structured API error, if this failure came from the remote service.
	pub fn as_api(&self) -> Option<&VgsError> {
		match self {
			Self::Api(e) => Some(e),
			_ => None,
		}
	}

	/// Returns `true` when the bound [`CancelContext`](crate::context::CancelContext) ended the
	/// call.
	pub fn is_cancelled(&self) -> bool {
		matches!(self, Self::Network(NetworkError::Cancelled))
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Client identifier was empty.
	#[error("Client id is required.")]
	MissingClientId,
	/// Client secret was empty.
	#[error("Client secret is required.")]
	MissingClientSecret,
	/// Vault identifier was empty.
	#[error("Vault id is required.")]
	MissingVaultId,
	/// Route identifier was empty.
	#[error("Route id is required.")]
	MissingRouteId,
	/// A vault, payment, or token endpoint URL could not be parsed.
	#[error("Unable to parse `{url}`.")]
	InvalidUrl {
		/// The offending URL or relative URI.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO, cancellation).
#[derive(Debug, ThisError)]
pub enum NetworkError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {endpoint}.")]
	Transport {
		/// Endpoint label (`token endpoint` or `payment host`).
		endpoint: &'static str,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request timed out inside the transport.
	#[error("Request timed out while calling {endpoint}.")]
	Timeout {
		/// Endpoint label (`token endpoint` or `payment host`).
		endpoint: &'static str,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred during transport.")]
	Io(#[from] std::io::Error),
	/// Transport failed without a typed error.
	#[error("HTTP client error occurred: {message}.")]
	Other {
		/// Transport-supplied message.
		message: String,
	},
	/// The bound cancellation context was cancelled before the call completed.
	#[error("Request was cancelled.")]
	Cancelled,
}
impl NetworkError {
	/// Wraps a transport-specific network error.
	pub fn transport(
		endpoint: &'static str,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Transport { endpoint, source: Box::new(src) }
	}
}

/// Encoding and decoding failures for JSON payloads.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Response body did not match the expected JSON shape.
	#[error("Response body could not be decoded: {source}.")]
	Json {
		/// Structured parsing failure carrying the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response being decoded.
		status: Option<u16>,
	},
	/// Request payload could not be serialized.
	#[error("Request body could not be encoded: {0}.")]
	Encode(#[source] serde_json::Error),
	/// Raw response body could not be copied into the caller's sink.
	#[error("Response body could not be written to the sink.")]
	Sink(#[source] std::io::Error),
}

/// Failures raised while attaching credentials to an outgoing request.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// The authenticator returned a token without an access token value.
	#[error("Token is not set.")]
	MissingToken,
	/// The access token contains bytes that cannot appear in a header value.
	#[error("Access token cannot be used as an Authorization header.")]
	InvalidHeader(#[from] oauth2::http::header::InvalidHeaderValue),
}

/// Single `{code, detail}` entry of a structured API error.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
	/// Machine-readable error code.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub code: String,
	/// Human-readable detail.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
	pub detail: String,
}

/// Error body returned by the VGS API for non-2xx responses.
///
/// Two shapes co-exist upstream: a structured `errors` list and a flat
/// `error`/`error_description` pair. Both deserialize into this type; the list wins when it is
/// non-empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VgsError {
	/// Structured `{code, detail}` entries.
	#[serde(default, deserialize_with = "null_default", skip_serializing_if = "Vec::is_empty")]
	pub errors: Vec<ErrorDetail>,
	/// Flat error code.
	#[serde(default, rename = "error", skip_serializing_if = "Option::is_none")]
	pub error_code: Option<String>,
	/// Flat error description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error_description: Option<String>,
	/// HTTP status of the failing response.
	#[serde(skip)]
	pub status: Option<u16>,
	/// `VGS-Request-Id` of the failing response.
	#[serde(skip)]
	pub request_id: Option<String>,
}
impl VgsError {
	/// Returns `true` when the structured list form is populated.
	pub fn is_structured(&self) -> bool {
		!self.errors.is_empty()
	}
}
impl Display for VgsError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		if self.errors.is_empty() {
			return write!(
				f,
				"API call error ({}): {}",
				self.error_code.as_deref().unwrap_or_default(),
				self.error_description.as_deref().unwrap_or_default()
			);
		}

		f.write_str("Response errors:")?;

		for (idx, entry) in self.errors.iter().enumerate() {
			write!(f, "\n #{}. Code: {}; Details: {}", idx + 1, entry.code, entry.detail)?;
		}

		Ok(())
	}
}
impl StdError for VgsError {}
