//! Buffered API responses, status validation, and typed decoding.

// std
use std::io::Write;
// crates.io
use oauth2::http::{HeaderMap, StatusCode};
use serde::Deserializer;
// self
use crate::{_prelude::*, error::DecodeError, http::HttpResponse};

/// Header carrying the VGS request identifier.
pub const VGS_REQUEST_ID: &str = "VGS-Request-Id";
/// Header carrying the distributed trace identifier.
pub const TRACE_ID: &str = "Trace-Id";

/// Status and correlation headers from the most recent response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseMetadata {
	/// HTTP status code.
	pub status: u16,
	/// `VGS-Request-Id` header, if present.
	pub vgs_request_id: Option<String>,
	/// `Trace-Id` header, if present.
	pub trace_id: Option<String>,
}

/// Pagination links returned alongside list payloads.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseLinks {
	/// First page.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub first: Option<String>,
	/// Last page.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub last: Option<String>,
	/// Current page.
	#[serde(default, rename = "self", skip_serializing_if = "Option::is_none")]
	pub self_: Option<String>,
	/// Previous page.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub prev: Option<String>,
	/// Next page.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub next: Option<String>,
}

/// Pagination totals returned alongside list payloads.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMeta {
	/// Total number of elements across pages.
	#[serde(default, deserialize_with = "null_default")]
	pub total_elements: u64,
	/// Total number of pages.
	#[serde(default, deserialize_with = "null_default")]
	pub total_pages: u64,
}

/// List envelope with pagination metadata. Pages are not followed automatically.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
	/// Items on this page.
	#[serde(default, deserialize_with = "null_default")]
	pub data: Vec<T>,
	/// Pagination links.
	#[serde(default, deserialize_with = "null_default")]
	pub links: ResponseLinks,
	/// Pagination totals.
	#[serde(default, deserialize_with = "null_default")]
	pub meta: ResponseMeta,
}
impl<T> Default for Page<T> {
	fn default() -> Self {
		Self { data: Vec::new(), links: ResponseLinks::default(), meta: ResponseMeta::default() }
	}
}

/// Transport response with the body fully buffered.
#[derive(Clone, Debug)]
pub struct Response {
	/// HTTP status.
	pub status: StatusCode,
	/// Response headers.
	pub headers: HeaderMap,
	/// Raw body bytes.
	pub raw_body: Vec<u8>,
	/// `VGS-Request-Id` header, if present.
	pub vgs_request_id: Option<String>,
	/// `Trace-Id` header, if present.
	pub trace_id: Option<String>,
}
impl Response {
	/// Wraps a transport response, extracting the correlation headers.
	pub fn new(raw: HttpResponse) -> Self {
		let (parts, raw_body) = raw.into_parts();
		let vgs_request_id = header_value(&parts.headers, VGS_REQUEST_ID);
		let trace_id = header_value(&parts.headers, TRACE_ID);

		Self { status: parts.status, headers: parts.headers, raw_body, vgs_request_id, trace_id }
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		self.status.is_success()
	}

	/// Fails with the decoded [`VgsError`] unless the status is 2xx.
	pub fn validate(&self) -> Result<()> {
		validate_response(self)
	}

	/// Decodes the body into `T`; an empty body yields `T::default()`.
	pub fn json<T>(&self) -> Result<T, DecodeError>
	where
		T: DeserializeOwned + Default,
	{
		if self.raw_body.is_empty() {
			return Ok(T::default());
		}

		decode_json(&self.raw_body, Some(self.status.as_u16()))
	}

	/// Copies the raw body into `sink`, returning the number of bytes written.
	pub fn write_to<W>(&self, mut sink: W) -> Result<u64, DecodeError>
	where
		W: Write,
	{
		sink.write_all(&self.raw_body).map_err(DecodeError::Sink)?;

		Ok(self.raw_body.len() as u64)
	}

	/// Status and correlation headers of this response.
	pub fn metadata(&self) -> ResponseMetadata {
		ResponseMetadata {
			status: self.status.as_u16(),
			vgs_request_id: self.vgs_request_id.clone(),
			trace_id: self.trace_id.clone(),
		}
	}
}

/// Accepts 200-299; otherwise returns the body decoded as [`VgsError`], or the decode failure
/// if the body is not a valid error document.
pub fn validate_response(response: &Response) -> Result<()> {
	if response.is_success() {
		return Ok(());
	}

	Err(error_from_body(
		response.status.as_u16(),
		response.vgs_request_id.clone(),
		&response.raw_body,
	))
}

pub(crate) fn error_from_body(status: u16, request_id: Option<String>, body: &[u8]) -> Error {
	match decode_json::<VgsError>(body, Some(status)) {
		Ok(mut err) => {
			err.status = Some(status);
			err.request_id = request_id;

			err.into()
		},
		Err(e) => e.into(),
	}
}

/// Field deserializer mapping both a missing field and JSON `null` to `T::default()`.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn decode_json<T>(body: &[u8], status: Option<u16>) -> Result<T, DecodeError>
where
	T: DeserializeOwned,
{
	let mut de = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut de).map_err(|source| DecodeError::Json { source, status })
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
	headers
		.get(name)
		.and_then(|value| value.to_str().ok())
		.filter(|value| !value.is_empty())
		.map(str::to_owned)
}
