//! Typed async client for the VGS vault and payment gateway API, with OAuth client-credentials
//! token caching, payment routing hosts, and typed gateway, financial instrument, and
//! verification resources.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod resources;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		client::{Client, ReqwestVgsClient},
		config::Options,
		context::CancelContext,
		http::{ReqwestHttpClient, ReqwestTransportErrorMapper},
	};

	/// Client id used by the test helpers.
	pub const TEST_CLIENT_ID: &str = "test-client";
	/// Client secret used by the test helpers.
	pub const TEST_CLIENT_SECRET: &str = "test-secret";

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Options pointing both the payment host and the token endpoint at a mock server base URL.
	pub fn test_options(base_url: &str) -> Options {
		let base = Url::parse(base_url).expect("Mock server URL should parse.");
		let token = base.join("/token").expect("Mock token endpoint should join.");

		Options::new(TEST_CLIENT_ID, TEST_CLIENT_SECRET, "test-vault", "test-route")
			.with_payment_url(base.clone())
			.with_vault_url(base)
			.with_auth_endpoint(token)
	}

	/// Constructs a reqwest-backed [`Client`] whose payment host and token endpoint both live on
	/// the provided mock server.
	pub fn build_reqwest_test_client(base_url: &str) -> ReqwestVgsClient {
		build_reqwest_test_client_with_context(base_url, CancelContext::new())
	}

	/// Same as [`build_reqwest_test_client`] but bound to a caller-owned cancellation context.
	pub fn build_reqwest_test_client_with_context(
		base_url: &str,
		ctx: CancelContext,
	) -> ReqwestVgsClient {
		Client::with_http_client(
			test_options(base_url),
			test_reqwest_http_client(),
			Arc::new(ReqwestTransportErrorMapper),
		)
		.expect("Test options should pass validation.")
		.with_context(ctx)
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result, VgsError};
}

pub use oauth2;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
