//! Authenticators that attach OAuth bearer tokens to outgoing requests.
//!
//! [`OAuthAuthenticator`] performs the client-credentials exchange against the VGS token
//! endpoint, caches the resulting [`OAuthToken`], and refreshes it once it expires. The cache is
//! guarded by an async mutex held across the refresh, so callers sharing one authenticator
//! trigger at most one token request at a time.

// crates.io
use oauth2::http::{StatusCode, header::AUTHORIZATION};
// self
use crate::{
	_prelude::*,
	auth::{OAuthToken, OauthConfig, TokenResponse},
	client::response,
	error::AuthError,
	http::{Endpoint, HttpClient, HttpRequest, TransportErrorMapper},
	obs::{self, Operation},
};
#[cfg(feature = "reqwest")]
use crate::http::{ReqwestHttpClient, ReqwestTransportErrorMapper};

/// Boxed future returned by [`Authenticator`] methods.
pub type AuthFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

#[cfg(feature = "reqwest")]
/// Authenticator specialized for the crate's default reqwest transport stack.
pub type ReqwestOAuthAuthenticator =
	OAuthAuthenticator<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Source of bearer tokens for the client.
///
/// Implementations are injected into [`Client`](crate::client::Client); tests typically supply
/// a fixed-token fake.
pub trait Authenticator: Send + Sync {
	/// Returns a usable token, fetching a new one when necessary.
	fn authenticate(&self) -> AuthFuture<'_, OAuthToken>;

	/// Sets `Authorization: Bearer <token>` on `request`.
	fn set_authentication<'a>(&'a self, request: &'a mut HttpRequest) -> AuthFuture<'a, ()> {
		Box::pin(async move {
			let token = self.authenticate().await?;

			apply_bearer(request, &token)
		})
	}
}

/// Writes the bearer header for `token`, failing if the token carries no value.
pub fn apply_bearer(request: &mut HttpRequest, token: &OAuthToken) -> Result<()> {
	if token.access_token.is_empty() {
		return Err(AuthError::MissingToken.into());
	}

	let value = token.access_token.bearer_header().map_err(AuthError::from)?;

	request.headers_mut().insert(AUTHORIZATION, value);

	Ok(())
}

/// Client-credentials authenticator with a single cached token.
pub struct OAuthAuthenticator<C, M>
where
	C: ?Sized + HttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Credentials and token endpoint.
	pub config: OauthConfig,
	http_client: Arc<C>,
	transport_mapper: Arc<M>,
	token: AsyncMutex<Option<OAuthToken>>,
}
impl<C, M> OAuthAuthenticator<C, M>
where
	C: ?Sized + HttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates an authenticator with an empty cache.
	pub fn new(
		config: OauthConfig,
		http_client: impl Into<Arc<C>>,
		transport_mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			config,
			http_client: http_client.into(),
			transport_mapper: transport_mapper.into(),
			token: AsyncMutex::new(None),
		}
	}

	/// Returns a copy of the cached token, valid or not.
	pub async fn token(&self) -> Option<OAuthToken> {
		self.token.lock().await.clone()
	}

	/// Drops the cached token so the next call fetches a fresh one.
	pub async fn invalidate(&self) {
		self.token.lock().await.take();
	}

	/// Exchanges the client credentials for a new token without touching the cache.
	///
	/// HTTP 200 decodes the token and stamps its creation time with the current clock. Any other
	/// status decodes the body as a [`VgsError`] and fails with it.
	pub async fn fetch_token(&self) -> Result<OAuthToken> {
		obs::observe(Operation::FetchToken, "fetch_token", async move {
			let request = self.config.token_request()?;
			let raw = self
				.http_client
				.execute(request)
				.await
				.map_err(|e| self.transport_mapper.map_transport_error(Endpoint::Token, e))?;
			let status = raw.status();

			if status != StatusCode::OK {
				let request_id = raw
					.headers()
					.get(response::VGS_REQUEST_ID)
					.and_then(|value| value.to_str().ok())
					.map(str::to_owned);

				return Err(response::error_from_body(status.as_u16(), request_id, raw.body()));
			}

			let token = response::decode_json::<TokenResponse>(raw.body(), Some(status.as_u16()))?
				.issued_at(OffsetDateTime::now_utc());

			obs::debug_token_refreshed(token.expires_in);

			Ok(token)
		})
		.await
	}
}
#[cfg(feature = "reqwest")]
impl OAuthAuthenticator<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates an authenticator backed by a default reqwest transport.
	pub fn with_reqwest(config: OauthConfig) -> Self {
		Self::new(config, ReqwestHttpClient::default(), ReqwestTransportErrorMapper)
	}
}
impl<C, M> Authenticator for OAuthAuthenticator<C, M>
where
	C: ?Sized + HttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn authenticate(&self) -> AuthFuture<'_, OAuthToken> {
		Box::pin(async move {
			let mut cached = self.token.lock().await;

			if let Some(token) = cached.as_ref().filter(|token| token.is_valid()) {
				return Ok(token.clone());
			}

			let token = self.fetch_token().await?;

			*cached = Some(token.clone());

			Ok(token)
		})
	}
}
impl<C, M> Debug for OAuthAuthenticator<C, M>
where
	C: ?Sized + HttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuthAuthenticator").field("config", &self.config).finish()
	}
}
