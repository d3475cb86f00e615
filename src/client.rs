//! HTTP client facade that resolves VGS hosts, authenticates requests, and decodes responses.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;

// std
use std::io::Write;
// crates.io
use oauth2::http::{
	Method,
	header::{ACCEPT, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	auth::OauthConfig,
	config::Options,
	context::CancelContext,
	error::{ConfigError, NetworkError},
	http::{Endpoint, HttpClient, HttpRequest, TransportErrorMapper},
	oauth::{Authenticator, OAuthAuthenticator},
	obs::{self, Operation},
};
#[cfg(feature = "reqwest")]
use crate::http::{ReqwestHttpClient, ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestVgsClient = Client<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Entry point for every VGS API call.
///
/// The client owns its [`Options`] and shares the transport, transport error mapper, and
/// authenticator behind `Arc`, so clones are cheap and observe the same token cache. Every call
/// is bound to the client's [`CancelContext`].
pub struct Client<C, M>
where
	C: ?Sized + HttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Validated connection options.
	pub options: Options,
	/// HTTP client used for every outbound request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Authenticator that stamps the bearer header on each request.
	pub authenticator: Arc<dyn Authenticator>,
	ctx: CancelContext,
	last_response: Arc<Mutex<Option<ResponseMetadata>>>,
}
impl<C, M> Client<C, M>
where
	C: ?Sized + HttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	///
	/// Fails if the client id, client secret, vault id, or route id is empty. The default
	/// [`OAuthAuthenticator`] shares the same transport; replace it with
	/// [`Client::with_authenticator`].
	pub fn with_http_client(
		options: Options,
		http_client: impl Into<Arc<C>>,
		transport_mapper: impl Into<Arc<M>>,
	) -> Result<Self> {
		options.validate()?;

		let http_client = http_client.into();
		let transport_mapper = transport_mapper.into();
		let mut oauth_config = OauthConfig::new(&options.client_id, &options.client_secret);

		if let Some(endpoint) = &options.auth_endpoint {
			oauth_config = oauth_config.with_token_endpoint(endpoint.as_str());
		}

		let authenticator: Arc<dyn Authenticator> = Arc::new(OAuthAuthenticator::<C, M>::new(
			oauth_config,
			Arc::clone(&http_client),
			Arc::clone(&transport_mapper),
		));

		Ok(Self {
			options,
			http_client,
			transport_mapper,
			authenticator,
			ctx: CancelContext::new(),
			last_response: Default::default(),
		})
	}

	/// Replaces the authenticator.
	pub fn with_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
		self.authenticator = authenticator;

		self
	}

	/// Binds every subsequent call to `ctx`.
	pub fn with_context(mut self, ctx: CancelContext) -> Self {
		self.ctx = ctx;

		self
	}

	/// Cancellation context bound to this client.
	pub fn context(&self) -> &CancelContext {
		&self.ctx
	}

	/// Status and correlation headers of the last response received, if any.
	pub fn last_response(&self) -> Option<ResponseMetadata> {
		self.last_response.lock().clone()
	}

	/// Turns a logical request into an authenticated transport request against the payment
	/// host.
	pub async fn new_request(&self, request: &Request) -> Result<HttpRequest> {
		let base = self.options.payment_url()?;
		let url = request.build_url(&base)?;
		let body = request.json_body()?;
		let mut http_request = oauth2::http::Request::builder()
			.method(request.method.clone())
			.uri(url.as_str())
			.header(CONTENT_TYPE, "application/json")
			.header(ACCEPT, "application/json")
			.body(body)
			.map_err(ConfigError::from)?;

		self.authenticator.set_authentication(&mut http_request).await?;

		Ok(http_request)
	}

	/// Dispatches a transport request, buffers the response, and validates its status.
	///
	/// The dispatch races the bound [`CancelContext`]. When the transport fails after the context
	/// was cancelled, the cancellation is reported instead of the transport error.
	pub async fn execute(&self, request: HttpRequest) -> Result<Response> {
		let dispatched = tokio::select! {
			biased;
			_ = self.ctx.cancelled() => return Err(NetworkError::Cancelled.into()),
			dispatched = self.http_client.execute(request) => dispatched,
		};
		let raw = match dispatched {
			Ok(raw) => raw,
			Err(_) if self.ctx.is_cancelled() => return Err(NetworkError::Cancelled.into()),
			Err(e) => return Err(self.transport_mapper.map_transport_error(Endpoint::Payment, e)),
		};
		let response = Response::new(raw);
		let metadata = response.metadata();

		obs::debug_response(
			metadata.status,
			metadata.vgs_request_id.as_deref(),
			metadata.trace_id.as_deref(),
		);
		obs::record_response_status(metadata.status);

		*self.last_response.lock() = Some(metadata);

		response.validate()?;

		Ok(response)
	}

	/// Builds, authenticates, and dispatches `request`.
	pub async fn send(&self, request: &Request) -> Result<Response> {
		if self.ctx.is_cancelled() {
			return Err(NetworkError::Cancelled.into());
		}

		let http_request = self.new_request(request).await?;

		self.execute(http_request).await
	}

	/// Issues `GET uri` and decodes the JSON body into `T`.
	pub async fn get<T>(&self, uri: &str) -> Result<T>
	where
		T: DeserializeOwned + Default,
	{
		Ok(self.send(&Request::get(uri)).await?.json()?)
	}

	/// Issues `GET uri` and copies the raw body into `sink`.
	pub async fn get_raw<W>(&self, uri: &str, sink: W) -> Result<Response>
	where
		W: Write,
	{
		self.call(Operation::Raw, async move {
			let response = self.send(&Request::get(uri)).await?;

			response.write_to(sink)?;

			Ok(response)
		})
		.await
	}

	/// Issues `POST uri` with `payload` as JSON and decodes the JSON body into `T`.
	pub async fn post<B, T>(&self, uri: &str, payload: &B) -> Result<T>
	where
		B: ?Sized + Serialize,
		T: DeserializeOwned + Default,
	{
		let request = Request::json(Method::POST, uri, payload)?;

		Ok(self.send(&request).await?.json()?)
	}

	pub(crate) async fn call<T, Fut>(&self, operation: Operation, fut: Fut) -> Result<T>
	where
		Fut: Future<Output = Result<T>>,
	{
		obs::observe(operation, operation.as_str(), fut).await
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client backed by a default reqwest transport.
	pub fn new(options: Options) -> Result<Self> {
		Self::with_http_client(
			options,
			ReqwestHttpClient::default(),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}
}
impl<C, M> Clone for Client<C, M>
where
	C: ?Sized + HttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			options: self.options.clone(),
			http_client: Arc::clone(&self.http_client),
			transport_mapper: Arc::clone(&self.transport_mapper),
			authenticator: Arc::clone(&self.authenticator),
			ctx: self.ctx.clone(),
			last_response: Arc::clone(&self.last_response),
		}
	}
}
impl<C, M> Debug for Client<C, M>
where
	C: ?Sized + HttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("options", &self.options)
			.field("ctx", &self.ctx)
			.finish()
	}
}
