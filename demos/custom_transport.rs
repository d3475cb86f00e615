//! Plugs a hand-written transport and a fixed-token authenticator into the client, then cancels
//! a call that never completes.

// std
use std::{future, sync::Arc};
// crates.io
use color_eyre::Result;
use time::OffsetDateTime;
// self
use vgs_client::{
	auth::OAuthToken,
	client::Client,
	config::Options,
	context::CancelContext,
	http::{
		BasicTransportErrorMapper, HttpClient, HttpClientError, HttpFuture, HttpRequest, HttpResponse,
	},
	oauth::{AuthFuture, Authenticator},
	oauth2::http::Response,
};

#[derive(Debug, thiserror::Error)]
#[error("Offline transport cannot fail.")]
struct Never;

/// Answers gateway listings from memory and parks every other request forever.
struct OfflineTransport;
impl HttpClient for OfflineTransport {
	type TransportError = Never;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		Box::pin(async move {
			if request.uri().path() == "/gateways" {
				Ok(Response::builder()
					.status(200)
					.body(br#"{"data":[{"type":"stripe","id":"gw-offline"}]}"#.to_vec())?)
			} else {
				future::pending::<std::result::Result<HttpResponse, HttpClientError<Never>>>().await
			}
		})
	}
}

struct StaticToken;
impl Authenticator for StaticToken {
	fn authenticate(&self) -> AuthFuture<'_, OAuthToken> {
		Box::pin(async { Ok(OAuthToken::new("offline-token", 3600, OffsetDateTime::now_utc())) })
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let ctx = CancelContext::new();
	let client = <Client<OfflineTransport, BasicTransportErrorMapper>>::with_http_client(
		Options::new("offline-client", "offline-secret", "tnt-offline", "route-offline"),
		OfflineTransport,
		BasicTransportErrorMapper,
	)?
	.with_authenticator(Arc::new(StaticToken))
	.with_context(ctx.clone());
	let gateways = client.get_gateways().await?;

	println!("Offline gateways: {:?}.", gateways.data.iter().map(|g| &g.id).collect::<Vec<_>>());

	let (result, _) = tokio::join!(client.get_financial_instruments(), async {
		tokio::task::yield_now().await;
		ctx.cancel();
	});

	match result {
		Err(e) if e.is_cancelled() => println!("Listing cancelled: {e}"),
		other => println!("Unexpected outcome: {other:?}."),
	}

	Ok(())
}
