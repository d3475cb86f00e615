// std
use std::{
	future,
	io::{Error as IoError, ErrorKind},
	sync::Arc,
};
// crates.io
use parking_lot::Mutex;
use serde_json::json;
use time::OffsetDateTime;
// self
use vgs_client::{
	auth::OAuthToken,
	client::Client,
	config::Options,
	context::CancelContext,
	error::{Error, NetworkError},
	http::{
		BasicTransportErrorMapper, HttpClient, HttpClientError, HttpFuture, HttpRequest,
		HttpResponse,
	},
	oauth::{AuthFuture, Authenticator},
	oauth2::http::{Response as RawResponse, header::AUTHORIZATION},
	url::Url,
};

#[derive(Debug, thiserror::Error)]
#[error("Fake transport failure.")]
struct FakeFailure;

enum Behaviour {
	Respond(u16, &'static str),
	Fail,
	FailAfterCancel(CancelContext),
	Hang,
}

struct FakeTransport {
	behaviour: Behaviour,
	seen: Mutex<Vec<HttpRequest>>,
}
impl FakeTransport {
	fn new(behaviour: Behaviour) -> Arc<Self> {
		Arc::new(Self { behaviour, seen: Mutex::new(Vec::new()) })
	}
}
impl HttpClient for FakeTransport {
	type TransportError = FakeFailure;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		self.seen.lock().push(request);

		Box::pin(async move {
			match &self.behaviour {
				Behaviour::Respond(status, body) => Ok(RawResponse::builder()
					.status(*status)
					.body(body.as_bytes().to_vec())
					.expect("Fake response should build.")),
				Behaviour::Fail => Err(HttpClientError::Reqwest(Box::new(FakeFailure))),
				Behaviour::FailAfterCancel(ctx) => {
					ctx.cancel();

					Err(HttpClientError::Io(IoError::new(ErrorKind::ConnectionReset, "reset")))
				},
				Behaviour::Hang => future::pending::<Result<HttpResponse, _>>().await,
			}
		})
	}
}

/// Hands out a fixed token without touching the network.
struct MockAuthenticator;
impl Authenticator for MockAuthenticator {
	fn authenticate(&self) -> AuthFuture<'_, OAuthToken> {
		Box::pin(async { Ok(OAuthToken::new("test-token", 3600, OffsetDateTime::now_utc())) })
	}
}

type FakeClient = Client<FakeTransport, BasicTransportErrorMapper>;

fn build(transport: &Arc<FakeTransport>) -> FakeClient {
	let options = Options::new("test-client", "test-secret", "test-vault", "test-route");

	let client: FakeClient =
		Client::with_http_client(options, Arc::clone(transport), BasicTransportErrorMapper)
			.expect("Complete options should build a client.");

	client.with_authenticator(Arc::new(MockAuthenticator))
}

#[tokio::test]
async fn requests_target_the_derived_payment_host() {
	let transport = FakeTransport::new(Behaviour::Respond(200, r#"{"data":[{"id":"gw"}]}"#));
	let client = build(&transport);
	let page = client.get_gateways().await.expect("Gateway listing should succeed.");

	assert_eq!(page.data[0].id, "gw");

	let seen = transport.seen.lock();

	assert_eq!(seen.len(), 1);
	assert_eq!(
		seen[0].uri().to_string(),
		"https://test-vault-test-route.sandbox.verygoodproxy.com/gateways"
	);
	assert_eq!(seen[0].headers()[AUTHORIZATION], "Bearer test-token");
	assert!(seen[0].body().is_empty());
}

#[tokio::test]
async fn overridden_payment_url_and_json_body_are_used() {
	let transport = FakeTransport::new(Behaviour::Respond(200, r#"{"data":{"id":"FIN"}}"#));
	let base = Url::parse("http://localhost:8080/").expect("Override URL should parse.");
	let client = build(&transport);
	let client: FakeClient = Client::with_http_client(
		client.options.clone().with_payment_url(base),
		Arc::clone(&transport),
		BasicTransportErrorMapper,
	)
	.expect("Overridden options should build a client.");
	let client = client.with_authenticator(Arc::new(MockAuthenticator));
	let instrument =
		client.create_psp_token("stripe", "cus_1").await.expect("Creation should succeed.");

	assert_eq!(instrument.data.id, "FIN");

	let seen = transport.seen.lock();
	let body: serde_json::Value =
		serde_json::from_slice(seen[0].body()).expect("Request body should be JSON.");

	assert_eq!(seen[0].uri().to_string(), "http://localhost:8080/financial_instruments");
	assert_eq!(body, json!({ "psp_token": { "id": "cus_1", "psp": "stripe" } }));
}

#[tokio::test]
async fn transport_failure_maps_to_network_error() {
	let transport = FakeTransport::new(Behaviour::Fail);
	let err = build(&transport).get_gateways().await.expect_err("Transport failure should surface.");

	assert!(matches!(
		err,
		Error::Network(NetworkError::Transport { endpoint: "payment host", .. })
	));
	assert!(!err.is_cancelled());
}

#[tokio::test]
async fn cancellation_wins_over_transport_error() {
	let ctx = CancelContext::new();
	let transport = FakeTransport::new(Behaviour::FailAfterCancel(ctx.clone()));
	let err = build(&transport)
		.with_context(ctx)
		.get_financial_instruments()
		.await
		.expect_err("Cancelled call should fail.");

	assert!(err.is_cancelled());
}

#[tokio::test]
async fn cancellation_interrupts_in_flight_request() {
	let ctx = CancelContext::new();
	let transport = FakeTransport::new(Behaviour::Hang);
	let client = build(&transport).with_context(ctx.clone());
	let (result, _) = tokio::join!(client.get_gateways(), async {
		tokio::task::yield_now().await;
		ctx.cancel();
	});
	let err = result.expect_err("Hanging call should be cancelled.");

	assert!(matches!(err, Error::Network(NetworkError::Cancelled)));
	assert_eq!(transport.seen.lock().len(), 1);
	assert!(client.last_response().is_none());
}

#[tokio::test]
async fn pre_cancelled_context_never_reaches_transport() {
	let ctx = CancelContext::new();
	let transport = FakeTransport::new(Behaviour::Respond(200, "{}"));
	let client = build(&transport).with_context(ctx.clone());

	ctx.cancel();

	assert!(client.get_gateways().await.expect_err("Cancelled call should fail.").is_cancelled());
	assert!(transport.seen.lock().is_empty());
}

#[tokio::test]
async fn default_authenticator_uses_shared_transport_for_token() {
	let transport = FakeTransport::new(Behaviour::Respond(
		401,
		r#"{"error":"invalid_client","error_description":"bad secret"}"#,
	));
	let options = Options::new("test-client", "test-secret", "test-vault", "test-route");
	let client: FakeClient =
		Client::with_http_client(options, Arc::clone(&transport), BasicTransportErrorMapper)
			.expect("Complete options should build a client.");
	let err = client.get_gateways().await.expect_err("Rejected token should fail the call.");

	assert_eq!(err.to_string(), "API call error (invalid_client): bad secret");

	let seen = transport.seen.lock();

	assert_eq!(seen.len(), 1);
	assert_eq!(
		seen[0].uri().to_string(),
		"https://auth.verygoodsecurity.com/auth/realms/vgs/protocol/openid-connect/token"
	);
}
