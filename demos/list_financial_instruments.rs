//! Lists financial instruments and registers a PSP token with the default reqwest transport,
//! pointing the payment host and token endpoint at a local mock server.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
use url::Url;
// self
use vgs_client::{
	client::Client,
	config::{Environment, Options},
	http::{ReqwestHttpClient, ReqwestTransportErrorMapper},
	reqwest,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "access_token": "demo-access", "expires_in": 900 }));
		})
		.await;
	let list_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/financial_instruments");
			then.status(200).header("VGS-Request-Id", "demo-request").json_body(json!({
				"data": [{ "id": "FIN-demo", "card": { "brand": "visa", "last4": "4242" } }],
				"meta": { "total_elements": 1, "total_pages": 1 },
			}));
		})
		.await;
	let create_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/financial_instruments");
			then.status(201).json_body(json!({ "data": { "id": "FIN-psp" } }));
		})
		.await;
	let base = Url::parse(&server.base_url())?;
	let options = Options::new("demo-client", "demo-secret", "tnt-demo", "route-demo")
		.with_environment(Environment::Sandbox)
		.with_payment_url(base.clone())
		.with_auth_endpoint(base.join("/token")?);
	let client = <Client<ReqwestHttpClient, ReqwestTransportErrorMapper>>::with_http_client(
		options,
		ReqwestHttpClient::with_client(reqwest::Client::builder().build()?),
		ReqwestTransportErrorMapper,
	)?;
	let page = client.get_financial_instruments().await?;

	for instrument in &page.data {
		println!("Instrument {} ({} *{}).", instrument.id, instrument.card.brand, instrument.card.last4);
	}

	if let Some(last) = client.last_response() {
		println!("Listing served by request {:?}.", last.vgs_request_id);
	}

	let created = client.create_psp_token("stripe", "cus_demo").await?;

	println!("Registered PSP token as {}.", created.data.id);

	token_mock.assert_async().await;
	list_mock.assert_async().await;
	create_mock.assert_async().await;

	Ok(())
}
