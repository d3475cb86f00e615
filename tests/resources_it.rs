// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use vgs_client::{
	_preludet::*,
	resources::{
		Card, ContactAddress, CreatePaymentCardRequest, GatewayOptions, VerificationsRequest,
	},
};

async fn serve_token(server: &MockServer) {
	server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(200).json_body(json!({ "access_token": "resource-token", "expires_in": 300 }));
		})
		.await;
}

#[tokio::test]
async fn gateways_decode_type_config_and_timestamps() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url());

	serve_token(&server).await;

	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/gateways").header("authorization", "Bearer resource-token");
			then.status(200).json_body(json!({
				"data": [{
					"type": "stripe",
					"id": "gw-primary",
					"default_currency": "USD",
					"default_gateway": true,
					"config": { "secret_key": "tok_alias" },
					"created_at": "2025-05-06T07:08:09Z",
					"updated_at": "2025-05-07T07:08:09Z",
				}],
				"meta": { "total_elements": 3, "total_pages": 3 },
				"links": { "next": "/gateways?page=2" },
			}));
		})
		.await;
	let page = client.get_gateways().await.expect("Gateway listing should succeed.");
	let gateway = &page.data[0];

	assert_eq!(gateway.type_, "stripe");
	assert_eq!(gateway.id, "gw-primary");
	assert!(gateway.default_gateway);
	assert_eq!(gateway.config, Some(json!({ "secret_key": "tok_alias" })));
	assert_eq!(gateway.created_at.map(|at| at.unix_timestamp()), Some(1_746_515_289));
	assert!(gateway.updated_at.is_some());
	assert_eq!(page.links.next.as_deref(), Some("/gateways?page=2"));
	assert_eq!(page.meta.total_pages, 3);

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn psp_token_creation_posts_minimal_body() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url());

	serve_token(&server).await;

	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/financial_instruments")
				.header("content-type", "application/json")
				.json_body(json!({ "psp_token": { "id": "cus_123", "psp": "stripe" } }));
			then.status(201).json_body(json!({
				"data": {
					"id": "FIN-1",
					"psp_token": { "id": "cus_123", "psp": "stripe", "value": "pm_1" },
				}
			}));
		})
		.await;
	let instrument =
		client.create_psp_token("stripe", "cus_123").await.expect("PSP token should register.");

	assert_eq!(instrument.data.id, "FIN-1");
	assert_eq!(instrument.data.psp_token.value, "pm_1");
	assert!(instrument.data.card.number.is_empty());

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn payment_card_creation_omits_empty_fields() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url());

	serve_token(&server).await;

	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/financial_instruments").json_body(json!({
				"card": {
					"name": "Jane Doe",
					"exp_month": 12,
					"exp_year": 2031,
					"number": "tok_sandbox_number",
					"cvc": "tok_sandbox_cvc",
					"billing_address": { "country": "US", "postal_code": "94107" },
				}
			}));
			then.status(200).json_body(json!({
				"data": { "id": "FIN-2", "card": { "brand": "visa", "last4": "4242" } }
			}));
		})
		.await;
	let card = Card {
		name: "Jane Doe".into(),
		exp_month: 12,
		exp_year: 2031,
		number: "tok_sandbox_number".into(),
		cvc: "tok_sandbox_cvc".into(),
		billing_address: Some(ContactAddress {
			country: "US".into(),
			postal_code: "94107".into(),
			..Default::default()
		}),
		..Default::default()
	};
	let instrument = client
		.create_payment_card(&CreatePaymentCardRequest::from(card))
		.await
		.expect("Card should register.");

	assert_eq!(instrument.data.card.brand, "visa");
	assert_eq!(instrument.data.card.last4, "4242");

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn verification_uses_upstream_path_and_decodes_result() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url());

	serve_token(&server).await;

	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/verfications").json_body(json!({
				"card": { "number": "tok_number" },
				"gateway_options": { "currency": "EUR" },
			}));
			then.status(200).json_body(json!({
				"data": {
					"id": "VER-1",
					"type": "verification",
					"currency": "EUR",
					"state": "successful",
					"gateway": { "id": "gw-primary", "type": "adyen" },
					"gateway_response": { "id": "psp-ref", "state": "authorized" },
					"avs_result": { "code": "Y", "street_match": "Y", "postal_match": "N" },
					"created_at": "2025-05-06T07:08:09Z",
				}
			}));
		})
		.await;
	let request = VerificationsRequest {
		card: Some(Card { number: "tok_number".into(), ..Default::default() }),
		gateway_options: Some(GatewayOptions { currency: "EUR".into(), shipping_address: None }),
	};
	let verification =
		client.create_verifications(&request).await.expect("Verification should succeed.").data;

	assert_eq!(verification.id, "VER-1");
	assert_eq!(verification.state, "successful");
	assert_eq!(verification.gateway.map(|gateway| gateway.type_).as_deref(), Some("adyen"));
	assert_eq!(
		verification.avs_result.map(|avs| avs.postal_match).as_deref(),
		Some("N")
	);
	assert!(verification.created_at.is_some());

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn generic_instrument_creation_accepts_any_serializable_body() {
	let server = MockServer::start_async().await;
	let client = build_reqwest_test_client(&server.base_url());

	serve_token(&server).await;

	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/financial_instruments")
				.json_body(json!({ "psp_token": { "id": "raw" }, "sub_account_id": "acct" }));
			then.status(400)
				.json_body(json!({ "errors": [{ "code": "invalid", "detail": "psp is required" }] }));
		})
		.await;
	let err = client
		.create_financial_instrument(&json!({ "psp_token": { "id": "raw" }, "sub_account_id": "acct" }))
		.await
		.expect_err("Missing psp should be rejected.");

	assert_eq!(
		err.as_api().map(|api| api.errors[0].detail.as_str()),
		Some("psp is required")
	);

	mock.assert_calls_async(1).await;
}
