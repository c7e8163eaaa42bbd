#![cfg(feature = "reqwest")]

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use oauth2_ely::{
	auth::{ClientId, ProviderId},
	error::{Error, TransportError},
	flows::{AuthorizationCallback, AuthorizationOptions, Client, ReqwestOAuthClient},
	http::ReqwestHttpClient,
	provider::{ProviderDescriptor, ely},
	url::Url,
};

const CLIENT_ID: &str = "mock_client_id";
const CLIENT_SECRET: &str = "mock_secret";

fn descriptor(server: &MockServer) -> ProviderDescriptor {
	// Plain HTTP on loopback; the mock's TLS certificate is self-signed.
	let url = |path: &str| {
		Url::parse(&format!("http://{}{path}", server.address())).expect("Mock URL should parse.")
	};

	ProviderDescriptor::builder(ProviderId::new("ely-mock").expect("Provider id should be valid."))
		.authorization_endpoint(url("/oauth2/v1"))
		.token_endpoint(url("/api/oauth2/v1/token"))
		.resource_owner_endpoint(url("/api/account/v1/info"))
		.default_scopes(ely::DEFAULT_SCOPES.iter().copied())
		.scope_delimiter(ely::SCOPE_DELIMITER)
		.build()
		.expect("Loopback descriptor should build.")
}

fn client(server: &MockServer) -> ReqwestOAuthClient {
	Client::new(
		descriptor(server),
		Arc::new(ely::ElyStrategy),
		ClientId::new(CLIENT_ID).expect("Client id should be valid."),
		"http://localhost/callback",
	)
	.expect("Reqwest transport should build.")
	.with_client_secret(CLIENT_SECRET)
}

#[tokio::test]
async fn full_login_round_trip() {
	let server = MockServer::start_async().await;
	let client = client(&server);
	let request = client
		.authorization_url(
			AuthorizationOptions::new().scope([ely::SCOPE_ACCOUNT_INFO, ely::SCOPE_ACCOUNT_EMAIL]),
		)
		.expect("Authorization URL should build.");

	assert_eq!(request.url.path(), "/oauth2/v1/mock_client_id");

	let callback = AuthorizationCallback::from_url(
		&Url::parse(&format!("http://localhost/callback?code=abc&state={}", request.state))
			.expect("Callback URL should parse."),
	)
	.expect("Callback should parse.");

	callback.validate_state(&request.state).expect("State should match.");

	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/oauth2/v1/token")
				.header("content-type", "application/x-www-form-urlencoded")
				.header("accept", "application/json");
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({
					"access_token": "mock_access_token",
					"token_type": "bearer",
					"expires_in": 86400,
				}));
		})
		.await;
	let profile_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/account/v1/info")
				.header("authorization", "Bearer mock_access_token");
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({
					"id": 1,
					"uuid": "ffc8fdc9-5824-509e-8a57-c99b940fb996",
					"username": "ErickSkrauch",
					"registeredAt": 1_470_566_470,
					"profileLink": "http://ely.by/u1",
					"preferredLanguage": "be",
				}));
		})
		.await;
	let token = client.exchange_code(&callback.code).await.expect("Exchange should succeed.");
	let owner = client.fetch_resource_owner(&token).await.expect("Profile should load.");

	token_mock.assert_async().await;
	profile_mock.assert_async().await;

	assert_eq!(token.token(), "mock_access_token");
	assert!(token.expires().is_some());
	assert_eq!(owner.username(), "ErickSkrauch");
	assert_eq!(owner.email(), None);
}

#[tokio::test]
async fn gateway_errors_surface_as_provider_errors() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/oauth2/v1/token");
			then.status(502).header("content-type", "text/html").body("html content");
		})
		.await;
	let err = client(&server).exchange_code("code").await.expect_err("502 must fail.");

	mock.assert_async().await;

	match err {
		Error::Provider(provider) => {
			assert_eq!(provider.message(), "Bad Gateway");
			assert_eq!(provider.status(), 502);
		},
		other => panic!("Unexpected error: {other:?}"),
	}
}

#[tokio::test]
async fn redirects_are_not_followed() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/oauth2/v1/token");
			then.status(302).header("location", "https://elsewhere.example.com/token");
		})
		.await;
	let err = client(&server).exchange_code("code").await.expect_err("302 must fail.");

	mock.assert_async().await;

	assert!(matches!(err, Error::Provider(ref provider) if provider.status() == 302));
}

#[tokio::test]
async fn unreachable_hosts_are_transport_errors() {
	let dead = |path: &str| Url::parse(&format!("http://127.0.0.1:9{path}")).expect("URL");
	let descriptor = ProviderDescriptor::builder(ProviderId::new("dead").expect("Id"))
		.authorization_endpoint(dead("/oauth2/v1"))
		.token_endpoint(dead("/token"))
		.resource_owner_endpoint(dead("/info"))
		.build()
		.expect("Loopback descriptor should build.");
	let client = Client::with_http_client(
		descriptor,
		Arc::new(ely::ElyStrategy),
		ClientId::new(CLIENT_ID).expect("Client id should be valid."),
		"http://localhost/callback",
		ReqwestHttpClient::new().expect("Reqwest transport should build."),
	);
	let err = client.exchange_code("code").await.expect_err("Closed port must fail.");

	assert!(matches!(err, Error::Transport(TransportError::Network { endpoint: "token", .. })));
}
