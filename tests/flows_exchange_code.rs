mod common;

// crates.io
use serde_json::json;
// self
use common::*;
use oauth2_ely::{
	auth::TokenStatus,
	error::{DecodeError, Error, TransportError},
	flows::{AuthorizationOptions, ExchangeOptions},
	oauth2::http::Method,
	provider::{ClientAuthMethod, ely},
};

#[tokio::test]
async fn successful_exchange_decodes_the_token() {
	let http = FakeHttpClient::new();

	http.push_json(
		200,
		json!({ "access_token": "tok", "expires_in": 3600, "token_type": "bearer" }),
	);

	let token = ely_client(&http)
		.exchange_code("mock_authorization_code")
		.await
		.expect("Exchange should succeed.");

	assert_eq!(token.token(), "tok");
	assert!(token.expires().is_some());
	assert!(token.refresh_token().is_none());
	assert_eq!(token.token_type(), Some("bearer"));
	assert_eq!(token.status(), TokenStatus::Active);
}

#[tokio::test]
async fn request_targets_the_token_endpoint_with_form_credentials() {
	let http = FakeHttpClient::new();

	http.push_json(200, json!({ "access_token": "tok" }));
	ely_client(&http)
		.exchange_code("mock_authorization_code")
		.await
		.expect("Exchange should succeed.");

	let request = http.last_request();

	assert_eq!(http.requests().len(), 1);
	assert_eq!(request.method, Method::POST);
	assert_eq!(request.url.path(), "/api/oauth2/v1/token");
	assert_eq!(request.header("content-type"), Some("application/x-www-form-urlencoded"));
	assert_eq!(request.header("accept"), Some("application/json"));
	assert!(request.header("authorization").is_none());
	assert_eq!(request.form_value("grant_type").as_deref(), Some("authorization_code"));
	assert_eq!(request.form_value("code").as_deref(), Some("mock_authorization_code"));
	assert_eq!(request.form_value("redirect_uri").as_deref(), Some(REDIRECT_URI));
	assert_eq!(request.form_value("client_id").as_deref(), Some(CLIENT_ID));
	assert_eq!(request.form_value("client_secret").as_deref(), Some(CLIENT_SECRET));
}

#[tokio::test]
async fn per_request_redirect_uri_is_sent_with_the_code() {
	let http = FakeHttpClient::new();
	let client = ely_client(&http);
	let request = client
		.authorization_url(
			AuthorizationOptions::new().redirect_uri(ely::REDIRECT_URI_STATIC_PAGE_WITH_CODE),
		)
		.expect("URL should build.");

	http.push_json(200, json!({ "access_token": "tok" }));
	client
		.exchange_code_with("c", &ExchangeOptions::from(&request))
		.await
		.expect("Exchange should succeed.");

	assert_eq!(
		http.last_request().form_value("redirect_uri").as_deref(),
		Some(ely::REDIRECT_URI_STATIC_PAGE_WITH_CODE)
	);

	http.push_json(200, json!({ "access_token": "tok" }));
	let options = ExchangeOptions::new().redirect_uri(ely::REDIRECT_URI_STATIC_PAGE);

	client.exchange_code_with("c", &options).await
		.expect("Exchange should succeed.");

	assert_eq!(
		http.last_request().form_value("redirect_uri").as_deref(),
		Some(ely::REDIRECT_URI_STATIC_PAGE)
	);

	http.push_json(200, json!({ "access_token": "tok" }));
	client.exchange_code("c").await.expect("Exchange should succeed.");

	assert_eq!(http.last_request().form_value("redirect_uri").as_deref(), Some(REDIRECT_URI));
}

#[tokio::test]
async fn basic_auth_moves_credentials_into_the_header() {
	let http = FakeHttpClient::new();
	let mut descriptor = ely_descriptor();

	descriptor.preferred_client_auth_method = ClientAuthMethod::ClientSecretBasic;
	http.push_json(200, json!({ "access_token": "tok" }));
	ely_client_with(descriptor, &http)
		.exchange_code("mock_authorization_code")
		.await
		.expect("Exchange should succeed.");

	let request = http.last_request();

	// base64("mock_client_id:mock_secret")
	assert_eq!(request.header("authorization"), Some("Basic bW9ja19jbGllbnRfaWQ6bW9ja19zZWNyZXQ="));
	assert!(request.form_value("client_id").is_none());
	assert!(request.form_value("client_secret").is_none());
}

#[tokio::test]
async fn json_message_becomes_the_provider_error() {
	let http = FakeHttpClient::new();

	http.push_json(
		418,
		json!({
			"name": "Some error happened",
			"message": "Some exception message",
			"status": 418,
			"code": 0,
		}),
	);

	let err = ely_client(&http)
		.exchange_code("mock_authorization_code")
		.await
		.expect_err("Non-200 responses must fail.");

	match err {
		Error::Provider(provider) => {
			assert_eq!(provider.message(), "Some exception message");
			assert_eq!(provider.status(), 418);
			assert!(provider.body_text().contains("Some error happened"));
		},
		other => panic!("Unexpected error: {other:?}"),
	}
}

#[tokio::test]
async fn html_error_pages_use_the_reason_phrase() {
	let http = FakeHttpClient::new();

	http.push(502, "text/html", "html content");

	let err = ely_client(&http)
		.exchange_code("mock_authorization_code")
		.await
		.expect_err("Gateway errors must fail.");

	match err {
		Error::Provider(provider) => {
			assert_eq!(provider.message(), "Bad Gateway");
			assert_eq!(provider.status(), 502);
			assert_eq!(provider.body_text(), "html content");
			assert_eq!(provider.to_string(), "Bad Gateway");
		},
		other => panic!("Unexpected error: {other:?}"),
	}
}

#[tokio::test]
async fn non_object_success_bodies_are_decode_errors() {
	let http = FakeHttpClient::new();

	http.push(200, "text/plain", "ok");

	let err = ely_client(&http)
		.exchange_code("mock_authorization_code")
		.await
		.expect_err("Plain-text tokens must be rejected.");

	assert!(matches!(err, Error::Decode(DecodeError::NotAnObject { endpoint: "token" })));
}

#[tokio::test]
async fn form_encoded_token_bodies_are_understood() {
	let http = FakeHttpClient::new();

	http.push(200, "application/x-www-form-urlencoded", "access_token=tok&expires_in=60&foo=bar");

	let token = ely_client(&http)
		.exchange_code("mock_authorization_code")
		.await
		.expect("Form-encoded bodies should decode.");

	assert_eq!(token.token(), "tok");
	assert!(token.expires().is_some());
	assert_eq!(token.values().get("foo"), Some(&json!("bar")));
}

#[tokio::test]
async fn transport_failures_are_not_provider_errors() {
	let http = FakeHttpClient::new();

	http.push_failure("connection refused");

	let client = ely_client(&http);
	let err = client
		.exchange_code("mock_authorization_code")
		.await
		.expect_err("Transport failures must surface.");

	assert!(matches!(err, Error::Transport(TransportError::Network { endpoint: "token", .. })));

	// The client stays usable after a failure.
	http.push_json(200, json!({ "access_token": "retry" }));

	let token =
		client.exchange_code("mock_authorization_code").await.expect("Retry should succeed.");

	assert_eq!(token.token(), "retry");
}
