//! Shared fixtures for integration tests: a scripted transport and Ely-flavored clients.

#![allow(dead_code)]

// std
use std::{
	collections::VecDeque,
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	future::Future,
	pin::Pin,
	sync::Arc,
};
// crates.io
use oauth2_ely::{
	auth::ClientId,
	flows::Client,
	http::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse, ProviderHttpClient},
	oauth2::http::{HeaderMap, Method, StatusCode, header::CONTENT_TYPE},
	provider::{ProviderDescriptor, ely},
	url::Url,
};
use parking_lot::Mutex;
use serde_json::Value;

pub const CLIENT_ID: &str = "mock_client_id";
pub const CLIENT_SECRET: &str = "mock_secret";
pub const REDIRECT_URI: &str = "none";

/// Error surfaced by [`FakeHttpClient`] when a scripted failure is dequeued.
#[derive(Debug)]
pub struct FakeTransportError(pub String);
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Fake transport failure: {}.", self.0)
	}
}
impl StdError for FakeTransportError {}

/// Request captured by [`FakeHttpClient`].
#[derive(Clone, Debug)]
pub struct RecordedRequest {
	pub method: Method,
	pub url: Url,
	pub headers: HeaderMap,
	pub body: Vec<u8>,
}
impl RecordedRequest {
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|value| value.to_str().ok())
	}

	pub fn form(&self) -> Vec<(String, String)> {
		url::form_urlencoded::parse(&self.body).into_owned().collect()
	}

	pub fn form_value(&self, key: &str) -> Option<String> {
		self.form().into_iter().find(|(k, _)| k == key).map(|(_, v)| v)
	}
}

enum Scripted {
	Response(HttpResponse),
	Failure(String),
}

#[derive(Default)]
struct FakeState {
	queue: Mutex<VecDeque<Scripted>>,
	requests: Mutex<Vec<RecordedRequest>>,
}

/// Transport that answers from a queue of canned responses and records every request.
#[derive(Clone, Default)]
pub struct FakeHttpClient {
	state: Arc<FakeState>,
}
impl FakeHttpClient {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&self, status: u16, content_type: &str, body: impl Into<Vec<u8>>) -> &Self {
		let mut response = HttpResponse::new(body.into());

		*response.status_mut() = StatusCode::from_u16(status).expect("Status should be valid.");
		response
			.headers_mut()
			.insert(CONTENT_TYPE, content_type.parse().expect("Content type should be valid."));
		self.state.queue.lock().push_back(Scripted::Response(response));

		self
	}

	pub fn push_json(&self, status: u16, body: Value) -> &Self {
		self.push(status, "application/json", body.to_string())
	}

	pub fn push_failure(&self, message: &str) -> &Self {
		self.state.queue.lock().push_back(Scripted::Failure(message.to_owned()));

		self
	}

	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.state.requests.lock().clone()
	}

	pub fn last_request(&self) -> RecordedRequest {
		self.requests().pop().expect("At least one request should have been sent.")
	}
}
impl ProviderHttpClient for FakeHttpClient {
	type Handle = FakeHttpHandle;
	type TransportError = FakeTransportError;

	fn handle(&self) -> Self::Handle {
		FakeHttpHandle { state: self.state.clone() }
	}
}

pub struct FakeHttpHandle {
	state: Arc<FakeState>,
}
impl<'c> AsyncHttpClient<'c> for FakeHttpHandle {
	type Error = HttpClientError<FakeTransportError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let url = Url::parse(&request.uri().to_string()).expect("Request URI should be absolute.");

		self.state.requests.lock().push(RecordedRequest {
			method: request.method().clone(),
			url,
			headers: request.headers().clone(),
			body: request.body().clone(),
		});

		let scripted = self.state.queue.lock().pop_front().expect("No scripted response left.");

		Box::pin(async move {
			match scripted {
				Scripted::Response(response) => Ok(response),
				Scripted::Failure(message) =>
					Err(HttpClientError::Reqwest(Box::new(FakeTransportError(message)))),
			}
		})
	}
}

pub fn client_id() -> ClientId {
	ClientId::new(CLIENT_ID).expect("Client identifier fixture should be valid.")
}

pub fn ely_descriptor() -> ProviderDescriptor {
	ely::descriptor().expect("Ely descriptor should build.")
}

/// Ely client wired to `http`, authenticated with the fixture secret.
pub fn ely_client(http: &FakeHttpClient) -> Client<FakeHttpClient> {
	ely_client_with(ely_descriptor(), http)
}

pub fn ely_client_with(
	descriptor: ProviderDescriptor,
	http: &FakeHttpClient,
) -> Client<FakeHttpClient> {
	Client::with_http_client(
		descriptor,
		Arc::new(ely::ElyStrategy),
		client_id(),
		REDIRECT_URI,
		http.clone(),
	)
	.with_client_secret(CLIENT_SECRET)
}

pub fn profile_json() -> Value {
	serde_json::json!({
		"id": 1,
		"uuid": "ffc8fdc9-5824-509e-8a57-c99b940fb996",
		"username": "ErickSkrauch",
		"registeredAt": 1_470_566_470,
		"profileLink": "http://ely.by/u1",
		"preferredLanguage": "be",
		"email": "erickskrauch@ely.by",
	})
}
