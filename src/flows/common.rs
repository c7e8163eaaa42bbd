//! Shared round-trip helpers: send, classify, and lift the body into an object.

// crates.io
use oauth2::http::{
	HeaderValue,
	header::{ACCEPT, HeaderMap},
};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, DecodeError, ProviderError, TransportError},
	flows::Client,
	http::{AsyncHttpClient, HttpClientError, HttpRequest, ProviderHttpClient, ResponseBody},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

pub(crate) const APPLICATION_JSON: &str = "application/json";

/// Runs `fut` inside a flow span and records its attempt and outcome.
pub(crate) async fn observe<T, F>(kind: FlowKind, stage: &'static str, fut: F) -> Result<T>
where
	F: Future<Output = Result<T>>,
{
	let span = FlowSpan::new(kind, stage);

	obs::record_flow_outcome(kind, FlowOutcome::Attempt);

	let result = span.instrument(fut).await;
	let outcome = if result.is_ok() { FlowOutcome::Success } else { FlowOutcome::Failure };

	obs::record_outcome(&span, kind, outcome);

	result
}

/// Sends `request`, runs the strategy's classifier, and returns the decoded JSON object.
///
/// Exactly one transport call happens per invocation; nothing is retried.
pub(crate) async fn send_and_decode<C>(
	client: &Client<C>,
	endpoint: &'static str,
	request: HttpRequest,
) -> Result<Map<String, Value>>
where
	C: ?Sized + ProviderHttpClient,
{
	let handle = client.http_client.handle();
	let response =
		handle.call(request).await.map_err(|err| map_transport_error(endpoint, err))?;
	let body = ResponseBody::parse(&response);

	if let Some(message) = client.strategy.classify_response(response.status(), &body) {
		return Err(ProviderError::new(message, response).into());
	}

	body.into_object().ok_or_else(|| DecodeError::NotAnObject { endpoint }.into())
}

/// Adds `Accept: application/json` unless the caller already negotiated a type.
pub(crate) fn accept_json(headers: &mut HeaderMap) {
	headers.entry(ACCEPT).or_insert(HeaderValue::from_static(APPLICATION_JSON));
}

fn map_transport_error<E>(endpoint: &'static str, err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::network(endpoint, *inner).into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(source) => TransportError::Io { endpoint, source }.into(),
		HttpClientError::Other(message) => TransportError::Other { endpoint, message }.into(),
		_ => TransportError::Other { endpoint, message: "unknown transport failure".into() }.into(),
	}
}
