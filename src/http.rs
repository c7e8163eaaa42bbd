//! Transport primitives for provider round trips.
//!
//! The module exposes [`ProviderHttpClient`], the client's only dependency on an HTTP stack,
//! and [`ResponseBody`], the lenient body view handed to the response classifier. Custom
//! transports implement the trait by returning [`AsyncHttpClient`] handles: a single
//! request/response primitive with no pooling, retry, or streaming expectations.

// crates.io
pub use oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse};
use oauth2::http::header::CONTENT_TYPE;
// self
use crate::_prelude::*;

/// Abstraction over HTTP transports capable of executing provider requests.
///
/// Implementations must be `Send + Sync + 'static` so they can be shared behind an `Arc`, and
/// the handles they return must own whatever state is required so their request futures remain
/// `Send` for the lifetime of the in-flight operation. Timeouts belong to the transport; the
/// client never retries.
pub trait ProviderHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle used for a single round trip.
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Builds a handle for the next request.
	fn handle(&self) -> Self::Handle;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Token requests should not follow redirects, matching OAuth 2.0 guidance that token endpoints
/// return results directly. Configure any custom [`ReqwestClient`] passed to
/// [`ReqwestHttpClient::with_client`] accordingly; [`ReqwestHttpClient::new`] does so already.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a client that never follows redirects.
	pub fn new() -> Result<Self, crate::error::ConfigError> {
		let client = ReqwestClient::builder().redirect(reqwest::redirect::Policy::none()).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ProviderHttpClient for ReqwestHttpClient {
	type Handle = ReqwestHandle;
	type TransportError = ReqwestError;

	fn handle(&self) -> Self::Handle {
		ReqwestHandle(self.0.clone())
	}
}

/// Handle returned by [`ReqwestHttpClient`] that satisfies [`ProviderHttpClient`].
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHandle(ReqwestClient);
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for ReqwestHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = self.0.clone();

		Box::pin(async move {
			let response =
				client.execute(request.try_into().map_err(Box::new)?).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

/// Lenient view over a response body, produced before any status check.
///
/// Bodies declared as `application/x-www-form-urlencoded` are parsed into an object of string
/// values; everything else is tried as JSON and kept as raw text when that fails.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseBody {
	/// JSON value (or a form-encoded body lifted into a JSON object).
	Structured(Value),
	/// Body that could not be decoded (HTML error pages, plain text, empty bodies).
	Raw(String),
}
impl ResponseBody {
	/// Parses the body of `response` according to its `content-type`.
	pub fn parse(response: &HttpResponse) -> Self {
		let content_type = response
			.headers()
			.get(CONTENT_TYPE)
			.and_then(|value| value.to_str().ok())
			.unwrap_or_default()
			.to_ascii_lowercase();

		Self::from_bytes(&content_type, response.body())
	}

	/// Parses raw bytes given an already-lowercased content type.
	pub fn from_bytes(content_type: &str, body: &[u8]) -> Self {
		if content_type.contains("urlencoded") {
			let object = url::form_urlencoded::parse(body)
				.map(|(key, value)| (key.into_owned(), Value::String(value.into_owned())))
				.collect::<Map<_, _>>();

			return Self::Structured(Value::Object(object));
		}

		match serde_json::from_slice(body) {
			Ok(value) => Self::Structured(value),
			Err(_) => Self::Raw(String::from_utf8_lossy(body).into_owned()),
		}
	}

	/// Returns the top-level JSON object, if the body is one.
	pub fn as_object(&self) -> Option<&Map<String, Value>> {
		match self {
			Self::Structured(value) => value.as_object(),
			Self::Raw(_) => None,
		}
	}

	/// Consumes the body, returning the top-level JSON object, if any.
	pub fn into_object(self) -> Option<Map<String, Value>> {
		match self {
			Self::Structured(Value::Object(object)) => Some(object),
			_ => None,
		}
	}
}
