//! Client-level error types shared across flows, providers, and decoders.

// crates.io
use oauth2::{HttpResponse, http::StatusCode};
// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Provider answered but reported a failure.
	#[error(transparent)]
	Provider(#[from] ProviderError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, IO).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Successful response whose body could not be decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),

	/// Callback `state` differs from the one issued with the authorization URL.
	#[error("Authorization state mismatch.")]
	StateMismatch {
		/// State issued with the authorization URL.
		expected: String,
		/// State returned through the redirect callback.
		received: String,
	},
	/// Redirect callback reported an error instead of an authorization code.
	#[error("Authorization was not granted: {error}.")]
	AuthorizationDenied {
		/// Provider-supplied `error` code (or a local reason when the code is missing).
		error: String,
		/// Optional human-readable description.
		description: Option<String>,
	},
}

/// Failure reported by the provider through a non-200 response.
///
/// The message is either the provider's `message` field verbatim or the standard reason phrase
/// for the status code. The full response is kept for diagnostics.
#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct ProviderError {
	message: String,
	status: u16,
	response: Box<HttpResponse>,
}
impl ProviderError {
	/// Creates a provider error from a classified response.
	pub fn new(message: impl Into<String>, response: HttpResponse) -> Self {
		let status = response.status().as_u16();

		Self { message: message.into(), status, response: Box::new(response) }
	}

	/// Human-readable message.
	pub fn message(&self) -> &str {
		&self.message
	}

	/// Numeric HTTP status code of the failed response.
	pub fn status(&self) -> u16 {
		self.status
	}

	/// Typed status code of the failed response.
	pub fn status_code(&self) -> StatusCode {
		self.response.status()
	}

	/// Full response returned by the provider.
	pub fn response(&self) -> &HttpResponse {
		&self.response
	}

	/// Response body decoded lossily as UTF-8.
	pub fn body_text(&self) -> String {
		String::from_utf8_lossy(self.response.body()).into_owned()
	}
}

/// Configuration and validation failures raised locally.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Endpoint URL cannot carry additional path segments.
	#[error("The {endpoint} endpoint cannot be extended with path segments: {url}.")]
	InvalidEndpoint {
		/// Which endpoint failed.
		endpoint: &'static str,
		/// Endpoint URL that failed.
		url: String,
	},
	/// Requested scopes cannot be used.
	#[error("Requested scopes are invalid.")]
	InvalidScope(#[from] crate::auth::ScopeValidationError),
	/// Provider descriptor failed validation.
	#[error(transparent)]
	Descriptor(#[from] crate::provider::ProviderDescriptorError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the {endpoint} endpoint.")]
	Network {
		/// Endpoint label (`token` or `resource_owner`).
		endpoint: &'static str,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the {endpoint} endpoint.")]
	Io {
		/// Endpoint label (`token` or `resource_owner`).
		endpoint: &'static str,
		/// IO failure.
		#[source]
		source: std::io::Error,
	},
	/// Transport failed without a structured error.
	#[error("HTTP client error occurred while calling the {endpoint} endpoint: {message}.")]
	Other {
		/// Endpoint label (`token` or `resource_owner`).
		endpoint: &'static str,
		/// Transport-supplied description.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(
		endpoint: &'static str,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { endpoint, source: Box::new(src) }
	}
}

/// Failures decoding a successful (HTTP 200) provider response.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Body was not a JSON (or form-encoded) object.
	#[error("The {endpoint} endpoint returned a body that is not a JSON object.")]
	NotAnObject {
		/// Endpoint label (`token` or `resource_owner`).
		endpoint: &'static str,
	},
	/// A field was missing or had the wrong type.
	#[error("The {endpoint} endpoint returned an unexpected payload.")]
	Payload {
		/// Endpoint label (`token` or `resource_owner`).
		endpoint: &'static str,
		/// Structured failure including the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// A seconds field held a string that is not an integer.
	#[error("The {field} value `{value}` is not a whole number of seconds.")]
	InvalidSeconds {
		/// Field name.
		field: &'static str,
		/// Raw value.
		value: String,
	},
	/// Expiry cannot be represented as a calendar instant.
	#[error("The {field} value exceeds the supported range.")]
	ExpiryOutOfRange {
		/// Field name.
		field: &'static str,
	},
}
