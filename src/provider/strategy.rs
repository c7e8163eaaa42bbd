//! Provider strategy hooks that customize URLs, authorization parameters, and response
//! classification.
//!
//! Descriptors carry the data; strategies carry the small amount of behavior that differs
//! between providers. Every hook has a default so most providers only override what they need.

// crates.io
use oauth2::http::StatusCode;
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ClientId},
	error::ConfigError,
	http::ResponseBody,
	provider::ProviderDescriptor,
};

/// Strategy hook that lets providers shape endpoints and classify responses.
///
/// Implementors are required to be `Send + Sync`, and the hooks use crate-owned data types so
/// strategies never depend on a particular HTTP client.
pub trait ProviderStrategy: Send + Sync {
	/// Resolves the URL the user is redirected to, before the query string is appended.
	fn authorization_endpoint(
		&self,
		descriptor: &ProviderDescriptor,
		_client_id: &ClientId,
	) -> Result<Url, ConfigError> {
		Ok(descriptor.endpoints.authorization.clone())
	}

	/// Resolves the token endpoint for a request carrying `params`.
	fn token_endpoint(
		&self,
		descriptor: &ProviderDescriptor,
		_params: &BTreeMap<String, String>,
	) -> Url {
		descriptor.endpoints.token.clone()
	}

	/// Resolves the resource owner endpoint for `token`.
	fn resource_owner_endpoint(
		&self,
		descriptor: &ProviderDescriptor,
		_token: &AccessToken,
	) -> Url {
		descriptor.endpoints.resource_owner.clone()
	}

	/// Adjusts the merged authorization query parameters before serialization.
	///
	/// The default keeps every parameter, including `client_id` and `approval_prompt`.
	fn finalize_authorization_params(&self, _params: &mut BTreeMap<String, String>) {}

	/// Returns the error message for a failed response, or `None` when it succeeded.
	fn classify_response(&self, status: StatusCode, body: &ResponseBody) -> Option<String> {
		classify_response(status, body)
	}
}

/// Default strategy: endpoints straight from the descriptor, parameters untouched.
#[derive(Debug, Default)]
pub struct DefaultProviderStrategy;
impl Display for DefaultProviderStrategy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("default-provider-strategy")
	}
}
impl ProviderStrategy for DefaultProviderStrategy {}

/// Classifies a provider response.
///
/// Only `200 OK` succeeds. Failures use the body's `message` field verbatim when the body is a
/// JSON object carrying one, and the standard reason phrase of the status otherwise.
pub fn classify_response(status: StatusCode, body: &ResponseBody) -> Option<String> {
	if status == StatusCode::OK {
		return None;
	}

	let message = body.as_object().and_then(|object| object.get("message")).and_then(message_text);

	Some(message.unwrap_or_else(|| reason_phrase(status)))
}

fn message_text(value: &Value) -> Option<String> {
	match value {
		Value::Null => None,
		Value::String(text) => Some(text.clone()),
		other => Some(other.to_string()),
	}
}

fn reason_phrase(status: StatusCode) -> String {
	status
		.canonical_reason()
		.map(str::to_owned)
		.unwrap_or_else(|| format!("HTTP status {}", status.as_u16()))
}
