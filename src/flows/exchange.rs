//! Authorization code exchange.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use oauth2::http::{
	HeaderValue, Method, Request,
	header::{AUTHORIZATION, CONTENT_TYPE},
};
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	error::ConfigError,
	flows::{AuthorizationRequest, Client, common},
	http::{HttpRequest, ProviderHttpClient},
	obs::FlowKind,
	provider::ClientAuthMethod,
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Per-exchange overrides for [`Client::exchange_code_with`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExchangeOptions {
	/// Redirect URI sent with the code. Must equal the one the authorization URL carried;
	/// `None` uses the client's configured URI.
	pub redirect_uri: Option<String>,
}
impl ExchangeOptions {
	/// Creates empty options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sends `redirect_uri` instead of the client's configured one.
	pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
		self.redirect_uri = Some(redirect_uri.into());

		self
	}
}
impl From<&AuthorizationRequest> for ExchangeOptions {
	fn from(request: &AuthorizationRequest) -> Self {
		Self { redirect_uri: Some(request.redirect_uri.clone()) }
	}
}

impl<C> Client<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Exchanges an authorization code for an access token.
	///
	/// Sends one `grant_type=authorization_code` POST to the token endpoint, authenticated with
	/// the descriptor's preferred client authentication method. The response is classified
	/// before any decoding, so a non-200 answer always surfaces as [`Error::Provider`].
	///
	/// The client's configured redirect URI is sent; use [`Client::exchange_code_with`] when the
	/// authorization URL overrode it.
	pub async fn exchange_code(&self, code: &str) -> Result<AccessToken> {
		self.exchange_code_with(code, &ExchangeOptions::default()).await
	}

	/// Exchanges an authorization code, applying `options`.
	///
	/// Pass `&ExchangeOptions::from(&request)` to reuse the redirect URI of the
	/// [`AuthorizationRequest`] the code was issued for.
	pub async fn exchange_code_with(
		&self,
		code: &str,
		options: &ExchangeOptions,
	) -> Result<AccessToken> {
		common::observe(FlowKind::ExchangeCode, "exchange_code", async move {
			let request = self.token_request(code, options)?;
			let payload = common::send_and_decode(self, "token", request).await?;

			AccessToken::from_response(payload, OffsetDateTime::now_utc()).map_err(Error::from)
		})
		.await
	}

	fn token_request(&self, code: &str, options: &ExchangeOptions) -> Result<HttpRequest> {
		let redirect_uri = options.redirect_uri.as_deref().unwrap_or(&self.redirect_uri);
		let mut params = BTreeMap::new();

		params.insert("grant_type".to_owned(), "authorization_code".to_owned());
		params.insert("code".to_owned(), code.to_owned());
		params.insert("redirect_uri".to_owned(), redirect_uri.to_owned());

		let basic = match (self.descriptor.preferred_client_auth_method, &self.client_secret) {
			(ClientAuthMethod::ClientSecretBasic, Some(secret)) =>
				Some(basic_credentials(&self.client_id, secret.expose())),
			(_, secret) => {
				params.insert("client_id".to_owned(), self.client_id.to_string());

				if let Some(secret) = secret {
					params.insert("client_secret".to_owned(), secret.expose().to_owned());
				}

				None
			},
		};
		let url = self.strategy.token_endpoint(&self.descriptor, &params);
		let body =
			form_urlencoded::Serializer::new(String::new()).extend_pairs(params.iter()).finish();
		let mut request = Request::builder()
			.method(Method::POST)
			.uri(url.as_str())
			.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
			.body(body.into_bytes())
			.map_err(ConfigError::from)?;

		if let Some(credentials) = basic {
			let value = HeaderValue::from_str(&credentials)
				.map_err(|e| ConfigError::from(oauth2::http::Error::from(e)))?;

			request.headers_mut().insert(AUTHORIZATION, value);
		}

		common::accept_json(request.headers_mut());

		Ok(request)
	}
}

/// `Basic` credentials with both halves form-encoded first, as token endpoints expect.
fn basic_credentials(client_id: &str, secret: &str) -> String {
	let id = form_urlencoded::byte_serialize(client_id.as_bytes()).collect::<String>();
	let secret = form_urlencoded::byte_serialize(secret.as_bytes()).collect::<String>();

	format!("Basic {}", STANDARD.encode(format!("{id}:{secret}")))
}
