//! Ely.by account service binding.
//!
//! Ely.by differs from a textbook OAuth 2.0 provider in two ways: the client identifier is part
//! of the authorization URL path (`/oauth2/v1/{client_id}`) instead of the query string, and
//! scopes are joined with commas. Everything else follows the generic flow engine.

// self
use crate::{
	_prelude::*,
	auth::{ClientId, ProviderId},
	error::ConfigError,
	provider::{ProviderDescriptor, ProviderDescriptorError, ProviderQuirks, ProviderStrategy},
};

/// Authorization base URL; the client identifier is appended as a path segment.
pub const AUTHORIZATION_BASE_URL: &str = "https://account.ely.by/oauth2/v1";
/// Token endpoint.
pub const TOKEN_URL: &str = "https://account.ely.by/api/oauth2/v1/token";
/// Resource owner (account info) endpoint.
pub const RESOURCE_OWNER_URL: &str = "https://account.ely.by/api/account/v1/info";
/// Base of the public skin URL derived from a username.
pub const SKIN_URL_BASE: &str = "http://skinsystem.ely.by/skins";

/// Scope delimiter.
pub const SCOPE_DELIMITER: char = ',';
/// Basic account information.
pub const SCOPE_ACCOUNT_INFO: &str = "account_info";
/// Account e-mail address.
pub const SCOPE_ACCOUNT_EMAIL: &str = "account_email";
/// Minecraft server session join.
pub const SCOPE_MINECRAFT_SERVER_SESSION: &str = "minecraft_server_session";
/// Scopes requested when the caller supplies none.
pub const DEFAULT_SCOPES: &[&str] = &[SCOPE_ACCOUNT_INFO];

/// Redirect URI that shows the user a static success page.
pub const REDIRECT_URI_STATIC_PAGE: &str = "static_page";
/// Redirect URI that shows the authorization code on a static page for manual copying.
pub const REDIRECT_URI_STATIC_PAGE_WITH_CODE: &str = "static_page_with_code";

/// Builds the Ely.by descriptor.
pub fn descriptor() -> Result<ProviderDescriptor, ProviderDescriptorError> {
	ProviderDescriptor::builder(ProviderId::new("ely")?)
		.parse_endpoints(AUTHORIZATION_BASE_URL, TOKEN_URL, RESOURCE_OWNER_URL)?
		.default_scopes(DEFAULT_SCOPES.iter().copied())
		.quirks(ProviderQuirks { scope_delimiter: SCOPE_DELIMITER, approval_prompt: None })
		.build()
}

/// Builds a reqwest-backed Ely.by client that authenticates with `client_secret`.
#[cfg(feature = "reqwest")]
pub fn client(
	client_id: ClientId,
	client_secret: impl Into<crate::auth::Secret>,
	redirect_uri: impl Into<String>,
) -> Result<crate::flows::ReqwestOAuthClient> {
	let descriptor = descriptor().map_err(ConfigError::from)?;

	Ok(crate::flows::Client::new(descriptor, Arc::new(ElyStrategy), client_id, redirect_uri)?
		.with_client_secret(client_secret))
}

/// Strategy implementing the Ely.by authorization URL shape.
#[derive(Clone, Copy, Debug, Default)]
pub struct ElyStrategy;
impl Display for ElyStrategy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("ely-strategy")
	}
}
impl ProviderStrategy for ElyStrategy {
	fn authorization_endpoint(
		&self,
		descriptor: &ProviderDescriptor,
		client_id: &ClientId,
	) -> Result<Url, ConfigError> {
		let base = &descriptor.endpoints.authorization;
		let mut url = base.clone();

		url.path_segments_mut()
			.map_err(|_| ConfigError::InvalidEndpoint {
				endpoint: "authorization",
				url: base.to_string(),
			})?
			.pop_if_empty()
			.push(client_id.as_ref());

		Ok(url)
	}

	// The client travels in the path, and approval prompts are not understood.
	fn finalize_authorization_params(&self, params: &mut BTreeMap<String, String>) {
		params.remove("client_id");
		params.remove("approval_prompt");
	}
}
