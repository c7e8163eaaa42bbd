//! Authorization URL construction and CSRF state bookkeeping.

// self
use crate::{
	_prelude::*,
	auth::{self, ScopeList},
	error::ConfigError,
	flows::Client,
	http::ProviderHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// Caller overrides merged over the provider defaults when building an authorization URL.
#[derive(Clone, Debug, Default)]
pub struct AuthorizationOptions {
	/// Requested scopes, in order. `None` or an empty list selects the descriptor defaults.
	pub scope: Option<Vec<String>>,
	/// Explicit state; a fresh token is generated when absent.
	pub state: Option<String>,
	/// Redirect URI override for this request.
	pub redirect_uri: Option<String>,
	/// Additional query parameters. These override the defaults, except where the provider
	/// strategy strips them.
	pub extra: BTreeMap<String, String>,
}
impl AuthorizationOptions {
	/// Creates empty options (every default applies).
	pub fn new() -> Self {
		Self::default()
	}

	/// Requests `scopes` instead of the descriptor defaults.
	pub fn scope<I, S>(mut self, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scope = Some(scopes.into_iter().map(Into::into).collect());

		self
	}

	/// Uses `state` instead of a generated token.
	pub fn state(mut self, state: impl Into<String>) -> Self {
		self.state = Some(state.into());

		self
	}

	/// Overrides the redirect URI for this request.
	pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
		self.redirect_uri = Some(redirect_uri.into());

		self
	}

	/// Adds an extra query parameter.
	pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.extra.insert(key.into(), value.into());

		self
	}
}

/// Authorization URL plus the values the caller must keep across the redirect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationRequest {
	/// Fully qualified URL to redirect the user to.
	pub url: Url,
	/// State emitted in the URL; compare it with the callback's `state`.
	pub state: String,
	/// Scopes emitted in the URL, in order.
	pub scope: ScopeList,
	/// Redirect URI emitted in the URL.
	pub redirect_uri: String,
}
impl AuthorizationRequest {
	/// Checks the `state` returned through the redirect callback.
	pub fn validate_state(&self, received: &str) -> Result<()> {
		if received == self.state {
			Ok(())
		} else {
			Err(Error::StateMismatch {
				expected: self.state.clone(),
				received: received.to_owned(),
			})
		}
	}
}

impl<C> Client<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Builds the URL the user is redirected to.
	///
	/// Defaults (`state`, `scope`, `response_type=code`, `redirect_uri`, `client_id`, and the
	/// descriptor's `approval_prompt`) are merged with `options`, scopes are joined with the
	/// descriptor's delimiter, and the provider strategy then finalizes the parameters and
	/// resolves the endpoint. The emitted state is also recorded on the client, see
	/// [`Client::state`].
	pub fn authorization_url(
		&self,
		options: AuthorizationOptions,
	) -> Result<AuthorizationRequest> {
		const KIND: FlowKind = FlowKind::Authorize;

		let span = FlowSpan::new(KIND, "authorization_url");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span.in_scope(|| self.build_authorization_request(options));
		let outcome = match &result {
			Ok(request) => {
				self.record_state(&request.state);

				FlowOutcome::Success
			},
			Err(_) => FlowOutcome::Failure,
		};

		obs::record_outcome(&span, KIND, outcome);

		result
	}

	fn build_authorization_request(
		&self,
		options: AuthorizationOptions,
	) -> Result<AuthorizationRequest> {
		let AuthorizationOptions { scope, state, redirect_uri, extra } = options;
		let delimiter = self.descriptor.quirks.scope_delimiter;
		let requested = match scope {
			Some(list) if !list.is_empty() => ScopeList::new(list).map_err(ConfigError::from)?,
			_ => self.descriptor.default_scopes.clone(),
		};
		let joined = requested.join(delimiter).map_err(ConfigError::from)?;
		let mut params = BTreeMap::new();

		params.insert("state".to_owned(), state.unwrap_or_else(auth::generate_state));
		params.insert("scope".to_owned(), joined);
		params.insert("response_type".to_owned(), "code".to_owned());
		params.insert(
			"redirect_uri".to_owned(),
			redirect_uri.unwrap_or_else(|| self.redirect_uri.clone()),
		);
		params.insert("client_id".to_owned(), self.client_id.to_string());

		if let Some(prompt) = self.descriptor.quirks.approval_prompt {
			params.insert("approval_prompt".to_owned(), prompt.as_str().to_owned());
		}

		params.extend(extra);
		self.strategy.finalize_authorization_params(&mut params);

		// Extras may have replaced the generated values; report what is actually emitted.
		let scope = match params.get("scope") {
			Some(raw) => ScopeList::parse_delimited(raw, delimiter).map_err(ConfigError::from)?,
			None => ScopeList::default(),
		};
		let mut url = self.strategy.authorization_endpoint(&self.descriptor, &self.client_id)?;

		url.query_pairs_mut().extend_pairs(params.iter());

		let state = params.remove("state").unwrap_or_default();
		let redirect_uri = params.remove("redirect_uri").unwrap_or_default();

		Ok(AuthorizationRequest { url, state, scope, redirect_uri })
	}
}
