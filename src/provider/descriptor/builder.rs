// crates.io
use url::Host;
// self
use crate::{
	_prelude::*,
	auth::{IdentifierError, ProviderId, ScopeList, ScopeValidationError},
	provider::{ClientAuthMethod, ProviderDescriptor, ProviderEndpoints, ProviderQuirks},
};

/// Reasons a descriptor cannot be assembled.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ProviderDescriptorError {
	/// The provider identifier was rejected.
	#[error(transparent)]
	InvalidIdentifier(#[from] IdentifierError),
	/// An endpoint string is not an absolute URL.
	#[error("The {endpoint} endpoint is not a valid URL: {source}.")]
	InvalidEndpointUrl {
		/// Endpoint name (`authorization`, `token`, `resource_owner`).
		endpoint: &'static str,
		/// Parser failure.
		#[source]
		source: url::ParseError,
	},
	/// An endpoint was never set.
	#[error("The {endpoint} endpoint is required.")]
	MissingEndpoint {
		/// Endpoint name (`authorization`, `token`, `resource_owner`).
		endpoint: &'static str,
	},
	/// An endpoint uses plain HTTP on a non-loopback host, or another scheme entirely.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Endpoint name (`authorization`, `token`, `resource_owner`).
		endpoint: &'static str,
		/// Offending URL.
		url: String,
	},
	/// Control characters cannot separate scopes.
	#[error("Scope delimiter {delimiter:?} is not printable.")]
	InvalidScopeDelimiter {
		/// Supplied delimiter.
		delimiter: char,
	},
	/// A default scope contains the delimiter or whitespace.
	#[error(transparent)]
	InvalidDefaultScopes(#[from] ScopeValidationError),
}

/// Step-by-step constructor for [`ProviderDescriptor`].
///
/// Endpoints may be given as [`Url`]s or parsed from strings with [`Self::parse_endpoints`];
/// everything is validated once in [`Self::build`].
#[derive(Debug)]
pub struct ProviderDescriptorBuilder {
	id: ProviderId,
	authorization: Option<Url>,
	token: Option<Url>,
	resource_owner: Option<Url>,
	default_scopes: Vec<String>,
	client_auth: ClientAuthMethod,
	quirks: ProviderQuirks,
}
impl ProviderDescriptorBuilder {
	/// Starts an empty descriptor for `id` with generic OAuth 2.0 quirks.
	pub fn new(id: ProviderId) -> Self {
		Self {
			id,
			authorization: None,
			token: None,
			resource_owner: None,
			default_scopes: Vec::new(),
			client_auth: ClientAuthMethod::default(),
			quirks: ProviderQuirks::default(),
		}
	}

	/// Base URL of the consent page.
	pub fn authorization_endpoint(self, url: Url) -> Self {
		Self { authorization: Some(url), ..self }
	}

	/// URL that trades authorization codes for tokens.
	pub fn token_endpoint(self, url: Url) -> Self {
		Self { token: Some(url), ..self }
	}

	/// URL that returns the profile of the token's owner.
	pub fn resource_owner_endpoint(self, url: Url) -> Self {
		Self { resource_owner: Some(url), ..self }
	}

	/// Parses and sets all three endpoints from string constants.
	pub fn parse_endpoints(
		self,
		authorization: &str,
		token: &str,
		resource_owner: &str,
	) -> Result<Self, ProviderDescriptorError> {
		Ok(Self {
			authorization: Some(parse("authorization", authorization)?),
			token: Some(parse("token", token)?),
			resource_owner: Some(parse("resource_owner", resource_owner)?),
			..self
		})
	}

	/// Scopes used when an authorization request does not name any, in request order.
	pub fn default_scopes<I>(mut self, scopes: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<String>,
	{
		self.default_scopes = scopes.into_iter().map(Into::into).collect();

		self
	}

	/// How the token request authenticates the client.
	pub fn preferred_client_auth_method(self, method: ClientAuthMethod) -> Self {
		Self { client_auth: method, ..self }
	}

	/// Character placed between scopes in the `scope` parameter.
	pub fn scope_delimiter(mut self, delimiter: char) -> Self {
		self.quirks.scope_delimiter = delimiter;

		self
	}

	/// Replaces every quirk at once.
	pub fn quirks(self, quirks: ProviderQuirks) -> Self {
		Self { quirks, ..self }
	}

	/// Validates the collected values.
	pub fn build(self) -> Result<ProviderDescriptor, ProviderDescriptorError> {
		let endpoints = ProviderEndpoints {
			authorization: secure("authorization", self.authorization)?,
			token: secure("token", self.token)?,
			resource_owner: secure("resource_owner", self.resource_owner)?,
		};
		let delimiter = self.quirks.scope_delimiter;

		if delimiter.is_control() {
			return Err(ProviderDescriptorError::InvalidScopeDelimiter { delimiter });
		}

		let default_scopes = ScopeList::new(self.default_scopes)?;

		default_scopes.join(delimiter)?;

		Ok(ProviderDescriptor {
			id: self.id,
			endpoints,
			default_scopes,
			preferred_client_auth_method: self.client_auth,
			quirks: self.quirks,
		})
	}
}

fn parse(endpoint: &'static str, raw: &str) -> Result<Url, ProviderDescriptorError> {
	Url::parse(raw)
		.map_err(|source| ProviderDescriptorError::InvalidEndpointUrl { endpoint, source })
}

fn secure(endpoint: &'static str, url: Option<Url>) -> Result<Url, ProviderDescriptorError> {
	let url = url.ok_or(ProviderDescriptorError::MissingEndpoint { endpoint })?;
	let loopback = match url.host() {
		Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		Some(Host::Ipv4(addr)) => addr.is_loopback(),
		Some(Host::Ipv6(addr)) => addr.is_loopback(),
		None => false,
	};

	match url.scheme() {
		"https" => Ok(url),
		"http" if loopback => Ok(url),
		_ => Err(ProviderDescriptorError::InsecureEndpoint { endpoint, url: url.into() }),
	}
}
