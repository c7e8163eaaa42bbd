//! Provider configuration tables.
//!
//! A descriptor lists where a provider lives and how it expects to be spoken to. It holds no
//! behavior and derives `serde` traits, so applications can keep descriptors in their own
//! configuration files and load them at startup.

mod builder;
mod quirks;

pub use builder::*;
pub use quirks::*;

// self
use crate::{
	_prelude::*,
	auth::{ProviderId, ScopeList},
};

/// Where the token request puts the client credentials.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientAuthMethod {
	/// `client_id` and `client_secret` travel in the form body, as Ely.by expects.
	#[default]
	ClientSecretPost,
	/// `Authorization: Basic` header built from the form-encoded id and secret.
	ClientSecretBasic,
}

/// The three URLs every authorization-code login touches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Consent page base URL.
	pub authorization: Url,
	/// Code-for-token exchange URL.
	pub token: Url,
	/// Profile URL queried with the bearer token.
	pub resource_owner: Url,
}

/// Validated provider configuration; build one with [`ProviderDescriptor::builder`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
	/// Short provider name.
	pub id: ProviderId,
	/// Endpoint URLs.
	pub endpoints: ProviderEndpoints,
	/// Scopes requested when the caller does not supply any.
	#[serde(default)]
	pub default_scopes: ScopeList,
	/// Token request authentication.
	#[serde(default)]
	pub preferred_client_auth_method: ClientAuthMethod,
	/// Serialization differences from generic OAuth 2.0.
	#[serde(default)]
	pub quirks: ProviderQuirks,
}
impl ProviderDescriptor {
	/// Starts a [`ProviderDescriptorBuilder`] for `id`.
	pub fn builder(id: ProviderId) -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::new(id)
	}
}
