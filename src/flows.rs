//! Authorization-code flow engine.
//!
//! [`Client`] drives the three legs of the dance against one provider descriptor: building the
//! authorization URL ([`Client::authorization_url`]), exchanging the returned code
//! ([`Client::exchange_code`], or [`Client::exchange_code_with`] to match a per-request
//! redirect URI), and fetching the resource owner
//! ([`Client::fetch_resource_owner`]). The operations are independent; none requires another
//! to have run on the same instance, and a failure leaves the client ready for another attempt.

pub mod authorize;
pub mod callback;
pub mod exchange;
pub mod owner;

mod common;

pub use authorize::*;
pub use callback::*;
pub use exchange::*;

// self
use crate::{
	_prelude::*,
	auth::{ClientId, Secret},
	http::ProviderHttpClient,
	provider::{ProviderDescriptor, ProviderStrategy},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestOAuthClient = Client<ReqwestHttpClient>;

/// OAuth 2.0 authorization-code client bound to a single provider.
///
/// The client owns the transport, the descriptor, and the strategy so each operation only deals
/// with its own request shape. Configuration is immutable after construction; the only mutable
/// piece is the last issued state, kept behind a mutex for callers that do not persist it
/// themselves.
pub struct Client<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Provider descriptor that defines endpoints and quirks.
	pub descriptor: ProviderDescriptor,
	/// Strategy responsible for provider-specific URL and response handling.
	pub strategy: Arc<dyn ProviderStrategy>,
	/// OAuth 2.0 client identifier.
	pub client_id: ClientId,
	/// Client secret used when exchanging codes.
	pub client_secret: Option<Secret>,
	/// Redirect URI registered for the client.
	pub redirect_uri: String,
	last_state: Mutex<Option<String>>,
}
impl<C> Client<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(
		descriptor: ProviderDescriptor,
		strategy: Arc<dyn ProviderStrategy>,
		client_id: ClientId,
		redirect_uri: impl Into<String>,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			descriptor,
			strategy,
			client_id,
			client_secret: None,
			redirect_uri: redirect_uri.into(),
			last_state: Mutex::new(None),
		}
	}

	/// Sets or replaces the client secret.
	pub fn with_client_secret(mut self, secret: impl Into<Secret>) -> Self {
		self.client_secret = Some(secret.into());

		self
	}

	/// State emitted by the most recent [`authorization_url`](Self::authorization_url) call.
	///
	/// Shared by every caller of this instance; concurrent authorization attempts should persist
	/// [`AuthorizationRequest::state`] per session instead.
	pub fn state(&self) -> Option<String> {
		self.last_state.lock().clone()
	}

	fn record_state(&self, state: &str) {
		*self.last_state.lock() = Some(state.to_owned());
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestHttpClient> {
	/// Creates a client backed by a fresh reqwest transport that never follows redirects.
	///
	/// Use [`Client::with_client_secret`] to attach the client secret before exchanging codes.
	pub fn new(
		descriptor: ProviderDescriptor,
		strategy: Arc<dyn ProviderStrategy>,
		client_id: ClientId,
		redirect_uri: impl Into<String>,
	) -> Result<Self> {
		Ok(Self::with_http_client(
			descriptor,
			strategy,
			client_id,
			redirect_uri,
			ReqwestHttpClient::new()?,
		))
	}
}
impl<C> Debug for Client<C>
where
	C: ?Sized + ProviderHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("descriptor", &self.descriptor)
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.field("redirect_uri", &self.redirect_uri)
			.finish()
	}
}
