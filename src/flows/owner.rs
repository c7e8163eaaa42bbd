//! Resource owner retrieval.

// crates.io
use oauth2::http::{Method, Request, header::AUTHORIZATION};
// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	error::ConfigError,
	flows::{Client, common},
	http::ProviderHttpClient,
	obs::FlowKind,
	owner::ResourceOwner,
};

impl<C> Client<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Fetches and decodes the profile of the account `token` was issued for.
	pub async fn fetch_resource_owner(&self, token: &AccessToken) -> Result<ResourceOwner> {
		common::observe(FlowKind::ResourceOwner, "fetch_resource_owner", async move {
			let details = self.request_resource_owner(token).await?;

			ResourceOwner::from_map(details).map_err(Error::from)
		})
		.await
	}

	/// Fetches the raw, classified profile mapping without decoding it.
	pub async fn fetch_resource_owner_details(
		&self,
		token: &AccessToken,
	) -> Result<Map<String, Value>> {
		common::observe(
			FlowKind::ResourceOwner,
			"fetch_resource_owner_details",
			self.request_resource_owner(token),
		)
		.await
	}

	async fn request_resource_owner(&self, token: &AccessToken) -> Result<Map<String, Value>> {
		let url = self.strategy.resource_owner_endpoint(&self.descriptor, token);
		let mut request = Request::builder()
			.method(Method::GET)
			.uri(url.as_str())
			.header(AUTHORIZATION, token.bearer_header())
			.body(Vec::new())
			.map_err(ConfigError::from)?;

		common::accept_json(request.headers_mut());
		common::send_and_decode(self, "resource_owner", request).await
	}
}
