//! Builds an Ely.by authorization URL and shows how a redirect handler checks the returned
//! `state` before exchanging the code.

// std
use std::collections::HashMap;
// crates.io
use color_eyre::Result;
use url::Url;
// self
use oauth2_ely::{
	auth::ClientId,
	flows::{AuthorizationCallback, AuthorizationOptions},
	provider::ely,
};

fn main() -> Result<()> {
	color_eyre::install()?;

	let client = ely::client(
		ClientId::new("demo-client")?,
		"demo-secret",
		"https://app.example.com/oauth/ely/callback",
	)?;
	let request = client.authorization_url(
		AuthorizationOptions::new().scope([ely::SCOPE_ACCOUNT_INFO, ely::SCOPE_ACCOUNT_EMAIL]),
	)?;

	println!("Send your user to {}.", request.url);

	let mut sessions = HashMap::new();

	sessions.insert(request.state.clone(), request.clone());

	// Simulate Ely.by redirecting back with a code and the issued state.
	let redirect = Url::parse(&format!(
		"https://app.example.com/oauth/ely/callback?code=demo-code&state={}",
		request.state
	))?;
	let callback = AuthorizationCallback::from_url(&redirect)?;
	let returned_state = callback.state.clone().unwrap_or_default();

	if let Some(stashed) = sessions.remove(&returned_state) {
		stashed.validate_state(&returned_state)?;
		println!("State validated. Granted scopes:");

		for scope in &stashed.scope {
			println!("  - {scope}");
		}

		println!(
			"Call Client::exchange_code_with(`{}`, &ExchangeOptions::from(&request)) next.",
			callback.code
		);
	} else {
		eprintln!("State `{returned_state}` was not recognized.");
	}

	Ok(())
}
