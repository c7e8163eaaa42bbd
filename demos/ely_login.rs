//! Interactive Ely.by login.
//!
//! Uses the `static_page_with_code` redirect so no web server is needed: Ely.by shows the code
//! after the user approves, the user pastes it here, and the demo exchanges it and prints the
//! resource owner profile.

// std
use std::io::{self, Write};
// crates.io
use color_eyre::Result;
// self
use oauth2_ely::{
	auth::ClientId,
	flows::{AuthorizationOptions, ExchangeOptions},
	provider::ely,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let client_id = prompt("Ely.by client ID")?;
	let client_secret = prompt("Ely.by client secret")?;
	let client = ely::client(
		ClientId::new(client_id)?,
		client_secret,
		ely::REDIRECT_URI_STATIC_PAGE_WITH_CODE,
	)?;
	let request = client.authorization_url(
		AuthorizationOptions::new().scope([ely::SCOPE_ACCOUNT_INFO, ely::SCOPE_ACCOUNT_EMAIL]),
	)?;

	println!("Open {} and approve the application.", request.url);

	let code = prompt("Authorization code shown by Ely.by")?;
	let token = client.exchange_code_with(&code, &ExchangeOptions::from(&request)).await?;

	println!("Token type: {}", token.token_type().unwrap_or("unknown"));

	match token.expires() {
		Some(expires) => println!("Expires at: {expires}"),
		None => println!("Provider did not report an expiry."),
	}

	let owner = client.fetch_resource_owner(&token).await?;

	println!("Signed in as {} ({}).", owner.username(), owner.uuid());
	println!("Skin: {}", owner.skin_url());
	println!("{}", serde_json::to_string_pretty(&owner)?);

	Ok(())
}

fn prompt(message: &str) -> Result<String> {
	loop {
		print!("{message}: ");

		io::stdout().flush()?;

		let mut input = String::new();

		io::stdin().read_line(&mut input)?;

		let trimmed = input.trim();

		if !trimmed.is_empty() {
			return Ok(trimmed.to_owned());
		}
	}
}
