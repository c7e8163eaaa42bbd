//! Redirect callback parsing.

// self
use crate::_prelude::*;

/// Parameters delivered to the redirect URI after the user answers the consent screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationCallback {
	/// Authorization code for [`Client::exchange_code`](crate::flows::Client::exchange_code).
	pub code: String,
	/// State echoed back by the provider, if any.
	pub state: Option<String>,
}
impl AuthorizationCallback {
	/// Extracts `code` and `state` from the redirect URL.
	///
	/// A provider `error` parameter (for example `access_denied`) or a missing `code` is
	/// reported as [`Error::AuthorizationDenied`].
	pub fn from_url(url: &Url) -> Result<Self> {
		let mut code = None;
		let mut state = None;
		let mut error = None;
		let mut description = None;

		for (key, value) in url.query_pairs() {
			match key.as_ref() {
				"code" => code = Some(value.into_owned()),
				"state" => state = Some(value.into_owned()),
				"error" => error = Some(value.into_owned()),
				"error_description" => description = Some(value.into_owned()),
				_ => {},
			}
		}

		if let Some(error) = error {
			return Err(Error::AuthorizationDenied { error, description });
		}

		let code = code.filter(|code| !code.is_empty()).ok_or_else(|| {
			Error::AuthorizationDenied {
				error: "missing_code".into(),
				description: Some("The callback did not carry an authorization code.".into()),
			}
		})?;

		Ok(Self { code, state })
	}

	/// Checks the echoed state against the one issued with the authorization URL.
	///
	/// A callback without `state` never validates.
	pub fn validate_state(&self, expected: &str) -> Result<()> {
		match self.state.as_deref() {
			Some(received) if received == expected => Ok(()),
			received => Err(Error::StateMismatch {
				expected: expected.to_owned(),
				received: received.unwrap_or_default().to_owned(),
			}),
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url(raw: &str) -> Url {
		Url::parse(raw).expect("Callback fixture should parse.")
	}

	#[test]
	fn parses_code_and_state() {
		let callback =
			AuthorizationCallback::from_url(&url("https://app.example.com/cb?code=abc123&state=s1"))
				.expect("Callback should parse.");

		assert_eq!(callback.code, "abc123");
		assert_eq!(callback.state.as_deref(), Some("s1"));
		callback.validate_state("s1").expect("Matching state should validate.");
		assert!(matches!(callback.validate_state("s2"), Err(Error::StateMismatch { .. })));
	}

	#[test]
	fn provider_errors_are_denials() {
		let err = AuthorizationCallback::from_url(&url(concat!(
			"https://app.example.com/cb",
			"?error=access_denied&error_description=User%20declined&state=s1",
		)))
		.expect_err("Denied callbacks must fail.");

		match err {
			Error::AuthorizationDenied { error, description } => {
				assert_eq!(error, "access_denied");
				assert_eq!(description.as_deref(), Some("User declined"));
			},
			other => panic!("Unexpected error: {other:?}"),
		}
	}

	#[test]
	fn missing_code_or_state_is_rejected() {
		let err = AuthorizationCallback::from_url(&url("https://app.example.com/cb?state=s1"))
			.expect_err("Callback without code must fail.");

		assert!(matches!(
			err,
			Error::AuthorizationDenied { ref error, .. } if error == "missing_code"
		));

		let callback = AuthorizationCallback::from_url(&url("https://app.example.com/cb?code=abc"))
			.expect("Callback should parse.");

		match callback.validate_state("s1") {
			Err(Error::StateMismatch { expected, received }) => {
				assert_eq!(expected, "s1");
				assert!(received.is_empty());
			},
			other => panic!("Unexpected result: {other:?}"),
		}
	}
}
