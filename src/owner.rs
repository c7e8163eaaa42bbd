//! Typed view over the Ely.by account profile.

// crates.io
use serde::Serializer;
// self
use crate::{_prelude::*, error::DecodeError, provider::ely::SKIN_URL_BASE};

/// Key under which [`ResourceOwner::to_map`] exposes the derived skin URL.
pub const SKIN_URL_KEY: &str = "skinUrl";

/// Read-only profile of the authenticated Ely.by account.
///
/// The raw response mapping is owned by the value and returned verbatim by
/// [`raw`](Self::raw); the typed accessors are decoded from it once, at construction.
#[derive(Clone, Debug)]
pub struct ResourceOwner {
	fields: ProfileFields,
	raw: Map<String, Value>,
}
impl ResourceOwner {
	/// Decodes a profile mapping. Every field except `email` is required.
	pub fn from_map(raw: Map<String, Value>) -> Result<Self, DecodeError> {
		let fields = serde_path_to_error::deserialize(Value::Object(raw.clone()))
			.map_err(|source| DecodeError::Payload { endpoint: "resource_owner", source })?;

		Ok(Self { fields, raw })
	}

	/// Numeric account identifier.
	pub fn id(&self) -> u64 {
		self.fields.id
	}

	/// Account UUID.
	pub fn uuid(&self) -> &str {
		&self.fields.uuid
	}

	/// Current username.
	pub fn username(&self) -> &str {
		&self.fields.username
	}

	/// Confirmed e-mail address; only present when the token carries `account_email`.
	pub fn email(&self) -> Option<&str> {
		self.fields.email.as_deref()
	}

	/// Registration instant.
	pub fn registered_at(&self) -> OffsetDateTime {
		self.fields.registered_at
	}

	/// Link to the public Ely.by profile page.
	pub fn profile_link(&self) -> &str {
		&self.fields.profile_link
	}

	/// Preferred interface language (ISO 639-1).
	pub fn preferred_language(&self) -> &str {
		&self.fields.preferred_language
	}

	/// Skin URL derived from the username.
	///
	/// The URL points at the skin system, which may redirect, so it is not necessarily the
	/// texture file itself. A `skinUrl` key in the raw response is ignored.
	pub fn skin_url(&self) -> String {
		format!("{SKIN_URL_BASE}/{}.png", self.fields.username)
	}

	/// Raw profile response.
	pub fn raw(&self) -> &Map<String, Value> {
		&self.raw
	}

	/// Raw fields merged with the derived skin URL.
	pub fn to_map(&self) -> Map<String, Value> {
		let mut map = self.raw.clone();

		map.insert(SKIN_URL_KEY.into(), Value::String(self.skin_url()));

		map
	}
}
impl Serialize for ResourceOwner {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		self.to_map().serialize(serializer)
	}
}
impl TryFrom<Map<String, Value>> for ResourceOwner {
	type Error = DecodeError;

	fn try_from(raw: Map<String, Value>) -> Result<Self, Self::Error> {
		Self::from_map(raw)
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileFields {
	id: u64,
	uuid: String,
	username: String,
	#[serde(default)]
	email: Option<String>,
	#[serde(with = "time::serde::timestamp")]
	registered_at: OffsetDateTime,
	profile_link: String,
	preferred_language: String,
}
