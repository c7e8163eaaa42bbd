//! Access tokens returned by the token endpoint.

// self
use crate::{_prelude::*, auth::Secret, error::DecodeError};

/// `expires` values above this many seconds are absolute Unix timestamps; smaller values are
/// relative to the issue instant.
const ABSOLUTE_EXPIRY_THRESHOLD: i64 = 10 * 365 * 24 * 60 * 60;

/// Expiry status of an access token at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenStatus {
	/// Token has an expiry in the future.
	Active,
	/// Token reached its expiry instant.
	Expired,
	/// Provider did not report an expiry.
	Unknown,
}

/// Immutable access token decoded from a successful token exchange.
///
/// Recognized fields (`access_token`, `expires_in`, `expires`, `refresh_token`, `token_type`,
/// `resource_owner_id`) are typed; every other field is preserved verbatim in
/// [`values`](Self::values).
#[derive(Clone)]
pub struct AccessToken {
	access_token: Secret,
	refresh_token: Option<Secret>,
	token_type: Option<String>,
	resource_owner_id: Option<Value>,
	issued_at: OffsetDateTime,
	expires_at: Option<OffsetDateTime>,
	values: Map<String, Value>,
}
impl AccessToken {
	/// Wraps a previously obtained access token string without expiry metadata.
	pub fn new(access_token: impl Into<String>) -> Self {
		Self {
			access_token: Secret::new(access_token),
			refresh_token: None,
			token_type: None,
			resource_owner_id: None,
			issued_at: OffsetDateTime::now_utc(),
			expires_at: None,
			values: Map::new(),
		}
	}

	/// Decodes a token endpoint payload; relative expiries are anchored at `issued_at`.
	pub fn from_response(
		payload: Map<String, Value>,
		issued_at: OffsetDateTime,
	) -> Result<Self, DecodeError> {
		let fields: TokenFields = serde_path_to_error::deserialize(Value::Object(payload))
			.map_err(|source| DecodeError::Payload { endpoint: "token", source })?;
		let expires_at = resolve_expiry(fields.expires_in, fields.expires, issued_at)?;

		Ok(Self {
			access_token: Secret::new(fields.access_token),
			refresh_token: fields.refresh_token.map(Secret::new),
			token_type: fields.token_type,
			resource_owner_id: fields.resource_owner_id,
			issued_at,
			expires_at,
			values: fields.values,
		})
	}

	/// Access token value. Callers must avoid logging this string.
	pub fn token(&self) -> &str {
		self.access_token.expose()
	}

	/// Access token as a redacting [`Secret`].
	pub fn secret(&self) -> &Secret {
		&self.access_token
	}

	/// Refresh token, when the provider issued one.
	pub fn refresh_token(&self) -> Option<&Secret> {
		self.refresh_token.as_ref()
	}

	/// Token type reported by the provider (`bearer` for Ely.by).
	pub fn token_type(&self) -> Option<&str> {
		self.token_type.as_deref()
	}

	/// Resource owner identifier, when the provider includes one in the token response.
	pub fn resource_owner_id(&self) -> Option<&Value> {
		self.resource_owner_id.as_ref()
	}

	/// Instant the token response was received.
	pub fn issued_at(&self) -> OffsetDateTime {
		self.issued_at
	}

	/// Absolute expiry, or `None` when the provider did not report one.
	pub fn expires(&self) -> Option<OffsetDateTime> {
		self.expires_at
	}

	/// Additional fields returned by the provider.
	pub fn values(&self) -> &Map<String, Value> {
		&self.values
	}

	/// Computes the expiry status at `instant`.
	pub fn status_at(&self, instant: OffsetDateTime) -> TokenStatus {
		match self.expires_at {
			Some(expires_at) if instant >= expires_at => TokenStatus::Expired,
			Some(_) => TokenStatus::Active,
			None => TokenStatus::Unknown,
		}
	}

	/// Computes the expiry status using the current UTC instant.
	pub fn status(&self) -> TokenStatus {
		self.status_at(OffsetDateTime::now_utc())
	}

	/// Returns `true` only when a known expiry has passed.
	pub fn has_expired(&self) -> bool {
		matches!(self.status(), TokenStatus::Expired)
	}

	/// Value for the `Authorization` header of authenticated requests.
	pub fn bearer_header(&self) -> String {
		format!("Bearer {}", self.access_token.expose())
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("access_token", &"<redacted>")
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("token_type", &self.token_type)
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.field("values", &self.values)
			.finish()
	}
}

#[derive(Deserialize)]
struct TokenFields {
	access_token: String,
	#[serde(default)]
	expires_in: Option<Seconds>,
	#[serde(default)]
	expires: Option<Seconds>,
	#[serde(default)]
	refresh_token: Option<String>,
	#[serde(default)]
	token_type: Option<String>,
	#[serde(default)]
	resource_owner_id: Option<Value>,
	#[serde(flatten)]
	values: Map<String, Value>,
}

/// Seconds encoded either as a JSON integer or as a numeric string (form-encoded bodies).
#[derive(Deserialize)]
#[serde(untagged)]
enum Seconds {
	Whole(i64),
	Text(String),
}
impl Seconds {
	fn into_seconds(self, field: &'static str) -> Result<i64, DecodeError> {
		match self {
			Self::Whole(value) => Ok(value),
			Self::Text(text) => text
				.trim()
				.parse()
				.map_err(|_| DecodeError::InvalidSeconds { field, value: text }),
		}
	}
}

fn resolve_expiry(
	expires_in: Option<Seconds>,
	expires: Option<Seconds>,
	issued_at: OffsetDateTime,
) -> Result<Option<OffsetDateTime>, DecodeError> {
	if let Some(raw) = expires_in {
		let secs = raw.into_seconds("expires_in")?;

		if secs == 0 {
			return Ok(None);
		}

		return issued_at
			.checked_add(Duration::seconds(secs))
			.map(Some)
			.ok_or(DecodeError::ExpiryOutOfRange { field: "expires_in" });
	}

	let Some(raw) = expires else {
		return Ok(None);
	};
	let secs = raw.into_seconds("expires")?;

	if secs == 0 {
		return Ok(None);
	}
	if secs > ABSOLUTE_EXPIRY_THRESHOLD {
		return OffsetDateTime::from_unix_timestamp(secs)
			.map(Some)
			.map_err(|_| DecodeError::ExpiryOutOfRange { field: "expires" });
	}

	issued_at
		.checked_add(Duration::seconds(secs))
		.map(Some)
		.ok_or(DecodeError::ExpiryOutOfRange { field: "expires" })
}
