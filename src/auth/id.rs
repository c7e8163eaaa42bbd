//! Validated identifiers for provider descriptors and registered OAuth clients.
//!
//! Client identifiers end up as a path segment of the Ely.by authorization URL, so both kinds
//! are restricted to printable ASCII without URL delimiters.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

const MAX_LEN: usize = 128;
const URL_DELIMITERS: &[char] = &['/', '?', '#', '%'];

/// Rejection reasons for provider and client identifiers.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum IdentifierError {
	/// Nothing was supplied.
	#[error("{kind} identifier is empty.")]
	Empty {
		/// `Provider` or `Client`.
		kind: &'static str,
	},
	/// A character outside printable ASCII, or a URL delimiter, was found.
	#[error("{kind} identifier contains forbidden character {found:?}.")]
	ForbiddenChar {
		/// `Provider` or `Client`.
		kind: &'static str,
		/// First offending character.
		found: char,
	},
	/// Longer than the permitted byte length.
	#[error("{kind} identifier is {len} bytes long; the limit is {max}.")]
	TooLong {
		/// `Provider` or `Client`.
		kind: &'static str,
		/// Supplied length.
		len: usize,
		/// Upper bound, inclusive.
		max: usize,
	},
}

macro_rules! identifier {
	($(#[$meta:meta])* $name:ident => $kind:literal) => {
		$(#[$meta])*
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Validates `value` and wraps it.
			pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
				let value = value.into();

				check($kind, &value)?;

				Ok(Self(value))
			}

			/// Borrows the identifier as a string slice.
			pub fn as_str(&self) -> &str {
				&self.0
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &str {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, IdentifierError> {
				Self::new(value)
			}
		}
		impl From<$name> for String {
			fn from(id: $name) -> Self {
				id.0
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, IdentifierError> {
				Self::new(s)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.debug_tuple(stringify!($name)).field(&self.0).finish()
			}
		}
	};
}

identifier! {
	/// Name of a provider descriptor, such as `ely`.
	ProviderId => "Provider"
}
identifier! {
	/// Client identifier issued by the provider when the application was registered.
	ClientId => "Client"
}

fn check(kind: &'static str, value: &str) -> Result<(), IdentifierError> {
	if value.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if value.len() > MAX_LEN {
		return Err(IdentifierError::TooLong { kind, len: value.len(), max: MAX_LEN });
	}
	if let Some(found) =
		value.chars().find(|c| !c.is_ascii_graphic() || URL_DELIMITERS.contains(c))
	{
		return Err(IdentifierError::ForbiddenChar { kind, found });
	}

	Ok(())
}
