//! Ordered scope lists used by authorization requests and provider defaults.

// std
use std::{iter::Map as IterMap, slice::Iter};
// crates.io
use serde::{Deserializer, Serializer, de::Error as DeError, ser::SerializeSeq};
// self
use crate::_prelude::*;

/// Errors emitted when validating scopes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ScopeValidationError {
	/// Empty scope entries are not allowed.
	#[error("Scope entries cannot be empty.")]
	Empty,
	/// Scopes cannot contain embedded whitespace characters.
	#[error("Scope contains whitespace: {scope}.")]
	ContainsWhitespace {
		/// The offending scope string.
		scope: String,
	},
	/// Scopes cannot contain the delimiter used to join them.
	#[error("Scope `{scope}` contains the delimiter `{delimiter}`.")]
	ContainsDelimiter {
		/// The offending scope string.
		scope: String,
		/// Delimiter configured for the provider.
		delimiter: char,
	},
}

/// Ordered list of OAuth scopes.
///
/// Order is preserved exactly as supplied so the serialized `scope` parameter matches what the
/// caller asked for; entries are validated but never sorted or deduplicated.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ScopeList(Arc<[String]>);
impl ScopeList {
	/// Creates a validated scope list from any iterator.
	pub fn new<I, S>(scopes: I) -> Result<Self, ScopeValidationError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut values = Vec::new();

		for scope in scopes {
			let owned: String = scope.into();

			if owned.is_empty() {
				return Err(ScopeValidationError::Empty);
			}
			if owned.chars().any(char::is_whitespace) {
				return Err(ScopeValidationError::ContainsWhitespace { scope: owned });
			}

			values.push(owned);
		}

		Ok(Self(Arc::from(values)))
	}

	/// Number of scopes.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if no scopes are defined.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns true if the list contains the provided scope.
	pub fn contains(&self, scope: &str) -> bool {
		self.0.iter().any(|candidate| candidate == scope)
	}

	/// Iterator over scopes in their original order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.into_iter()
	}

	/// Joins the scopes with `delimiter`.
	pub fn join(&self, delimiter: char) -> Result<String, ScopeValidationError> {
		let mut buf = String::new();

		for (idx, value) in self.0.iter().enumerate() {
			if value.contains(delimiter) {
				return Err(ScopeValidationError::ContainsDelimiter {
					scope: value.clone(),
					delimiter,
				});
			}
			if idx > 0 {
				buf.push(delimiter);
			}

			buf.push_str(value);
		}

		Ok(buf)
	}

	/// Splits a delimited `scope` parameter back into a list, ignoring empty segments.
	pub fn parse_delimited(raw: &str, delimiter: char) -> Result<Self, ScopeValidationError> {
		Self::new(raw.split(delimiter).map(str::trim).filter(|segment| !segment.is_empty()))
	}

	/// Returns the underlying slice of scope strings.
	pub fn as_slice(&self) -> &[String] {
		&self.0
	}
}
impl Debug for ScopeList {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ScopeList").field(&self.0).finish()
	}
}

impl<'a> IntoIterator for &'a ScopeList {
	type IntoIter = IterMap<Iter<'a, String>, fn(&'a String) -> &'a str>;
	type Item = &'a str;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter().map(String::as_str as fn(&'a String) -> &'a str)
	}
}
impl TryFrom<Vec<String>> for ScopeList {
	type Error = ScopeValidationError;

	fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl TryFrom<&[&str]> for ScopeList {
	type Error = ScopeValidationError;

	fn try_from(value: &[&str]) -> Result<Self, Self::Error> {
		Self::new(value.iter().copied())
	}
}
impl Serialize for ScopeList {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut seq = serializer.serialize_seq(Some(self.0.len()))?;

		for scope in self.0.iter() {
			seq.serialize_element(scope)?;
		}

		seq.end()
	}
}
impl<'de> Deserialize<'de> for ScopeList {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let values = <Vec<String>>::deserialize(deserializer)?;

		ScopeList::new(values).map_err(DeError::custom)
	}
}
