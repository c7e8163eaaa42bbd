// self
use crate::_prelude::*;

/// Provider-specific quirks that influence how requests are serialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderQuirks {
	/// Character used to join scopes when constructing `scope` parameters.
	pub scope_delimiter: char,
	/// `approval_prompt` value emitted by generic authorization requests, if any.
	pub approval_prompt: Option<ApprovalPrompt>,
}
impl Default for ProviderQuirks {
	fn default() -> Self {
		Self { scope_delimiter: ' ', approval_prompt: Some(ApprovalPrompt::Auto) }
	}
}

/// Values accepted by providers that understand `approval_prompt`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalPrompt {
	/// Only prompt when the user has not approved the client yet.
	Auto,
	/// Always show the consent screen.
	Force,
}
impl ApprovalPrompt {
	/// Returns the wire value.
	pub fn as_str(self) -> &'static str {
		match self {
			ApprovalPrompt::Auto => "auto",
			ApprovalPrompt::Force => "force",
		}
	}
}
