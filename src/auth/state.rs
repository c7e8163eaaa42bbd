//! CSRF state generation for authorization redirects.

// crates.io
use rand::{Rng, distr::Alphanumeric};

/// Number of characters in a generated state token.
pub const STATE_LEN: usize = 32;

/// Generates an unpredictable alphanumeric state token.
///
/// Draws from the thread-local CSPRNG; an entropy failure aborts the process rather than
/// surfacing as an error.
pub fn generate_state() -> String {
	rand::rng().sample_iter(Alphanumeric).take(STATE_LEN).map(char::from).collect()
}
