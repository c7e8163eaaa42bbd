//! Auth-domain identifiers, scopes, CSRF state, secrets, and access tokens.

pub mod id;
pub mod scope;
pub mod secret;
pub mod state;
pub mod token;

pub use id::*;
pub use scope::*;
pub use secret::*;
pub use state::*;
pub use token::*;
