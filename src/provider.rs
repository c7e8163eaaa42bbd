//! Provider-facing descriptors (data) and strategies (behavior).
//!
//! `descriptor` exposes validated metadata (`ProviderDescriptor`): endpoints, default scopes,
//! client authentication preference, and serialization quirks such as the scope delimiter.
//! `strategy` defines [`ProviderStrategy`], the hook flows use to shape authorization URLs and
//! classify responses. `ely` binds both to the Ely.by account service.

pub mod descriptor;
pub mod ely;
pub mod strategy;

pub use descriptor::*;
pub use strategy::*;
