//! # schoolhub-auth
//!
//! Client-side authentication state for SchoolHub.
//!
//! ## Modules
//!
//! - `claims`: reading the claims payload out of a bearer token
//! - `session`: the session store and its key-value substrates
//! - `guard`: the static route table, the route guard, and the navigator
//!
//! Nothing here verifies a token. Claims drive personalization and
//! navigation convenience only; the backend enforces access control.

pub mod claims;
pub mod guard;
pub mod session;

pub use claims::TokenClaims;
pub use guard::{
    Location, Navigation, NavigationDecision, Navigator, RouteDescriptor, RouteGuard, RouteTable,
};
pub use session::{FileKeyValueStore, MemoryKeyValueStore, SessionStore};
