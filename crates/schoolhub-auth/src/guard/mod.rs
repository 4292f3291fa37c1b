//! Navigation guarding: the route table, the per-navigation guard, and the
//! navigator that follows its redirects.

pub mod enforcer;
pub mod navigator;
pub mod routes;

pub use enforcer::{GuardState, NavigationDecision, RouteGuard};
pub use navigator::{Location, Navigation, Navigator};
pub use routes::{LOGIN_PATH, RouteDescriptor, RouteMatch, RouteTable};
