//! Shared domain types.

pub mod role;
pub mod session;

pub use role::Role;
pub use session::{ClearReason, Session, SessionEvent};
