//! # schoolhub-client
//!
//! Everything that talks to the SchoolHub backend.
//!
//! - `gateway`: the single outbound HTTP client; attaches the bearer token
//!   and reacts to HTTP 401
//! - `api`: typed calls for authentication, dashboards, classes,
//!   announcements, and parent actions
//! - `dto`: request and response bodies
//! - `dashboard`: per-role view state with user-facing error messages
//! - `context`: wires configuration, session store, navigator, and APIs

pub mod api;
pub mod context;
pub mod dashboard;
pub mod dto;
pub mod gateway;

pub use context::ClientContext;
pub use gateway::RequestGateway;
