//! Outbound request gateway.

pub mod client;
pub mod policy;

pub use client::RequestGateway;
pub use policy::AuthPolicy;
