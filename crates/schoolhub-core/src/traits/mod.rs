//! Core traits defined in `schoolhub-core` and implemented by other crates.

pub mod key_value;
pub mod session;

pub use key_value::KeyValueStore;
pub use session::SessionProvider;
