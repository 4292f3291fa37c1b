//! Session persistence: the store that owns the session record and the
//! key-value substrates it can sit on.

pub mod file;
pub mod memory;
pub mod store;

use std::sync::Arc;

use schoolhub_core::config::{SessionBackend, SessionConfig};
use schoolhub_core::traits::KeyValueStore;

pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
pub use store::SessionStore;

/// Builds the substrate selected by the session configuration.
pub fn build_substrate(config: &SessionConfig) -> Arc<dyn KeyValueStore> {
    match config.backend {
        SessionBackend::Memory => Arc::new(MemoryKeyValueStore::new()),
        SessionBackend::File => Arc::new(FileKeyValueStore::new(&config.path)),
    }
}
