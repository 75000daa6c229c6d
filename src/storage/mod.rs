//! Durable key-value persistence for creditdesk
//!
//! The session store keeps its single persisted record behind the
//! [`KeyValueStore`] trait so the file backend can be swapped for the
//! in-memory one in tests.

pub mod backends;
pub mod config;
pub mod error;
pub mod factory;
pub mod traits;

pub use backends::{FileBackend, MemoryBackend};
pub use config::{BackendType, StorageConfig};
pub use error::{StorageError, StorageResult};
pub use factory::StorageFactory;
pub use traits::KeyValueStore;
