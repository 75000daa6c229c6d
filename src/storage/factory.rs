//! Storage factory for creating storage instances

use std::sync::Arc;
use tracing::debug;

use super::backends::{FileBackend, MemoryBackend};
use super::config::{BackendType, StorageConfig};
use super::error::StorageResult;
use super::traits::KeyValueStore;

/// Factory for creating storage instances
pub struct StorageFactory;

impl StorageFactory {
    /// Create storage from explicit configuration
    pub fn from_config(config: &StorageConfig) -> StorageResult<Arc<dyn KeyValueStore>> {
        debug!("Creating {:?} storage backend", config.backend);
        match config.backend {
            BackendType::File => Ok(Arc::new(FileBackend::new(&config.base_dir)?)),
            BackendType::Memory => Ok(Arc::new(MemoryBackend::new())),
        }
    }
}
