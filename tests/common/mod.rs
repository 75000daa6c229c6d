//! Common test utilities and helpers

#![allow(dead_code)]

use creditdesk::config::DeskConfig;
use creditdesk::storage::{FileBackend, StorageConfig};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Configuration over a temporary directory with no simulated latency
pub struct TestDesk {
    pub temp_dir: TempDir,
    pub config: DeskConfig,
}

impl TestDesk {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let mut config = DeskConfig {
            storage: StorageConfig::file(temp_dir.path()),
            ..DeskConfig::default()
        };
        config.session.latency = Duration::ZERO;
        config.applications.latency = Duration::ZERO;
        Self { temp_dir, config }
    }

    /// File backend over the same directory the config points at
    pub fn backend(&self) -> Arc<FileBackend> {
        Arc::new(FileBackend::new(self.temp_dir.path()).expect("open file backend"))
    }

    /// Path of the persisted user record
    pub fn record_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("user.json")
    }
}
