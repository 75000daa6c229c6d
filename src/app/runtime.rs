//! Runtime initialization and setup
//!
//! Loads configuration, opens storage and constructs the two stores once
//! for the lifetime of the process.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::app::{config::AppConfig, logging::init_logging};
use crate::application::ApplicationStore;
use crate::config::DeskConfig;
use crate::session::{RestoreOutcome, SessionStore};
use crate::storage::StorageFactory;
use crate::LibResult;

/// The stores shared by every command of one run
#[derive(Debug, Clone)]
pub struct DeskRuntime {
    pub session: Arc<SessionStore>,
    pub applications: Arc<ApplicationStore>,
}

impl DeskRuntime {
    /// Build both stores from a loaded configuration
    pub fn from_config(config: &DeskConfig) -> LibResult<Self> {
        let storage = StorageFactory::from_config(&config.storage)?;
        debug!(backend = storage.backend_name(), "Storage opened");

        let session = SessionStore::simulated(storage, config.session.clone());
        match session.restore_outcome() {
            Some(RestoreOutcome::Discarded { reason }) => {
                warn!(%reason, "Started without a session; the stored one was unusable")
            }
            Some(RestoreOutcome::Unreadable { reason }) => {
                warn!(%reason, "Started without a session; storage could not be read")
            }
            _ => {}
        }

        let applications = ApplicationStore::simulated(config.applications.clone());

        Ok(Self {
            session: Arc::new(session),
            applications: Arc::new(applications),
        })
    }

    /// Run `future` with both stores in scope
    pub async fn scoped<F>(&self, future: F) -> F::Output
    where
        F: std::future::Future,
    {
        crate::session::provide(
            self.session.clone(),
            crate::application::provide(self.applications.clone(), future),
        )
        .await
    }
}

/// Initialize logging, load configuration and construct the stores
pub fn initialize_app(config: &AppConfig) -> LibResult<DeskRuntime> {
    init_logging(config);

    let desk_config = DeskConfig::load(config.config_path.as_deref())?;
    debug!(?desk_config, "Configuration loaded");

    DeskRuntime::from_config(&desk_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageConfig;
    use std::time::Duration;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> DeskConfig {
        let mut config = DeskConfig {
            storage: StorageConfig::file(dir.path()),
            ..DeskConfig::default()
        };
        config.session.latency = Duration::ZERO;
        config.applications.latency = Duration::ZERO;
        config
    }

    #[tokio::test]
    async fn test_runtime_restores_between_runs() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let first = DeskRuntime::from_config(&config).unwrap();
        let user = first.session.login("a@x.com", "secret1").await.unwrap();

        let second = DeskRuntime::from_config(&config).unwrap();
        assert_eq!(second.session.current_user(), Some(user));
        assert!(second.applications.is_empty());
    }

    #[tokio::test]
    async fn test_scoped_exposes_both_stores() {
        let dir = TempDir::new().unwrap();
        let runtime = DeskRuntime::from_config(&config_in(&dir)).unwrap();

        let (session_ok, applications_ok) = runtime
            .scoped(async {
                (
                    crate::session::use_session().is_ok(),
                    crate::application::use_applications().is_ok(),
                )
            })
            .await;

        assert!(session_ok && applications_ok);
    }
}
