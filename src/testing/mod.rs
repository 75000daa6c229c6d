//! Testing utilities and fixtures
//!
//! Mock transports plus helpers that assemble stores over in-memory or
//! temporary-directory storage.

pub mod mocks;

pub use mocks::{MockSessionTransport, MockSubmissionTransport};

use std::sync::Arc;
use std::time::Duration;

use crate::application::ApplicationStore;
use crate::config::{ApplicationSettings, SessionSettings};
use crate::session::{Role, SessionStore, User, UserId};
use crate::storage::{KeyValueStore, MemoryBackend};

/// Session settings with no latency
pub fn instant_session_settings() -> SessionSettings {
    SessionSettings {
        latency: Duration::ZERO,
        ..SessionSettings::default()
    }
}

/// Application settings with no latency
pub fn instant_application_settings() -> ApplicationSettings {
    ApplicationSettings {
        latency: Duration::ZERO,
        ..ApplicationSettings::default()
    }
}

/// A plain user for fixtures
pub fn sample_user(id: &str, email: &str) -> User {
    User {
        id: UserId::from_string(id),
        display_name: "Test User".to_string(),
        email: email.to_string(),
        phone: None,
        role: Role::User,
    }
}

/// Session store over fresh in-memory storage and the given transport
pub fn memory_session_store(
    transport: MockSessionTransport,
) -> (SessionStore, Arc<MemoryBackend>) {
    let storage = Arc::new(MemoryBackend::new());
    let store = SessionStore::open(
        storage.clone() as Arc<dyn KeyValueStore>,
        Arc::new(transport),
        instant_session_settings(),
    );
    (store, storage)
}

/// Application store over the given transport
pub fn mock_application_store(transport: MockSubmissionTransport) -> ApplicationStore {
    ApplicationStore::new(Arc::new(transport), instant_application_settings())
}
