//! Session lifecycle over the file backend

mod common;

use common::TestDesk;
use creditdesk::app::DeskRuntime;
use creditdesk::session::{use_session, RegistrationProfile, RestoreOutcome, Role, SessionStore};
use creditdesk::storage::KeyValueStore;
use creditdesk::testing::MockSessionTransport;
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn test_login_round_trips_through_file() {
    let desk = TestDesk::new();

    let runtime = assert_ok!(DeskRuntime::from_config(&desk.config));
    let user = assert_ok!(runtime.session.login("a@x.com", "secret1").await);
    assert_eq!(user.id.as_str(), "1");
    assert_eq!(user.display_name, "John Doe");
    assert_eq!(user.role, Role::User);

    let raw = fs::read_to_string(desk.record_path()).unwrap();
    let on_disk: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(on_disk["displayName"], "John Doe");
    assert_eq!(on_disk["email"], "a@x.com");
    assert_eq!(on_disk["role"], "user");

    let restarted = assert_ok!(DeskRuntime::from_config(&desk.config));
    assert_eq!(
        restarted.session.restore_outcome(),
        Some(RestoreOutcome::Restored(user.clone()))
    );
    assert_eq!(restarted.session.current_user(), Some(user));
}

#[tokio::test]
async fn test_logout_then_restart_has_no_session() {
    let desk = TestDesk::new();
    let runtime = DeskRuntime::from_config(&desk.config).unwrap();
    runtime.session.login("a@x.com", "secret1").await.unwrap();

    runtime.session.logout();
    assert!(!desk.record_path().exists());

    let restarted = DeskRuntime::from_config(&desk.config).unwrap();
    assert_eq!(restarted.session.restore_outcome(), Some(RestoreOutcome::NoSession));
    assert!(restarted.session.snapshot().is_signed_out());
}

#[test]
fn test_corrupted_file_is_removed_on_start() {
    let desk = TestDesk::new();
    fs::write(desk.record_path(), "{\"id\": ").unwrap();

    let runtime = DeskRuntime::from_config(&desk.config).unwrap();

    assert!(runtime.session.restore_outcome().unwrap().was_discarded());
    assert!(runtime.session.current_user().is_none());
    assert!(!runtime.session.loading());
    assert!(!desk.record_path().exists());
}

#[test]
fn test_legacy_record_is_restored() {
    let desk = TestDesk::new();
    fs::write(
        desk.record_path(),
        r#"{"id": 1, "name": "John Doe", "email": "a@x.com", "role": "user"}"#,
    )
    .unwrap();

    let runtime = DeskRuntime::from_config(&desk.config).unwrap();
    let user = runtime.session.current_user().unwrap();
    assert_eq!(user.id.as_str(), "1");
    assert_eq!(user.display_name, "John Doe");
}

#[tokio::test]
async fn test_register_with_mock_backend_persists_profile() {
    let desk = TestDesk::new();
    let store = SessionStore::open(
        desk.backend(),
        Arc::new(MockSessionTransport::new()),
        desk.config.session.clone(),
    );

    let profile =
        RegistrationProfile::new("Ann Lee", "ann@x.com", "longpassword").with_phone("9876543210");
    let user = assert_ok!(store.register(profile).await);

    let stored = desk.backend().get("user").unwrap().unwrap();
    assert_eq!(serde_json::from_str::<creditdesk::session::User>(&stored).unwrap(), user);
    assert!(!stored.contains("longpassword"));
}

#[tokio::test(start_paused = true)]
async fn test_last_register_wins_in_storage() {
    let desk = TestDesk::new();
    let transport = MockSessionTransport::new().with_latency(Duration::from_secs(1));
    let store = Arc::new(SessionStore::open(
        desk.backend(),
        Arc::new(transport),
        desk.config.session.clone(),
    ));

    let mut handles = Vec::new();
    for (name, email) in [("Ann", "ann@x.com"), ("Bob", "bob@x.com")] {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .register(RegistrationProfile::new(name, email, "longpassword"))
                .await
        }));
    }
    let mut registered = Vec::new();
    for handle in handles {
        registered.push(assert_ok!(handle.await.unwrap()));
    }

    let bob = registered.pop().unwrap();
    assert_eq!(bob.email, "bob@x.com");
    assert_eq!(store.current_user(), Some(bob.clone()));

    let reopened = SessionStore::open(
        desk.backend(),
        Arc::new(MockSessionTransport::new()),
        desk.config.session.clone(),
    );
    assert_eq!(reopened.current_user(), Some(bob));
}

#[tokio::test]
async fn test_accessor_requires_scope() {
    let desk = TestDesk::new();
    let runtime = DeskRuntime::from_config(&desk.config).unwrap();

    assert_err!(use_session());

    let email = runtime
        .scoped(async {
            let session = use_session().unwrap();
            session.login("scoped@x.com", "secret1").await.unwrap().email
        })
        .await;
    assert_eq!(email, "scoped@x.com");
}
