//! The session store: who is logged in, and its persisted continuity

use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::state::{Credentials, RegistrationProfile, RestoreOutcome, SessionState, User};
use super::validation::validate_profile;
use crate::config::SessionSettings;
use crate::operation::{until_cancelled, InFlight};
use crate::storage::KeyValueStore;
use crate::transport::{SessionTransport, SimulatedSessionTransport};
use crate::LibResult;

/// Authoritative source of the current user
///
/// The store is created in a `loading` state. The restoration pass reads
/// the persisted record once and clears `loading`; after that every
/// successful login or register persists the user and every logout erases
/// the record. Persistence failures are logged and never returned.
///
/// Overlapping login/register calls are last-completion-wins. At equal
/// latency, calls made from separately spawned tasks complete in spawn
/// order, so the later task's user ends up current and persisted.
pub struct SessionStore {
    state: watch::Sender<SessionState>,
    storage: Arc<dyn KeyValueStore>,
    transport: Arc<dyn SessionTransport>,
    settings: SessionSettings,
    restored: OnceLock<RestoreOutcome>,
    write_lock: Mutex<()>,
    in_flight: InFlight,
}

impl SessionStore {
    /// Create a store without running the restoration pass
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        transport: Arc<dyn SessionTransport>,
        settings: SessionSettings,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::initial());
        Self {
            state,
            storage,
            transport,
            settings,
            restored: OnceLock::new(),
            write_lock: Mutex::new(()),
            in_flight: InFlight::default(),
        }
    }

    /// Create a store and restore the persisted session
    pub fn open(
        storage: Arc<dyn KeyValueStore>,
        transport: Arc<dyn SessionTransport>,
        settings: SessionSettings,
    ) -> Self {
        let store = Self::new(storage, transport, settings);
        store.restore_session();
        store
    }

    /// Open a store backed by the simulated transport
    pub fn simulated(storage: Arc<dyn KeyValueStore>, settings: SessionSettings) -> Self {
        let transport = Arc::new(SimulatedSessionTransport::new(settings.latency));
        Self::open(storage, transport, settings)
    }

    /// Run the restoration pass
    ///
    /// Only the first call reads storage; later calls return the recorded
    /// outcome. `loading` is cleared exactly once.
    pub fn restore_session(&self) -> RestoreOutcome {
        self.restored
            .get_or_init(|| {
                let outcome = self.read_persisted();
                self.state.send_modify(|state| {
                    if state.user.is_none() {
                        state.user = outcome.user().cloned();
                    }
                    state.loading = false;
                });
                outcome
            })
            .clone()
    }

    /// Outcome of the restoration pass, if it has run
    pub fn restore_outcome(&self) -> Option<RestoreOutcome> {
        self.restored.get().cloned()
    }

    /// Log in with email and password
    pub async fn login(&self, email: &str, password: &str) -> LibResult<User> {
        self.login_with(Credentials::new(email, password), None).await
    }

    /// Log in, abandoning the attempt without side effects if `cancel` fires
    pub async fn login_until(
        &self,
        email: &str,
        password: &str,
        cancel: &CancellationToken,
    ) -> LibResult<User> {
        self.login_with(Credentials::new(email, password), Some(cancel)).await
    }

    async fn login_with(
        &self,
        credentials: Credentials,
        cancel: Option<&CancellationToken>,
    ) -> LibResult<User> {
        let _flight = self
            .in_flight
            .enter("login", self.settings.reject_concurrent)?;

        let user = until_cancelled(
            "login",
            cancel,
            self.transport.authenticate(&credentials),
        )
        .await?;

        self.commit(&user);
        info!(user_id = %user.id, email = %user.email, "User logged in");
        Ok(user)
    }

    /// Create an account and log in as it
    pub async fn register(&self, profile: RegistrationProfile) -> LibResult<User> {
        self.register_with(profile, None).await
    }

    /// Register, abandoning the attempt without side effects if `cancel` fires
    pub async fn register_until(
        &self,
        profile: RegistrationProfile,
        cancel: &CancellationToken,
    ) -> LibResult<User> {
        self.register_with(profile, Some(cancel)).await
    }

    async fn register_with(
        &self,
        profile: RegistrationProfile,
        cancel: Option<&CancellationToken>,
    ) -> LibResult<User> {
        validate_profile(&profile)?;
        let _flight = self
            .in_flight
            .enter("register", self.settings.reject_concurrent)?;

        let id = until_cancelled(
            "register",
            cancel,
            self.transport.create_account(&profile),
        )
        .await?;

        let user = profile.into_user(id);
        self.commit(&user);
        info!(user_id = %user.id, email = %user.email, "User registered");
        Ok(user)
    }

    /// Clear the current user and erase the persisted record
    ///
    /// Idempotent. The erase is attempted on every call, even when no user
    /// is logged in.
    pub fn logout(&self) {
        let _write = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let had_user = self.state.send_if_modified(|state| state.user.take().is_some());
        if let Err(e) = self.storage.remove(&self.settings.record_key) {
            warn!(error = %e, "Failed to erase persisted session");
        }

        if had_user {
            info!("User logged out");
        } else {
            debug!("Logout requested with no active session");
        }
    }

    /// The logged-in user, if any
    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    /// Whether the restoration pass is still pending
    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().user.is_some()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receive every state change
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Number of login/register calls still waiting on the transport
    pub fn pending_operations(&self) -> usize {
        self.in_flight.pending()
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    fn commit(&self, user: &User) {
        let _write = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.persist(user);
        self.state.send_modify(|state| state.user = Some(user.clone()));
    }

    fn persist(&self, user: &User) {
        let json = match serde_json::to_string(user) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize session");
                return;
            }
        };

        if let Err(e) = self.storage.set(&self.settings.record_key, &json) {
            warn!(
                error = %e,
                backend = self.storage.backend_name(),
                "Failed to persist session"
            );
        }
    }

    fn read_persisted(&self) -> RestoreOutcome {
        let key = &self.settings.record_key;
        let raw = match self.storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No persisted session found");
                return RestoreOutcome::NoSession;
            }
            Err(e) => {
                warn!(error = %e, "Cannot read persisted session");
                return RestoreOutcome::Unreadable {
                    reason: e.to_string(),
                };
            }
        };

        match serde_json::from_str::<User>(&raw) {
            Ok(user) => {
                debug!(user_id = %user.id, "Restored persisted session");
                RestoreOutcome::Restored(user)
            }
            Err(e) => {
                warn!(error = %e, "Persisted session is corrupted, discarding it");
                if let Err(remove_err) = self.storage.remove(key) {
                    warn!(error = %remove_err, "Failed to erase corrupted session");
                }
                RestoreOutcome::Discarded {
                    reason: e.to_string(),
                }
            }
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &*self.state.borrow())
            .field("backend", &self.storage.backend_name())
            .field("settings", &self.settings)
            .finish()
    }
}
