//! Scriptable session transport

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::DeskError;
use crate::session::{Credentials, RegistrationProfile, Role, User, UserId};
use crate::transport::SessionTransport;
use crate::LibResult;

#[derive(Debug, Clone)]
struct Account {
    password: String,
    user: User,
}

/// Session transport backed by an in-memory account table
///
/// By default any credentials are accepted and each unknown email gets a
/// fresh account. `reject_unknown` switches to strict lookups, and
/// `fail_next` queues errors returned ahead of the normal behavior.
#[derive(Debug, Clone, Default)]
pub struct MockSessionTransport {
    latency: Duration,
    reject_unknown: bool,
    accounts: Arc<Mutex<HashMap<String, Account>>>,
    failures: Arc<Mutex<VecDeque<DeskError>>>,
    authenticate_calls: Arc<Mutex<Vec<String>>>,
    create_account_calls: Arc<Mutex<Vec<String>>>,
}

impl MockSessionTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every call by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Only accept credentials of known accounts
    pub fn reject_unknown(mut self) -> Self {
        self.reject_unknown = true;
        self
    }

    /// Seed an account
    pub fn with_account(self, user: User, password: impl Into<String>) -> Self {
        self.accounts.lock().unwrap().insert(
            user.email.clone(),
            Account {
                password: password.into(),
                user,
            },
        );
        self
    }

    /// Return `error` from the next call instead of its normal result
    pub fn fail_next(&self, error: DeskError) {
        self.failures.lock().unwrap().push_back(error);
    }

    /// Emails passed to `authenticate`, in call order
    pub fn authenticate_calls(&self) -> Vec<String> {
        self.authenticate_calls.lock().unwrap().clone()
    }

    /// Emails passed to `create_account`, in call order
    pub fn create_account_calls(&self) -> Vec<String> {
        self.create_account_calls.lock().unwrap().clone()
    }

    pub fn has_account(&self, email: &str) -> bool {
        self.accounts.lock().unwrap().contains_key(email)
    }

    fn take_failure(&self) -> Option<DeskError> {
        self.failures.lock().unwrap().pop_front()
    }
}

#[async_trait]
impl SessionTransport for MockSessionTransport {
    async fn authenticate(&self, credentials: &Credentials) -> LibResult<User> {
        self.authenticate_calls
            .lock()
            .unwrap()
            .push(credentials.email.clone());
        tokio::time::sleep(self.latency).await;

        if let Some(error) = self.take_failure() {
            return Err(error);
        }

        let known = self
            .accounts
            .lock()
            .unwrap()
            .get(&credentials.email)
            .cloned();
        match known {
            Some(account) if account.password == credentials.password => Ok(account.user),
            Some(_) => Err(DeskError::invalid_credentials()),
            None if self.reject_unknown => Err(DeskError::invalid_credentials()),
            None => Ok(User {
                id: UserId::new(),
                display_name: credentials.email.clone(),
                email: credentials.email.clone(),
                phone: None,
                role: Role::User,
            }),
        }
    }

    async fn create_account(&self, profile: &RegistrationProfile) -> LibResult<UserId> {
        self.create_account_calls
            .lock()
            .unwrap()
            .push(profile.email.clone());
        tokio::time::sleep(self.latency).await;

        if let Some(error) = self.take_failure() {
            return Err(error);
        }

        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(&profile.email) {
            return Err(DeskError::duplicate_account(&profile.email));
        }

        let id = UserId::new();
        accounts.insert(
            profile.email.clone(),
            Account {
                password: profile.password.clone(),
                user: profile.clone().into_user(id.clone()),
            },
        );
        Ok(id)
    }
}
