//! Fixed-latency stand-ins for a real backend

use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use tracing::debug;

use super::traits::{SessionTransport, SubmissionReceipt, SubmissionTransport};
use crate::application::LoanPayload;
use crate::session::{Credentials, RegistrationProfile, Role, User, UserId};
use crate::LibResult;

/// Identity handed out by the simulated session backend
pub const SIMULATED_USER_ID: &str = "1";

/// Display name of the account the simulated login resolves to
pub const SIMULATED_DISPLAY_NAME: &str = "John Doe";

/// Session backend that always succeeds after a fixed delay
#[derive(Debug, Clone)]
pub struct SimulatedSessionTransport {
    latency: Duration,
}

impl SimulatedSessionTransport {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

#[async_trait]
impl SessionTransport for SimulatedSessionTransport {
    async fn authenticate(&self, credentials: &Credentials) -> LibResult<User> {
        tokio::time::sleep(self.latency).await;
        debug!(email = %credentials.email, "Simulated login accepted");
        Ok(User {
            id: UserId::from_string(SIMULATED_USER_ID),
            display_name: SIMULATED_DISPLAY_NAME.to_string(),
            email: credentials.email.clone(),
            phone: None,
            role: Role::User,
        })
    }

    async fn create_account(&self, profile: &RegistrationProfile) -> LibResult<UserId> {
        tokio::time::sleep(self.latency).await;
        debug!(email = %profile.email, "Simulated account created");
        Ok(UserId::from_string(SIMULATED_USER_ID))
    }
}

/// Submission backend that always accepts after a fixed delay
#[derive(Debug, Clone)]
pub struct SimulatedSubmissionTransport {
    latency: Duration,
}

impl SimulatedSubmissionTransport {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

#[async_trait]
impl SubmissionTransport for SimulatedSubmissionTransport {
    async fn submit(&self, payload: &LoanPayload) -> LibResult<SubmissionReceipt> {
        tokio::time::sleep(self.latency).await;
        let receipt = SubmissionReceipt::at(Utc::now());
        debug!(id = %receipt.id, fields = payload.len(), "Simulated submission accepted");
        Ok(receipt)
    }
}
