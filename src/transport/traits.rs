//! Backend seams used by the stores
//!
//! The stores never talk to a network directly. Each async operation goes
//! through one of these traits, so an integrating application can swap the
//! simulated implementations for a real backend without changing the store
//! surfaces.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::{ApplicationId, LoanPayload};
use crate::session::{Credentials, RegistrationProfile, User, UserId};
use crate::LibResult;

/// Authentication backend
///
/// # Errors
///
/// - `DeskError::Authentication` for rejected credentials
/// - `DeskError::Submission` for invalid or duplicate profiles
/// - `DeskError::Transport` when the backend cannot be reached
#[async_trait]
pub trait SessionTransport: Send + Sync {
    /// Exchange credentials for the user they identify
    async fn authenticate(&self, credentials: &Credentials) -> LibResult<User>;

    /// Create an account and return the identity the backend assigned
    async fn create_account(&self, profile: &RegistrationProfile) -> LibResult<UserId>;
}

/// Acknowledgement of an accepted loan application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub id: ApplicationId,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionReceipt {
    /// Receipt whose ID is derived from the submission time
    pub fn at(submitted_at: DateTime<Utc>) -> Self {
        Self {
            id: ApplicationId::from_timestamp(submitted_at),
            submitted_at,
        }
    }
}

/// Loan submission backend
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    /// Submit application fields and return the receipt
    async fn submit(&self, payload: &LoanPayload) -> LibResult<SubmissionReceipt>;
}
