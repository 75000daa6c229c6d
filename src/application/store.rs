//! The application store: in-memory history of submitted loan applications

use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::state::{ApplicationId, ApplicationState, LoanApplication, LoanPayload};
use super::validation::validate_payload;
use crate::config::ApplicationSettings;
use crate::operation::{until_cancelled, InFlight};
use crate::transport::{SimulatedSubmissionTransport, SubmissionTransport};
use crate::LibResult;

/// Append-only history of submitted applications
///
/// Nothing here is persisted; the history starts empty each run.
/// Submissions land in completion order. At equal latency, calls made from
/// separately spawned tasks complete in spawn order; futures polled
/// together by `join!` follow that macro's polling order instead.
pub struct ApplicationStore {
    state: watch::Sender<ApplicationState>,
    transport: Arc<dyn SubmissionTransport>,
    settings: ApplicationSettings,
    in_flight: InFlight,
}

impl ApplicationStore {
    pub fn new(transport: Arc<dyn SubmissionTransport>, settings: ApplicationSettings) -> Self {
        let (state, _) = watch::channel(ApplicationState::default());
        Self {
            state,
            transport,
            settings,
            in_flight: InFlight::default(),
        }
    }

    /// Store backed by the simulated submission transport
    pub fn simulated(settings: ApplicationSettings) -> Self {
        let transport = Arc::new(SimulatedSubmissionTransport::new(settings.latency));
        Self::new(transport, settings)
    }

    /// Submit a loan application
    ///
    /// On success the application is appended to the history as `Pending`
    /// and becomes the current one.
    pub async fn apply_for_loan(&self, payload: LoanPayload) -> LibResult<LoanApplication> {
        self.apply_with(payload, None).await
    }

    /// Submit, abandoning the attempt without side effects if `cancel` fires
    pub async fn apply_for_loan_until(
        &self,
        payload: LoanPayload,
        cancel: &CancellationToken,
    ) -> LibResult<LoanApplication> {
        self.apply_with(payload, Some(cancel)).await
    }

    async fn apply_with(
        &self,
        payload: LoanPayload,
        cancel: Option<&CancellationToken>,
    ) -> LibResult<LoanApplication> {
        validate_payload(&payload)?;
        let _flight = self
            .in_flight
            .enter("apply_for_loan", self.settings.reject_concurrent)?;

        let receipt = until_cancelled("apply_for_loan", cancel, self.transport.submit(&payload))
            .await?;

        let application = LoanApplication::submitted(receipt.id, payload, receipt.submitted_at);
        self.state.send_modify(|state| state.append(application.clone()));

        info!(
            id = %application.id,
            status = %application.status,
            "Loan application submitted"
        );
        debug!(history = self.len(), "Application history updated");
        Ok(application)
    }

    /// All applications in submission order
    pub fn history(&self) -> Vec<LoanApplication> {
        self.state.borrow().history().to_vec()
    }

    /// The most recently submitted application
    pub fn current(&self) -> Option<LoanApplication> {
        self.state.borrow().current().cloned()
    }

    pub fn get(&self, id: ApplicationId) -> Option<LoanApplication> {
        self.state.borrow().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().is_empty()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> ApplicationState {
        self.state.borrow().clone()
    }

    /// Receive every state change
    pub fn subscribe(&self) -> watch::Receiver<ApplicationState> {
        self.state.subscribe()
    }

    /// Number of submissions still waiting on the transport
    pub fn pending_operations(&self) -> usize {
        self.in_flight.pending()
    }

    pub fn settings(&self) -> &ApplicationSettings {
        &self.settings
    }
}

impl std::fmt::Debug for ApplicationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationStore")
            .field("applications", &self.len())
            .field("settings", &self.settings)
            .finish()
    }
}
