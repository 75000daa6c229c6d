//! Scriptable submission transport

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::application::LoanPayload;
use crate::error::DeskError;
use crate::transport::{SubmissionReceipt, SubmissionTransport};
use crate::LibResult;

/// Submission transport with a controllable clock
///
/// Receipts are stamped from a fixed start time that advances by one
/// millisecond per accepted submission, so IDs are predictable.
#[derive(Debug, Clone)]
pub struct MockSubmissionTransport {
    latency: Duration,
    clock: Arc<Mutex<DateTime<Utc>>>,
    failures: Arc<Mutex<VecDeque<DeskError>>>,
    submitted: Arc<Mutex<Vec<LoanPayload>>>,
}

impl Default for MockSubmissionTransport {
    fn default() -> Self {
        Self::starting_at(Utc::now())
    }
}

impl MockSubmissionTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp the first receipt with `start`
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            latency: Duration::ZERO,
            clock: Arc::new(Mutex::new(start)),
            failures: Arc::new(Mutex::new(VecDeque::new())),
            submitted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Return `error` from the next submission
    pub fn fail_next(&self, error: DeskError) {
        self.failures.lock().unwrap().push_back(error);
    }

    /// Payloads accepted so far
    pub fn submitted(&self) -> Vec<LoanPayload> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionTransport for MockSubmissionTransport {
    async fn submit(&self, payload: &LoanPayload) -> LibResult<SubmissionReceipt> {
        tokio::time::sleep(self.latency).await;

        if let Some(error) = self.failures.lock().unwrap().pop_front() {
            return Err(error);
        }

        let mut clock = self.clock.lock().unwrap();
        let receipt = SubmissionReceipt::at(*clock);
        *clock += ChronoDuration::milliseconds(1);
        self.submitted.lock().unwrap().push(payload.clone());
        Ok(receipt)
    }
}
