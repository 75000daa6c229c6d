//! Loan application state definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::{DeskError, ErrorCode};
use crate::LibResult;

/// Identifier of a submitted application, derived from the submission time
/// in milliseconds since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(i64);

impl ApplicationId {
    /// Derive an ID from a submission timestamp
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_millis())
    }

    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn as_millis(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Decision status of an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoanStatus::Pending => write!(f, "Pending"),
            LoanStatus::Approved => write!(f, "Approved"),
            LoanStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

/// Caller-supplied application fields, kept as an opaque JSON object
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoanPayload(Map<String, Value>);

impl LoanPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a payload from a JSON value, which must be an object
    pub fn from_value(value: Value) -> LibResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(DeskError::submission_with_code(
                ErrorCode::SUBMISSION_INVALID_TYPE,
                format!("Application payload must be an object, got {}", type_name(&other)),
                None,
            )),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A submitted loan application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    pub id: ApplicationId,
    #[serde(flatten)]
    pub fields: LoanPayload,
    pub status: LoanStatus,
    pub submitted_at: DateTime<Utc>,
}

impl LoanApplication {
    /// A freshly submitted application; always `Pending`
    pub(crate) fn submitted(
        id: ApplicationId,
        fields: LoanPayload,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            fields,
            status: LoanStatus::Pending,
            submitted_at,
        }
    }
}

/// Snapshot of the application store
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApplicationState {
    history: Vec<LoanApplication>,
}

impl ApplicationState {
    /// All applications in submission order
    pub fn history(&self) -> &[LoanApplication] {
        &self.history
    }

    /// The most recently appended application
    pub fn current(&self) -> Option<&LoanApplication> {
        self.history.last()
    }

    pub fn get(&self, id: ApplicationId) -> Option<&LoanApplication> {
        self.history.iter().find(|app| app.id == id)
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub(crate) fn append(&mut self, application: LoanApplication) {
        self.history.push(application);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_application_wire_shape() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let app = LoanApplication::submitted(
            ApplicationId::from_timestamp(at),
            LoanPayload::new().with("amount", 50000).with("tenureYears", 2),
            at,
        );

        let value = serde_json::to_value(&app).unwrap();
        assert_eq!(
            value,
            json!({
                "id": at.timestamp_millis(),
                "amount": 50000,
                "tenureYears": 2,
                "status": "Pending",
                "submittedAt": "2026-03-01T12:00:00Z"
            })
        );

        let back: LoanApplication = serde_json::from_value(value).unwrap();
        assert_eq!(back, app);
    }

    #[test]
    fn test_payload_must_be_object() {
        assert!(LoanPayload::from_value(json!({"amount": 1})).is_ok());
        let err = LoanPayload::from_value(json!([1, 2])).unwrap_err();
        assert_eq!(err.code(), ErrorCode::SUBMISSION_INVALID_TYPE);
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_id_is_time_derived() {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(ApplicationId::from_timestamp(at).as_millis(), at.timestamp_millis());
    }

    #[test]
    fn test_current_tracks_last_append() {
        let mut state = ApplicationState::default();
        assert!(state.current().is_none());

        let at = Utc::now();
        let first =
            LoanApplication::submitted(ApplicationId::from_millis(1), LoanPayload::new(), at);
        let second =
            LoanApplication::submitted(ApplicationId::from_millis(2), LoanPayload::new(), at);
        state.append(first.clone());
        state.append(second.clone());

        assert_eq!(state.history(), &[first.clone(), second.clone()]);
        assert_eq!(state.current(), Some(&second));
        assert_eq!(state.get(ApplicationId::from_millis(1)), Some(&first));
        assert!(state.get(ApplicationId::from_millis(3)).is_none());
    }
}
