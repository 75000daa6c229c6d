//! Error types and codes for creditdesk

use std::fmt::Display;
use thiserror::Error;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

/// The unified error type for the creditdesk stores
#[derive(Error, Debug)]
pub enum DeskError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Configuration {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Authentication failed: {message}")]
    Authentication {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Submission rejected: {message}")]
    Submission {
        code: u16,
        message: String,
        field: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] {operation} is already in progress")]
    Busy { code: u16, operation: String },

    #[error("[E{code:04}] {operation} was cancelled")]
    Cancelled { code: u16, operation: String },

    #[error("[E{code:04}] Transport error: {message}")]
    Transport {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Storage error: {message}")]
    Storage {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl DeskError {
    /// Create a configuration error with default code
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::configuration_with_code(ErrorCode::CONFIG_GENERIC, message)
    }

    /// Create a configuration error with specific code
    pub fn configuration_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Configuration {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Error raised when a store accessor runs outside its provider scope
    pub fn out_of_scope(accessor: &str, provider: &str) -> Self {
        Self::configuration_with_code(
            ErrorCode::CONFIG_OUT_OF_SCOPE,
            format!("{} must be used within {}", accessor, provider),
        )
    }

    /// Create an authentication error for rejected credentials
    pub fn invalid_credentials() -> Self {
        Self::authentication_with_code(
            ErrorCode::SESSION_INVALID_CREDENTIALS,
            "Invalid email or password",
        )
    }

    /// Create an authentication error with specific code
    pub fn authentication_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Authentication {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create a submission error with default code
    pub fn submission(message: impl Into<String>) -> Self {
        Self::submission_with_code(ErrorCode::SUBMISSION_GENERIC, message, None)
    }

    /// Create a submission error with specific code and field
    pub fn submission_with_code(
        code: u16,
        message: impl Into<String>,
        field: Option<String>,
    ) -> Self {
        Self::Submission {
            code,
            message: message.into(),
            field,
            source: None,
        }
    }

    /// Create a submission error for an already registered email
    pub fn duplicate_account(email: &str) -> Self {
        Self::submission_with_code(
            ErrorCode::SUBMISSION_DUPLICATE_ACCOUNT,
            format!("Email already registered: {}", email),
            Some("email".to_string()),
        )
    }

    /// Create a busy error for an operation that is already running
    pub fn busy(operation: impl Into<String>) -> Self {
        Self::Busy {
            code: ErrorCode::OPERATION_IN_FLIGHT,
            operation: operation.into(),
        }
    }

    /// Create a cancellation error
    pub fn cancelled(operation: impl Into<String>) -> Self {
        Self::Cancelled {
            code: ErrorCode::OPERATION_CANCELLED,
            operation: operation.into(),
        }
    }

    /// Create a transport error with default code
    pub fn transport(message: impl Into<String>) -> Self {
        Self::transport_with_code(ErrorCode::TRANSPORT_GENERIC, message)
    }

    /// Create a transport error with specific code
    pub fn transport_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create a storage error with specific code
    pub fn storage_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Storage {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error to this error
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::Configuration { source: src, .. }
            | Self::Authentication { source: src, .. }
            | Self::Submission { source: src, .. }
            | Self::Transport { source: src, .. }
            | Self::Storage { source: src, .. } => {
                *src = Some(source.into());
            }
            Self::Busy { .. } | Self::Cancelled { .. } => {}
        }
        self
    }

    /// Add context to the error message
    pub fn with_context(mut self, context: impl Display) -> Self {
        match &mut self {
            Self::Configuration { message, .. }
            | Self::Authentication { message, .. }
            | Self::Submission { message, .. }
            | Self::Transport { message, .. }
            | Self::Storage { message, .. } => {
                *message = format!("{}: {}", message, context);
            }
            Self::Busy { operation, .. } | Self::Cancelled { operation, .. } => {
                *operation = format!("{} ({})", operation, context);
            }
        }
        self
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Configuration { code, .. }
            | Self::Authentication { code, .. }
            | Self::Submission { code, .. }
            | Self::Busy { code, .. }
            | Self::Cancelled { code, .. }
            | Self::Transport { code, .. }
            | Self::Storage { code, .. } => *code,
        }
    }

    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration { .. } => 2,
            Self::Authentication { .. } => 3,
            Self::Storage { .. } => 4,
            Self::Transport { .. } => 5,
            Self::Submission { .. } => 6,
            Self::Busy { .. } | Self::Cancelled { .. } => 7,
        }
    }

    /// Whether this error is a failed submission outcome the user should see
    pub fn is_submission_failure(&self) -> bool {
        matches!(
            self,
            Self::Authentication { .. } | Self::Submission { .. } | Self::Busy { .. }
        )
    }

    /// Get the offending field for validation failures
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Submission { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Configuration { message, .. } => format!("Configuration problem: {}", message),
            Self::Authentication { message, .. } => message.clone(),
            Self::Submission { message, field, .. } => match field {
                Some(field) => format!("Please check '{}': {}", field, message),
                None => message.clone(),
            },
            Self::Busy { operation, .. } => {
                format!("Please wait, {} is still in progress", operation)
            }
            Self::Cancelled { operation, .. } => format!("{} was cancelled", operation),
            Self::Transport { message, .. } => {
                format!("Could not reach the server: {}", message)
            }
            Self::Storage { message, .. } => format!("Local storage problem: {}", message),
        }
    }
}

#[cfg(test)]
mod tests;
