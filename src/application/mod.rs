//! Loan application management
//!
//! Submits applications through a transport and keeps the history of
//! everything submitted during the current run.

mod scope;
mod state;
mod store;
pub mod validation;

pub use scope::{provide, provide_sync, use_applications};
pub use state::{ApplicationId, ApplicationState, LoanApplication, LoanPayload, LoanStatus};
pub use store::ApplicationStore;
pub use validation::{validate_payload, RESERVED_KEYS};
