//! Session management
//!
//! Tracks the authenticated user, persists it across restarts and exposes
//! login, registration and logout to the rest of the program.

mod scope;
mod state;
mod store;
pub mod validation;

pub use scope::{provide, provide_sync, use_session};
pub use state::{
    Credentials, RegistrationProfile, RestoreOutcome, Role, SessionState, User, UserId,
};
pub use store::SessionStore;
pub use validation::{validate_email, validate_profile, MIN_PASSWORD_LEN};
