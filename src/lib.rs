//! # creditdesk
//!
//! Session and loan-application state for a credit desk client.
//!
//! ## Modules
//!
//! - `session` - Current user, login/register/logout and persisted continuity
//! - `application` - Loan application submission and history
//! - `transport` - Backend seams and their simulated implementations
//! - `storage` - Key-value persistence backends (file, memory)
//! - `config` - Store configuration from TOML and environment
//! - `error` - Error types and codes
//! - `app` - CLI runtime: logging, configuration, store construction
//! - `testing` - Mock transports and fixtures
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use creditdesk::config::DeskConfig;
//! use creditdesk::session::SessionStore;
//! use creditdesk::storage::MemoryBackend;
//!
//! # async fn demo() -> creditdesk::LibResult<()> {
//! let config = DeskConfig::default();
//! let session = SessionStore::simulated(Arc::new(MemoryBackend::new()), config.session);
//! let user = session.login("a@x.com", "secret1").await?;
//! assert_eq!(session.current_user(), Some(user));
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod application;
pub mod config;
pub mod error;
pub mod session;
pub mod storage;
pub mod transport;

pub mod testing;

mod operation;

pub use error::{DeskError, ErrorCode};

/// Result type used throughout the library
pub type LibResult<T> = std::result::Result<T, DeskError>;
