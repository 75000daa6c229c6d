//! Mock transports for testing

pub mod session;
pub mod submission;

pub use session::MockSessionTransport;
pub use submission::MockSubmissionTransport;
