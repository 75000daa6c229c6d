//! Backend transport abstraction for the stores

mod simulated;
mod traits;

pub use simulated::{
    SimulatedSessionTransport, SimulatedSubmissionTransport, SIMULATED_DISPLAY_NAME,
    SIMULATED_USER_ID,
};
pub use traits::{SessionTransport, SubmissionReceipt, SubmissionTransport};
