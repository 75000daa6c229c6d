//! Error handling utilities

use std::error::Error as _;
use tracing::error;

use crate::error::DeskError;

/// Report a fatal error and exit with its status code
///
/// `DeskError`s print their user message and map to their own exit code;
/// other errors exit with 1. With `verbose >= 1` the source chain is shown.
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {}", error);

    let exit_code = if let Some(desk_err) = error.downcast_ref::<DeskError>() {
        eprintln!("{}", desk_err.user_message());

        if verbose >= 1 {
            let mut source = desk_err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
        }

        desk_err.exit_code()
    } else {
        eprintln!("Error: {error}");

        if verbose >= 1 {
            eprintln!("\nError chain:");
            for (i, cause) in error.chain().enumerate() {
                eprintln!("  {}: {}", i, cause);
            }
        }

        1
    };

    std::process::exit(exit_code)
}
