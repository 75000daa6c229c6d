use super::*;
use crate::storage::error::StorageError;

#[test]
fn test_desk_error_construction() {
    let err = DeskError::configuration("missing base dir");
    assert!(matches!(err, DeskError::Configuration { .. }));
    assert_eq!(err.exit_code(), 2);
    assert_eq!(err.code(), ErrorCode::CONFIG_GENERIC);

    let err = DeskError::invalid_credentials();
    assert!(matches!(err, DeskError::Authentication { .. }));
    assert_eq!(err.exit_code(), 3);
    assert_eq!(err.code(), ErrorCode::SESSION_INVALID_CREDENTIALS);

    let err = DeskError::submission("bad payload");
    assert!(matches!(err, DeskError::Submission { .. }));
    assert_eq!(err.exit_code(), 6);
    assert_eq!(err.code(), ErrorCode::SUBMISSION_GENERIC);

    let err = DeskError::busy("login");
    assert_eq!(err.code(), ErrorCode::OPERATION_IN_FLIGHT);
    assert_eq!(err.exit_code(), 7);

    let err = DeskError::cancelled("loan submission");
    assert_eq!(err.code(), ErrorCode::OPERATION_CANCELLED);
    assert!(!err.is_submission_failure());

    let err = DeskError::transport("connection reset");
    assert_eq!(err.code(), ErrorCode::TRANSPORT_GENERIC);
    assert_eq!(err.exit_code(), 5);
}

#[test]
fn test_display_includes_code() {
    let err = DeskError::out_of_scope("use_session", "session::provide");
    assert_eq!(
        err.to_string(),
        "[E1004] Configuration error: use_session must be used within session::provide"
    );
}

#[test]
fn test_error_with_context() {
    let err = DeskError::transport("timed out").with_context("POST /auth/login");
    assert_eq!(
        err.to_string(),
        "[E4000] Transport error: timed out: POST /auth/login"
    );
}

#[test]
fn test_error_with_source() {
    let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
    let err = DeskError::transport("write failed").with_source(io);
    let source = std::error::Error::source(&err).map(|s| s.to_string());
    assert_eq!(source.as_deref(), Some("disk gone"));
}

#[test]
fn test_submission_failure_classification() {
    assert!(DeskError::invalid_credentials().is_submission_failure());
    assert!(DeskError::duplicate_account("a@x.com").is_submission_failure());
    assert!(DeskError::busy("register").is_submission_failure());
    assert!(!DeskError::configuration("x").is_submission_failure());
    assert!(!DeskError::transport("x").is_submission_failure());
}

#[test]
fn test_duplicate_account_names_email_field() {
    let err = DeskError::duplicate_account("a@x.com");
    assert_eq!(err.field(), Some("email"));
    assert_eq!(
        err.user_message(),
        "Please check 'email': Email already registered: a@x.com"
    );
}

#[test]
fn test_storage_error_conversion() {
    let err: DeskError = StorageError::invalid_key("../etc").into();
    assert!(matches!(err, DeskError::Storage { .. }));
    assert_eq!(err.code(), ErrorCode::STORAGE_INVALID_KEY);
}
