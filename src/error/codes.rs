/// Error code registry for creditdesk
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 2000-2999: Session and authentication errors
/// - 3000-3999: Storage errors
/// - 4000-4999: Transport errors
/// - 7000-7999: Submission (validation) errors
/// - 8000-8999: Operation lifecycle errors (busy, cancelled)
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_PARSE_ERROR: u16 = 1002;
    pub const CONFIG_INVALID_VALUE: u16 = 1003;
    pub const CONFIG_OUT_OF_SCOPE: u16 = 1004;

    // Session errors (2000-2999)
    pub const SESSION_GENERIC: u16 = 2000;
    pub const SESSION_INVALID_CREDENTIALS: u16 = 2001;

    // Storage errors (3000-3999)
    pub const STORAGE_GENERIC: u16 = 3000;
    pub const STORAGE_IO_ERROR: u16 = 3001;
    pub const STORAGE_INVALID_KEY: u16 = 3002;
    pub const STORAGE_SERIALIZATION_ERROR: u16 = 3003;
    pub const STORAGE_BACKEND_ERROR: u16 = 3004;

    // Transport errors (4000-4999)
    pub const TRANSPORT_GENERIC: u16 = 4000;

    // Submission errors (7000-7999)
    pub const SUBMISSION_GENERIC: u16 = 7000;
    pub const SUBMISSION_REQUIRED_FIELD: u16 = 7001;
    pub const SUBMISSION_INVALID_TYPE: u16 = 7002;
    pub const SUBMISSION_OUT_OF_RANGE: u16 = 7003;
    pub const SUBMISSION_PATTERN_MISMATCH: u16 = 7004;
    pub const SUBMISSION_RESERVED_FIELD: u16 = 7005;
    pub const SUBMISSION_DUPLICATE_ACCOUNT: u16 = 7006;

    // Operation lifecycle errors (8000-8999)
    pub const OPERATION_IN_FLIGHT: u16 = 8001;
    pub const OPERATION_CANCELLED: u16 = 8002;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        1000 => "Generic configuration error",
        1001 => "Configuration file not found",
        1002 => "Failed to parse configuration",
        1003 => "Invalid value in configuration",
        1004 => "Store accessed outside the scope that provides it",

        2000 => "Generic session error",
        2001 => "Invalid email or password",

        3000 => "Generic storage error",
        3001 => "Storage I/O failure",
        3002 => "Invalid storage key",
        3003 => "Failed to serialize or deserialize stored data",
        3004 => "Storage backend failure",

        4000 => "Generic transport error",

        7000 => "Submission rejected",
        7001 => "A required field is missing",
        7002 => "A field has the wrong type",
        7003 => "A numeric field is out of range",
        7004 => "A field does not match the expected format",
        7005 => "A field name is reserved",
        7006 => "An account with this email already exists",

        8001 => "Another operation is already in flight",
        8002 => "The operation was cancelled",

        _ => "Unknown error code",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_have_descriptions() {
        for code in [
            ErrorCode::CONFIG_OUT_OF_SCOPE,
            ErrorCode::SESSION_INVALID_CREDENTIALS,
            ErrorCode::STORAGE_SERIALIZATION_ERROR,
            ErrorCode::TRANSPORT_GENERIC,
            ErrorCode::SUBMISSION_DUPLICATE_ACCOUNT,
            ErrorCode::OPERATION_CANCELLED,
        ] {
            assert_ne!(describe_error_code(code), "Unknown error code");
        }
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(describe_error_code(42), "Unknown error code");
        assert_eq!(describe_error_code(2002), "Unknown error code");
        assert_eq!(describe_error_code(4002), "Unknown error code");
    }
}
