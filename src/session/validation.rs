//! Registration profile checks

use once_cell::sync::Lazy;
use regex::Regex;

use super::state::RegistrationProfile;
use crate::error::{DeskError, ErrorCode};
use crate::LibResult;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("valid email pattern"));
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{10}$").expect("valid phone pattern"));

pub const MIN_PASSWORD_LEN: usize = 8;

/// Check a profile before it is sent to the backend
pub fn validate_profile(profile: &RegistrationProfile) -> LibResult<()> {
    if profile.display_name.trim().is_empty() {
        return Err(DeskError::submission_with_code(
            ErrorCode::SUBMISSION_REQUIRED_FIELD,
            "Name is required",
            Some("displayName".to_string()),
        ));
    }

    validate_email(&profile.email)?;

    if let Some(phone) = &profile.phone {
        if !PHONE_PATTERN.is_match(phone) {
            return Err(DeskError::submission_with_code(
                ErrorCode::SUBMISSION_PATTERN_MISMATCH,
                "Please enter a valid 10-digit number",
                Some("phone".to_string()),
            ));
        }
    }

    if profile.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DeskError::submission_with_code(
            ErrorCode::SUBMISSION_OUT_OF_RANGE,
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
            Some("password".to_string()),
        ));
    }

    Ok(())
}

/// Check the shape of an email address
pub fn validate_email(email: &str) -> LibResult<()> {
    if EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err(DeskError::submission_with_code(
            ErrorCode::SUBMISSION_PATTERN_MISMATCH,
            "Invalid email address",
            Some("email".to_string()),
        ))
    }
}
