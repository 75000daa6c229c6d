//! Loan payload checks
//!
//! The payload is opaque, but the well-known numeric fields of a credit
//! application are range-checked when they appear.

use serde_json::Value;

use super::state::LoanPayload;
use crate::error::{DeskError, ErrorCode};
use crate::LibResult;

/// Keys the store writes itself
pub const RESERVED_KEYS: &[&str] = &["id", "status", "submittedAt"];

const POSITIVE_FIELDS: &[&str] = &["amount", "amountRequested", "monthlyIncome"];
const NON_NEGATIVE_FIELDS: &[&str] = &[
    "tenureYears",
    "numDebts",
    "totalDebtAmount",
    "monthlyEmis",
    "totalAssets",
];
const CITY_TIERS: &[&str] = &["tier_1", "tier_2", "tier_3"];

/// Check a payload before it is submitted
pub fn validate_payload(payload: &LoanPayload) -> LibResult<()> {
    if payload.is_empty() {
        return Err(DeskError::submission_with_code(
            ErrorCode::SUBMISSION_REQUIRED_FIELD,
            "Application payload is empty",
            None,
        ));
    }

    for key in RESERVED_KEYS {
        if payload.get(key).is_some() {
            return Err(field_error(
                ErrorCode::SUBMISSION_RESERVED_FIELD,
                key,
                "is assigned by the store and cannot be supplied",
            ));
        }
    }

    for key in POSITIVE_FIELDS {
        if let Some(value) = payload.get(key) {
            let number = as_number(key, value)?;
            if number <= 0.0 {
                return Err(field_error(
                    ErrorCode::SUBMISSION_OUT_OF_RANGE,
                    key,
                    "must be greater than zero",
                ));
            }
        }
    }

    for key in NON_NEGATIVE_FIELDS {
        if let Some(value) = payload.get(key) {
            let number = as_number(key, value)?;
            if number < 0.0 {
                return Err(field_error(
                    ErrorCode::SUBMISSION_OUT_OF_RANGE,
                    key,
                    "must not be negative",
                ));
            }
        }
    }

    if let Some(tier) = payload.get("cityTier") {
        let valid = tier.as_str().is_some_and(|t| CITY_TIERS.contains(&t));
        if !valid {
            return Err(field_error(
                ErrorCode::SUBMISSION_PATTERN_MISMATCH,
                "cityTier",
                "must be one of tier_1, tier_2, tier_3",
            ));
        }
    }

    Ok(())
}

fn as_number(key: &str, value: &Value) -> LibResult<f64> {
    value
        .as_f64()
        .ok_or_else(|| field_error(ErrorCode::SUBMISSION_INVALID_TYPE, key, "must be a number"))
}

fn field_error(code: u16, key: &str, reason: &str) -> DeskError {
    DeskError::submission_with_code(code, format!("{} {}", key, reason), Some(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> LoanPayload {
        LoanPayload::from_value(value).unwrap()
    }

    #[test]
    fn test_accepts_typical_payloads() {
        assert!(validate_payload(&payload(json!({"amount": 50000, "tenureYears": 2}))).is_ok());
        assert!(validate_payload(&payload(json!({
            "amountRequested": 250000.0,
            "numDebts": 0,
            "totalDebtAmount": 0,
            "monthlyEmis": 0,
            "totalAssets": 100000,
            "monthlyIncome": 45000,
            "cityTier": "tier_2"
        })))
        .is_ok());
        assert!(validate_payload(&payload(json!({"purpose": "home"}))).is_ok());
    }

    #[test]
    fn test_rejects_empty() {
        let err = validate_payload(&LoanPayload::new()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::SUBMISSION_REQUIRED_FIELD);
    }

    #[test]
    fn test_rejects_reserved_keys() {
        for key in RESERVED_KEYS {
            let err = validate_payload(&LoanPayload::new().with(*key, 1)).unwrap_err();
            assert_eq!(err.field(), Some(*key));
            assert_eq!(err.code(), ErrorCode::SUBMISSION_RESERVED_FIELD);
        }
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        for amount in [json!(0), json!(-10)] {
            let err = validate_payload(&payload(json!({"amount": amount}))).unwrap_err();
            assert_eq!(err.field(), Some("amount"));
            assert_eq!(err.code(), ErrorCode::SUBMISSION_OUT_OF_RANGE);
        }
    }

    #[test]
    fn test_rejects_negative_counts() {
        let err = validate_payload(&payload(json!({"amount": 10, "numDebts": -1}))).unwrap_err();
        assert_eq!(err.field(), Some("numDebts"));
    }

    #[test]
    fn test_rejects_non_numeric_amount() {
        let err = validate_payload(&payload(json!({"amount": "lots"}))).unwrap_err();
        assert_eq!(err.code(), ErrorCode::SUBMISSION_INVALID_TYPE);
    }

    #[test]
    fn test_rejects_unknown_city_tier() {
        let err = validate_payload(&payload(json!({"cityTier": "tier_9"}))).unwrap_err();
        assert_eq!(err.field(), Some("cityTier"));
    }
}
