//! Errors returned by progress operations.

use thiserror::Error;

use super::state::Currency;

/// Validation failures of a progress intent.
///
/// None of these are retryable and none leave state partially modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("quest not found: {0}")]
    NotFound(String),

    #[error("insufficient {currency}: need {required}, have {available}")]
    InsufficientFunds {
        currency: Currency,
        required: u64,
        available: u64,
    },
}

pub type Result<T> = std::result::Result<T, ProgressError>;

/// Parse an amount from an untyped source (data attributes, form fields).
///
/// Negative and non-numeric input is rejected.
pub fn parse_amount(raw: &str) -> Result<u64> {
    let raw = raw.trim();
    if raw.starts_with('-') {
        return Err(ProgressError::InvalidArgument(format!(
            "amount must not be negative: {raw}"
        )));
    }
    raw.parse::<u64>()
        .map_err(|_| ProgressError::InvalidArgument(format!("not an amount: `{raw}`")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 500 ").unwrap(), 500);
        assert_eq!(parse_amount("0").unwrap(), 0);
    }

    #[test]
    fn test_parse_amount_rejects_negative() {
        assert!(matches!(
            parse_amount("-20"),
            Err(ProgressError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert!(parse_amount("12abc").is_err());
        assert!(parse_amount("").is_err());
    }

    #[test]
    fn test_insufficient_funds_message() {
        let err = ProgressError::InsufficientFunds {
            currency: Currency::Gems,
            required: 500,
            available: 100,
        };
        assert_eq!(err.to_string(), "insufficient gems: need 500, have 100");
    }
}
