//! # Validation Module
//!
//! Shopper-input validation, run before anything is dispatched.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form inputs (presentation)                                   │
//! │  ├── Quantity steppers, search box, auth forms                         │
//! │  └── THIS MODULE: reject bad input with a typed error                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: transition(state, action)                                    │
//! │  └── Accepts every action as given. No checks, no failures.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use satchel_core::validation::{validate_quantity, validate_email};
//!
//! assert!(validate_quantity(2).is_ok());
//! assert!(validate_email("ada@example.com").is_ok());
//! ```

use crate::error::ValidationError;
use crate::{MAX_ITEM_QUANTITY, MAX_SEARCH_QUERY_LEN, MIN_PASSWORD_LEN, OTP_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity chosen on the product page or cart stepper.
///
/// ## Rules
/// - Must be at least 1
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// Setting a cart line to 0 is a removal, which callers handle before
/// reaching this check.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(1..=MAX_ITEM_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points (0% to 100%).
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (shows the whole catalog)
/// - Maximum 100 characters after trimming
///
/// ## Returns
/// The trimmed query string. The store itself keeps whatever text the
/// shopper typed; trimming only applies to the query used for matching.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

/// Validates an email address shape: `local@domain.tld`, no whitespace.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("must contain '@'"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must have exactly one '@' after a name"));
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(invalid("must have a domain like example.com")),
    }
}

/// Validates a new password and its confirmation.
///
/// ## Rules
/// - Required
/// - At least MIN_PASSWORD_LEN (8) characters
/// - Confirmation must match exactly
pub fn validate_new_password(password: &str, confirmation: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    if password != confirmation {
        return Err(ValidationError::Mismatch {
            field: "confirm password".to_string(),
        });
    }

    Ok(())
}

/// Scores a password from 0 to 4 for the strength meter.
///
/// One point each for: length ≥ 8, an uppercase ASCII letter, a digit, a
/// character outside `[A-Za-z0-9]`.
pub fn password_strength(password: &str) -> u8 {
    let checks = [
        password.chars().count() >= MIN_PASSWORD_LEN,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    checks.iter().filter(|ok| **ok).count() as u8
}

/// Label shown under the strength meter.
pub fn password_strength_label(score: u8) -> &'static str {
    match score {
        0 => "Very Weak",
        1 => "Weak",
        2 => "Fair",
        3 => "Good",
        _ => "Strong",
    }
}

/// Validates a one-time verification code (exactly six ASCII digits).
pub fn validate_otp(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "verification code".to_string(),
        });
    }

    if code.len() != OTP_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "verification code".to_string(),
            reason: format!("must be {} digits", OTP_LENGTH),
        });
    }

    Ok(())
}

/// Extracts up to six digits from pasted text, dropping everything else.
///
/// ```rust
/// use satchel_core::validation::otp_from_paste;
///
/// assert_eq!(otp_from_paste("Your code: 123-456"), "123456");
/// ```
pub fn otp_from_paste(pasted: &str) -> String {
    pasted
        .chars()
        .filter(char::is_ascii_digit)
        .take(OTP_LENGTH)
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_tax_rate_bps() {
        assert!(validate_tax_rate_bps(0).is_ok());
        assert!(validate_tax_rate_bps(800).is_ok());
        assert!(validate_tax_rate_bps(10000).is_ok());
        assert!(validate_tax_rate_bps(10001).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  tote ").unwrap(), "tote");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email(" ada@mail.example.co ").is_ok());

        assert_eq!(
            validate_email(""),
            Err(ValidationError::Required {
                field: "email".to_string()
            })
        );
        assert!(validate_email("ada.example.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ada@example").is_err());
        assert!(validate_email("ada@@example.com").is_err());
        assert!(validate_email("a da@example.com").is_err());
    }

    #[test]
    fn test_validate_new_password() {
        assert!(validate_new_password("leather-goods", "leather-goods").is_ok());

        assert!(matches!(
            validate_new_password("", ""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_new_password("short", "short"),
            Err(ValidationError::TooShort { min: 8, .. })
        ));
        assert!(matches!(
            validate_new_password("leather-goods", "leather-good"),
            Err(ValidationError::Mismatch { .. })
        ));
    }

    #[test]
    fn test_password_strength() {
        assert_eq!(password_strength(""), 0);
        assert_eq!(password_strength("abcdefgh"), 1);
        assert_eq!(password_strength("Abcdefgh"), 2);
        assert_eq!(password_strength("Abcdefg1"), 3);
        assert_eq!(password_strength("Abcdef1!"), 4);
        assert_eq!(password_strength_label(4), "Strong");
        assert_eq!(password_strength_label(0), "Very Weak");
    }

    #[test]
    fn test_validate_otp() {
        assert!(validate_otp("042137").is_ok());
        assert!(validate_otp("").is_err());
        assert!(validate_otp("12345").is_err());
        assert!(validate_otp("12345a").is_err());
        assert!(validate_otp("1234567").is_err());
    }

    #[test]
    fn test_otp_from_paste() {
        assert_eq!(otp_from_paste("98 76 54 32"), "987654");
        assert_eq!(otp_from_paste("no digits"), "");
    }
}
