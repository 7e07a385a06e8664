//! # Error Types
//!
//! Domain-specific error types for satchel-core.
//!
//! ## Where Errors Can Happen
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  transition(state, action)   ── total, never fails                     │
//! │                                                                         │
//! │  satchel-core errors (this file)                                       │
//! │  ├── CoreError        - Catalog loading and lookups                    │
//! │  └── ValidationError  - Shopper input rejected before dispatch         │
//! │                                                                         │
//! │  storefront app errors (separate crate)                                │
//! │  ├── ConfigError      - Bad config file or env override                │
//! │  └── AppError         - What the replay loop reports                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → log / exit code        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, field name)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised at the edges of the core: catalog parsing, catalog
/// integrity and lookups by id.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product with this id in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// No collection with this id in the catalog.
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    /// A collection lists a product id the catalog does not contain.
    #[error("Collection {collection} references unknown product {product_id}")]
    DanglingCollectionMember {
        collection: String,
        product_id: String,
    },

    /// Catalog JSON could not be parsed.
    #[error("Malformed catalog: {0}")]
    MalformedCatalog(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the presentation side before an action is dispatched; an
/// invalid input never reaches the reducer.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. email without a domain).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Two fields that must agree do not (password confirmation).
    #[error("{field} does not match")]
    Mismatch { field: String },

    /// Duplicate value (e.g. two catalog products sharing an id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::DanglingCollectionMember {
            collection: "heritage".to_string(),
            product_id: "ghost".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Collection heritage references unknown product ghost"
        );

        let err = CoreError::ProductNotFound("P9".to_string());
        assert_eq!(err.to_string(), "Product not found: P9");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email is required");

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 999,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 999");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Mismatch {
            field: "confirm password".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
