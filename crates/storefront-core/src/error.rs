//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Business rule rejections                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storefront-db errors (separate crate)                                 │
//! │  └── DbError          - Storage failures, wraps CoreError as Domain    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError::Domain → caller          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A caller placing an order treats any `CoreError` as "reject the whole
//! order". Stock is untouched when one is returned.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A product referenced by a quantity adjustment does not exist.
    ///
    /// ## When This Occurs
    /// - Order references a product id that was never created
    /// - Product id typed wrong by the caller
    ///
    /// The whole batch is rejected at the first missing id.
    #[error("Products not found in repository")]
    ProductsNotFound { id: String },

    /// Removing the requested quantity would drive stock below zero.
    ///
    /// ## User Workflow
    /// ```text
    /// Place order (Widget × 5)
    ///      │
    ///      ▼
    /// Stored stock: 2
    ///      │
    ///      ▼
    /// InsufficientQuantity { name: "Widget", available: 2, requested: 5 }
    ///      │
    ///      ▼
    /// Order rejected: "Insufficient quantity of product Widget"
    /// ```
    #[error("Insufficient quantity of product {name}")]
    InsufficientQuantity {
        id: String,
        name: String,
        available: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., a malformed decimal price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

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
        let err = CoreError::InsufficientQuantity {
            id: "p-1".to_string(),
            name: "Widget".to_string(),
            available: 2,
            requested: 5,
        };
        assert_eq!(err.to_string(), "Insufficient quantity of product Widget");

        let err = CoreError::ProductsNotFound {
            id: "nonexistent-uuid".to_string(),
        };
        assert_eq!(err.to_string(), "Products not found in repository");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::Negative {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
