//! # Validation Module
//!
//! Input validation for catalogue operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller (HTTP / order workflow)                               │
//! │  └── Deserialization into request structs                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: ProductRepository                                            │
//! │  └── THIS MODULE: field rules before any write                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK (quantity >= 0), CHECK (price_cents >= 0)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_product_name, validate_stock_quantity};
//!
//! validate_product_name("Widget").unwrap();
//! validate_stock_quantity(10).unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::{CreateProductRequest, QuantityAdjustment};
use crate::{MAX_PRICE_CENTS, MAX_PRODUCT_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Maximum 200 characters
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Widget").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stock quantity. Zero is allowed (sold out).
pub fn validate_stock_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Zero is allowed (free items)
/// - Must fit decimal(10, 2): at most 99,999,999.99
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(999).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

// =============================================================================
// Request Validators
// =============================================================================

/// Validates every field of a create request.
pub fn validate_create_product(request: &CreateProductRequest) -> ValidationResult<()> {
    validate_product_name(&request.name)?;
    validate_price_cents(request.price.cents())?;
    validate_stock_quantity(request.quantity)?;
    Ok(())
}

/// Validates a single stock adjustment.
///
/// Only checks the id is present; unknown ids are reported as not found.
pub fn validate_adjustment(adjustment: &QuantityAdjustment) -> ValidationResult<()> {
    if adjustment.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    validate_stock_quantity(adjustment.quantity)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Widget").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
        assert!(validate_product_name(&"A".repeat(200)).is_ok());
    }

    #[test]
    fn test_validate_stock_quantity() {
        assert!(validate_stock_quantity(0).is_ok());
        assert!(validate_stock_quantity(10).is_ok());
        assert!(matches!(
            validate_stock_quantity(-1),
            Err(ValidationError::Negative { .. })
        ));
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(999).is_ok());
        assert!(validate_price_cents(MAX_PRICE_CENTS).is_ok());
        assert!(validate_price_cents(MAX_PRICE_CENTS + 1).is_err());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_create_product() {
        let ok = CreateProductRequest::new("Widget", Money::from_cents(999), 10);
        assert!(validate_create_product(&ok).is_ok());

        let negative_stock = CreateProductRequest::new("Widget", Money::from_cents(999), -1);
        assert!(validate_create_product(&negative_stock).is_err());

        let blank = CreateProductRequest::new(" ", Money::from_cents(999), 1);
        assert!(matches!(
            validate_create_product(&blank),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_adjustment() {
        assert!(validate_adjustment(&QuantityAdjustment::new("nonexistent-uuid", 1)).is_ok());
        assert!(validate_adjustment(&QuantityAdjustment::new("p-1", 0)).is_ok());
        assert!(validate_adjustment(&QuantityAdjustment::new("", 1)).is_err());
        assert!(validate_adjustment(&QuantityAdjustment::new("p-1", -3)).is_err());
    }
}
