//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐  1    *  ┌─────────────────┐                      │
//! │  │    Product      │──────────│  OrderProduct   │                      │
//! │  │  ─────────────  │          │  ─────────────  │                      │
//! │  │  id (UUID)      │          │  id (UUID)      │                      │
//! │  │  name           │          │  order_id       │                      │
//! │  │  price_cents    │          │  product_id(FK) │                      │
//! │  │  quantity ≥ 0   │          │  price_cents    │                      │
//! │  └─────────────────┘          │  quantity       │                      │
//! │                               └─────────────────┘                      │
//! │                                                                         │
//! │  Requests: CreateProductRequest, QuantityAdjustment                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A stock-keeping unit available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4), assigned by storage on insert.
    pub id: String,

    /// Display name. Not unique.
    pub name: String,

    /// Price in cents.
    pub price_cents: i64,

    /// Units in stock. Never negative.
    pub quantity: i64,

    /// Line items referencing this product. Only populated on request.
    #[serde(default)]
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub order_products: Vec<OrderProduct>,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks if `quantity` units can be taken from stock.
    pub fn has_stock_for(&self, quantity: i64) -> bool {
        self.quantity >= quantity
    }
}

// =============================================================================
// Order Product (line item)
// =============================================================================

/// One line of an order: a product, the price it was sold at and how many.
///
/// Owned by the order workflow; the catalogue only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OrderProduct {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    /// Unit price in cents at time of order (frozen).
    pub price_cents: i64,
    pub quantity: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl OrderProduct {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns unit price × quantity, `None` on overflow.
    #[inline]
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price().checked_mul(self.quantity)
    }
}

// =============================================================================
// Requests
// =============================================================================

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: Money,
    pub quantity: i64,
}

impl CreateProductRequest {
    pub fn new(name: impl Into<String>, price: Money, quantity: i64) -> Self {
        CreateProductRequest {
            name: name.into(),
            price,
            quantity,
        }
    }
}

/// Units of one product to remove from stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuantityAdjustment {
    /// Product id.
    pub id: String,
    /// Units to remove.
    pub quantity: i64,
}

impl QuantityAdjustment {
    pub fn new(id: impl Into<String>, quantity: i64) -> Self {
        QuantityAdjustment {
            id: id.into(),
            quantity,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(quantity: i64) -> Product {
        let now = Utc::now();
        Product {
            id: "p-1".to_string(),
            name: "Widget".to_string(),
            price_cents: 999,
            quantity,
            order_products: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_price_accessor() {
        assert_eq!(product(1).price(), Money::from_cents(999));
    }

    #[test]
    fn test_has_stock_for() {
        let widget = product(2);
        assert!(widget.has_stock_for(0));
        assert!(widget.has_stock_for(2));
        assert!(!widget.has_stock_for(3));
    }

    #[test]
    fn test_line_total() {
        let now = Utc::now();
        let line = OrderProduct {
            id: "l-1".to_string(),
            order_id: "o-1".to_string(),
            product_id: "p-1".to_string(),
            price_cents: 250,
            quantity: 4,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(line.line_total(), Some(Money::from_cents(1000)));

        let huge = OrderProduct {
            price_cents: i64::MAX,
            quantity: 2,
            ..line
        };
        assert_eq!(huge.line_total(), None);
    }

    #[test]
    fn test_product_json_defaults_missing_line_items() {
        let json = serde_json::json!({
            "id": "p-1",
            "name": "Widget",
            "price_cents": 999,
            "quantity": 10,
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": "2026-01-01T00:00:00Z"
        });
        let parsed: Product = serde_json::from_value(json).unwrap();
        assert!(parsed.order_products.is_empty());
        assert_eq!(parsed.quantity, 10);
    }

    #[test]
    fn test_create_request_price_serializes_as_cents() {
        let req = CreateProductRequest::new("Widget", Money::from_cents(999), 10);
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["price"], 999);
    }
}
