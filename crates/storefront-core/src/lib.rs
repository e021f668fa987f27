//! # storefront-core: Pure Business Logic for the Storefront
//!
//! This crate holds the product model and the one stateful business rule of
//! the catalogue: decrementing stock for an order without ever going below
//! zero. Everything here is pure: no database, no network, no clock reads
//! outside of type definitions.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Storefront Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │           Order workflow / HTTP handlers (external)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              storefront-db (ProductRepository)                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ storefront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ inventory │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ stock     │  │   rules   │  │   │
//! │  │   │ OrderProd │  │           │  │ decrement │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, OrderProduct, request structs)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//! - [`inventory`] - Stock-decrement rule used by `update_quantity`
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price: Money = "9.99".parse().unwrap();
//! assert_eq!(price.cents(), 999);
//! assert_eq!(price.to_string(), "$9.99");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod inventory;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::{plan_quantity_update, QuantityUpdatePlan};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product name, in bytes after trimming.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Largest price the `decimal(10, 2)` column can hold, in cents.
///
/// ## Why this value?
/// Ten significant digits with two after the point: `99_999_999.99`.
pub const MAX_PRICE_CENTS: i64 = 9_999_999_999;
