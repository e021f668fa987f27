//! # storefront-db: Product Storage for the Storefront
//!
//! This crate persists the product catalogue and applies stock decrements.
//! It uses SQLite through sqlx for async operations and ships an in-memory
//! store with the same contract.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Data Flow                             │
//! │                                                                         │
//! │  Order workflow (place order)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  storefront-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (product.rs)  │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ ProductRepo<S>│    │ 001_products │  │   │
//! │  │   │ DbConfig      │    │ ProductStore  │    │ 002_orders_  │  │   │
//! │  │   │               │    │ (sqlite/mem)  │    │   products   │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ./storefront.db  (STOREFRONT_DB_PATH)                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Storage port, its two implementations and the product repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_core::{CreateProductRequest, QuantityAdjustment};
//! use storefront_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::from_env()?).await?;
//! let products = db.products();
//!
//! let widget = products
//!     .create(CreateProductRequest::new("Widget", "9.99".parse()?, 10))
//!     .await?;
//! products
//!     .update_quantity(&[QuantityAdjustment::new(&widget.id, 3)])
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::memory::InMemoryProductStore;
pub use repository::product::ProductRepository;
pub use repository::sqlite::SqliteProductStore;
pub use repository::ProductStore;
