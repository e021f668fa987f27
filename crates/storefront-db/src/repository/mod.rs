//! # Repository Module
//!
//! Product persistence behind an injected storage port.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository over a Storage Port                       │
//! │                                                                         │
//! │  Order workflow                                                        │
//! │       │  repo.update_quantity(&[QuantityAdjustment { id, quantity }])  │
//! │       ▼                                                                 │
//! │  ProductRepository<S>          (product.rs)                            │
//! │  ├── create(&self, request)                                            │
//! │  ├── find_by_name(&self, name)                                         │
//! │  ├── find_all_by_id(&self, ids)                                        │
//! │  └── update_quantity(&self, requests) ── stock rule (storefront-core)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  S: ProductStore               (this file)                             │
//! │  ├── SqliteProductStore        (sqlite.rs)  production                 │
//! │  └── InMemoryProductStore      (memory.rs)  tests                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Items
//!
//! - [`ProductStore`] - Storage port trait
//! - [`product::ProductRepository`] - Catalogue and stock operations
//! - [`sqlite::SqliteProductStore`] - sqlx/SQLite port
//! - [`memory::InMemoryProductStore`] - In-process port

use async_trait::async_trait;
use storefront_core::{CreateProductRequest, OrderProduct, Product};

use crate::error::DbResult;

pub mod memory;
pub mod product;
pub mod sqlite;

/// Storage operations the product repository relies on.
///
/// Implementations must be thread-safe (Send + Sync) and must assign ids and
/// timestamps themselves.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Inserts a new product with a generated id and current timestamps.
    async fn insert(&self, request: &CreateProductRequest) -> DbResult<Product>;

    /// First product (in insertion order) whose name matches exactly.
    async fn find_by_name(&self, name: &str) -> DbResult<Option<Product>>;

    /// Products whose id is in `ids`. Unknown ids are skipped.
    async fn find_many_by_id(&self, ids: &[String]) -> DbResult<Vec<Product>>;

    /// Writes the `quantity` of every given product, all or nothing.
    ///
    /// Fails with `DbError::NotFound` if any id is unknown, leaving every
    /// row untouched. Returns the products with their new `updated_at`.
    async fn update_many(&self, products: &[Product]) -> DbResult<Vec<Product>>;

    /// Line items referencing a product, oldest first.
    async fn find_order_products(&self, product_id: &str) -> DbResult<Vec<OrderProduct>>;

    /// Number of stored products.
    async fn count(&self) -> DbResult<i64>;
}

/// Generates a new product ID (UUID v4).
pub fn generate_product_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
