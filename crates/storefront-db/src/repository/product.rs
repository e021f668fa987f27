//! # Product Repository
//!
//! Catalogue reads and writes, plus the stock decrement used when an order
//! is placed.
//!
//! ## Key Operations
//! - `create` - validate and insert
//! - `find_by_name` / `find_all_by_id` - reads
//! - `update_quantity` - validate the whole batch, then write it in one go
//!
//! ## Stock Update Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  update_quantity([{id: W, quantity: 3}])                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.find_many_by_id([W])        ← one load for the whole batch      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  plan_quantity_update(stored, requests)   (storefront-core, pure)      │
//! │       │                                                                 │
//! │       ├── missing id / would go negative → Err, nothing written        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.update_many(changes)        ← one transaction                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  [W quantity 7]   (request order)                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! Load, check and write are separate steps. Two orders racing on the same
//! product can both pass the check against the same snapshot. Each then
//! writes an absolute quantity that is still `>= 0`, so the
//! `CHECK (quantity >= 0)` constraint never fires and the later write
//! silently overwrites the earlier one (a lost update).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use storefront_core::inventory::{distinct_ids, plan_quantity_update};
use storefront_core::validation::validate_create_product;
use storefront_core::{CreateProductRequest, OrderProduct, Product, QuantityAdjustment};

use super::ProductStore;
use crate::error::DbResult;

/// Repository for products over any storage port.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(InMemoryProductStore::new());
///
/// let widget = repo
///     .create(CreateProductRequest::new("Widget", "9.99".parse()?, 10))
///     .await?;
///
/// let updated = repo
///     .update_quantity(&[QuantityAdjustment::new(&widget.id, 3)])
///     .await?;
/// assert_eq!(updated[0].quantity, 7);
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository<S> {
    store: S,
}

impl<S: ProductStore> ProductRepository<S> {
    /// Creates a new ProductRepository over `store`.
    pub fn new(store: S) -> Self {
        ProductRepository { store }
    }

    /// Creates a product.
    ///
    /// No duplicate-name check is made; callers that care use
    /// [`find_by_name`](Self::find_by_name) first.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Persisted product with generated id and timestamps
    /// * `Err(DbError::Domain(_))` - Blank name, price out of range or negative quantity
    pub async fn create(&self, request: CreateProductRequest) -> DbResult<Product> {
        validate_create_product(&request)?;

        debug!(name = %request.name, price = %request.price, quantity = request.quantity, "Creating product");

        let product = self.store.insert(&request).await?;

        debug!(id = %product.id, "Product created");
        Ok(product)
    }

    /// Finds the first product with exactly this name.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - No product has that name
    pub async fn find_by_name(&self, name: &str) -> DbResult<Option<Product>> {
        debug!(name = %name, "Finding product by name");
        self.store.find_by_name(name).await
    }

    /// Finds every product whose id is listed.
    ///
    /// Unknown ids are left out of the result rather than reported. The
    /// result order is unspecified.
    pub async fn find_all_by_id(&self, ids: &[String]) -> DbResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.store.find_many_by_id(ids).await
    }

    /// Removes ordered quantities from stock.
    ///
    /// ## Arguments
    /// * `requests` - Product id and units to remove, one entry per order line
    ///
    /// ## Returns
    /// * `Ok(Vec<Product>)` - One product per request, in request order
    /// * `Err(DbError::Domain(CoreError::ProductsNotFound))` - An id is unknown
    /// * `Err(DbError::Domain(CoreError::InsufficientQuantity))` - A line would oversell
    /// * `Err(other)` - Storage failure, passed through unchanged
    ///
    /// On any error, stored quantities are the same as before the call.
    pub async fn update_quantity(&self, requests: &[QuantityAdjustment]) -> DbResult<Vec<Product>> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let ids = distinct_ids(requests);
        debug!(lines = requests.len(), products = ids.len(), "Updating product quantities");

        let stored = self.store.find_many_by_id(&ids).await?;

        let plan = plan_quantity_update(stored, requests).inspect_err(|err| {
            warn!(error = %err, "Rejected stock update");
        })?;

        let saved = self.store.update_many(&plan.changes).await?;

        let stamps: HashMap<&str, DateTime<Utc>> = saved
            .iter()
            .map(|p| (p.id.as_str(), p.updated_at))
            .collect();

        let lines = plan
            .lines
            .into_iter()
            .map(|mut line| {
                if let Some(updated_at) = stamps.get(line.id.as_str()) {
                    line.updated_at = *updated_at;
                }
                line
            })
            .collect();

        Ok(lines)
    }

    /// Loads the line items that reference a product.
    pub async fn find_order_products(&self, product_id: &str) -> DbResult<Vec<OrderProduct>> {
        self.store.find_order_products(product_id).await
    }

    /// Counts stored products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        self.store.count().await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
