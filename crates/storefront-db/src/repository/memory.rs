//! # In-Memory Product Store
//!
//! `ProductStore` kept in process memory. Same contract as the SQLite store:
//! generated ids, insertion-ordered name lookup, all-or-nothing bulk update.
//! Used to test repository logic without a database, and to simulate
//! storage failures.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use storefront_core::{CreateProductRequest, OrderProduct, Product};

use super::{generate_product_id, ProductStore};
use crate::error::{DbError, DbResult};

/// In-memory storage port.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductStore {
    products: Arc<RwLock<Vec<Product>>>,
    order_products: Arc<RwLock<Vec<OrderProduct>>>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryProductStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `insert` / `update_many` fail with
    /// `DbError::QueryFailed` until switched off again.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Adds a line item, the way the order workflow would.
    pub async fn add_order_product(&self, line: OrderProduct) -> DbResult<()> {
        let products = self.products.read().await;
        if !products.iter().any(|p| p.id == line.product_id) {
            return Err(DbError::ForeignKeyViolation {
                message: format!("product {} does not exist", line.product_id),
            });
        }
        self.order_products.write().await.push(line);
        Ok(())
    }

    /// Copy of every stored product, in insertion order.
    pub async fn snapshot(&self) -> Vec<Product> {
        self.products.read().await.clone()
    }

    fn check_writable(&self) -> DbResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DbError::QueryFailed("simulated write failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn insert(&self, request: &CreateProductRequest) -> DbResult<Product> {
        self.check_writable()?;

        let now = Utc::now();
        let product = Product {
            id: generate_product_id(),
            name: request.name.clone(),
            price_cents: request.price.cents(),
            quantity: request.quantity,
            order_products: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        self.products.write().await.push(product.clone());
        Ok(product)
    }

    async fn find_by_name(&self, name: &str) -> DbResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.name == name).cloned())
    }

    async fn find_many_by_id(&self, ids: &[String]) -> DbResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn update_many(&self, updates: &[Product]) -> DbResult<Vec<Product>> {
        self.check_writable()?;

        let mut products = self.products.write().await;

        // Resolve every index and check the schema rule first so a bad row
        // leaves the whole set untouched.
        let mut targets = Vec::with_capacity(updates.len());
        for update in updates {
            let index = products
                .iter()
                .position(|p| p.id == update.id)
                .ok_or_else(|| DbError::not_found("Product", &update.id))?;
            if update.quantity < 0 {
                return Err(DbError::CheckViolation {
                    message: "CHECK constraint failed: quantity >= 0".to_string(),
                });
            }
            targets.push(index);
        }

        let now = Utc::now();
        let mut saved = Vec::with_capacity(updates.len());
        for (index, update) in targets.into_iter().zip(updates) {
            let stored = &mut products[index];
            stored.quantity = update.quantity;
            stored.updated_at = now;
            saved.push(stored.clone());
        }

        Ok(saved)
    }

    async fn find_order_products(&self, product_id: &str) -> DbResult<Vec<OrderProduct>> {
        let lines = self.order_products.read().await;
        Ok(lines
            .iter()
            .filter(|line| line.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn count(&self) -> DbResult<i64> {
        Ok(self.products.read().await.len() as i64)
    }
}
