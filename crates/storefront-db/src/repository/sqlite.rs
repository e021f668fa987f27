//! # SQLite Product Store
//!
//! `ProductStore` implemented with sqlx against the `products` and
//! `orders_products` tables.
//!
//! ## Bulk Update
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  update_many([Widget q=7, Gadget q=0])                              │
//! │                                                                     │
//! │  BEGIN                                                              │
//! │    UPDATE products SET quantity = 7 ... WHERE id = 'widget'  → 1   │
//! │    UPDATE products SET quantity = 0 ... WHERE id = 'gadget'  → 1   │
//! │  COMMIT                                                             │
//! │                                                                     │
//! │  Any statement affecting 0 rows or failing a CHECK → ROLLBACK,     │
//! │  no row changes.                                                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use storefront_core::{CreateProductRequest, OrderProduct, Product};

use super::{generate_product_id, ProductStore};
use crate::error::{DbError, DbResult};

/// Columns selected for every `Product` row.
const PRODUCT_COLUMNS: &str = "id, name, price_cents, quantity, created_at, updated_at";

/// Ids bound per `IN (...)` query, below SQLite's host parameter limit.
const MAX_IDS_PER_QUERY: usize = 500;

/// Storage port backed by a SQLite pool.
#[derive(Debug, Clone)]
pub struct SqliteProductStore {
    pool: SqlitePool,
}

impl SqliteProductStore {
    /// Creates a store over an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteProductStore { pool }
    }

    /// Returns the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl ProductStore for SqliteProductStore {
    async fn insert(&self, request: &CreateProductRequest) -> DbResult<Product> {
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

        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (id, name, price_cents, quantity, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.price_cents)
        .bind(product.quantity)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    async fn find_by_name(&self, name: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE name = ?1 ORDER BY rowid LIMIT 1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn find_many_by_id(&self, ids: &[String]) -> DbResult<Vec<Product>> {
        let mut unique: Vec<&String> = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }

        let mut products = Vec::with_capacity(unique.len());
        for chunk in unique.chunks(MAX_IDS_PER_QUERY) {
            let mut builder: QueryBuilder<Sqlite> =
                QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id IN ("));
            {
                let mut separated = builder.separated(", ");
                for id in chunk {
                    separated.push_bind((*id).clone());
                }
                separated.push_unseparated(")");
            }

            let rows = builder
                .build_query_as::<Product>()
                .fetch_all(&self.pool)
                .await?;
            products.extend(rows);
        }

        debug!(requested = ids.len(), found = products.len(), "Loaded products by id");
        Ok(products)
    }

    async fn update_many(&self, products: &[Product]) -> DbResult<Vec<Product>> {
        if products.is_empty() {
            return Ok(Vec::new());
        }

        let now = Utc::now();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let mut updated = Vec::with_capacity(products.len());
        for product in products {
            let result = sqlx::query(
                r#"
                UPDATE products
                SET quantity = ?2, updated_at = ?3
                WHERE id = ?1
                "#,
            )
            .bind(&product.id)
            .bind(product.quantity)
            .bind(now)
            .execute(&mut *tx)
            .await;

            let rows = match result {
                Ok(done) => done.rows_affected(),
                Err(err) => {
                    tx.rollback()
                        .await
                        .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
                    return Err(err.into());
                }
            };

            if rows == 0 {
                tx.rollback()
                    .await
                    .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
                return Err(DbError::not_found("Product", &product.id));
            }

            let mut saved = product.clone();
            saved.updated_at = now;
            updated.push(saved);
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(count = updated.len(), "Committed product quantities");
        Ok(updated)
    }

    async fn find_order_products(&self, product_id: &str) -> DbResult<Vec<OrderProduct>> {
        let lines = sqlx::query_as::<_, OrderProduct>(
            r#"
            SELECT id, order_id, product_id, price_cents, quantity, created_at, updated_at
            FROM orders_products
            WHERE product_id = ?1
            ORDER BY created_at, rowid
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use storefront_core::Money;

    async fn store() -> (Database, SqliteProductStore) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = SqliteProductStore::new(db.pool().clone());
        (db, store)
    }

    fn widget(quantity: i64) -> CreateProductRequest {
        CreateProductRequest::new("Widget", Money::from_cents(999), quantity)
    }

    async fn stored_quantity(store: &SqliteProductStore, id: &str) -> i64 {
        sqlx::query_scalar("SELECT quantity FROM products WHERE id = ?1")
            .bind(id)
            .fetch_one(store.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamps() {
        let (_db, store) = store().await;

        let product = store.insert(&widget(10)).await.unwrap();
        assert!(uuid::Uuid::parse_str(&product.id).is_ok());
        assert_eq!(product.created_at, product.updated_at);

        let found = store.find_many_by_id(&[product.id.clone()]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].price_cents, 999);
        assert_eq!(found[0].quantity, 10);
    }

    #[tokio::test]
    async fn test_find_by_name_returns_first_inserted() {
        let (_db, store) = store().await;

        let first = store.insert(&widget(1)).await.unwrap();
        store.insert(&widget(2)).await.unwrap();

        let found = store.find_by_name("Widget").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
        assert!(store.find_by_name("widget").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_many_collapses_duplicates() {
        let (_db, store) = store().await;
        let a = store.insert(&widget(1)).await.unwrap();

        let found = store
            .find_many_by_id(&[a.id.clone(), a.id.clone(), "missing".to_string()])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert!(store.find_many_by_id(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_many_spans_several_chunks() {
        let (_db, store) = store().await;

        let mut ids = Vec::new();
        for _ in 0..(MAX_IDS_PER_QUERY + 3) {
            ids.push(store.insert(&widget(1)).await.unwrap().id);
        }

        let found = store.find_many_by_id(&ids).await.unwrap();
        assert_eq!(found.len(), ids.len());
    }

    #[tokio::test]
    async fn test_update_many_rolls_back_on_missing_id() {
        let (_db, store) = store().await;
        let mut a = store.insert(&widget(10)).await.unwrap();

        a.quantity = 4;
        let mut ghost = a.clone();
        ghost.id = "ghost".to_string();

        let err = store.update_many(&[a.clone(), ghost]).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
        assert_eq!(stored_quantity(&store, &a.id).await, 10);
    }

    #[tokio::test]
    async fn test_update_many_rejects_negative_quantity_at_schema_level() {
        let (_db, store) = store().await;
        let mut a = store.insert(&widget(10)).await.unwrap();
        let mut b = store.insert(&widget(10)).await.unwrap();

        a.quantity = 3;
        b.quantity = -1;

        let err = store.update_many(&[a.clone(), b]).await.unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }), "{err:?}");
        assert_eq!(stored_quantity(&store, &a.id).await, 10);
    }

    #[tokio::test]
    async fn test_update_many_refreshes_updated_at() {
        let (_db, store) = store().await;
        let mut a = store.insert(&widget(10)).await.unwrap();
        a.quantity = 7;

        let saved = store.update_many(&[a.clone()]).await.unwrap();
        assert_eq!(saved[0].quantity, 7);
        assert!(saved[0].updated_at >= a.created_at);
        assert_eq!(stored_quantity(&store, &a.id).await, 7);
    }

    #[tokio::test]
    async fn test_order_products_and_cascade() {
        let (_db, store) = store().await;
        let product = store.insert(&widget(10)).await.unwrap();
        let now = Utc::now();

        for (line_id, quantity) in [("line-1", 2_i64), ("line-2", 1)] {
            sqlx::query(
                r#"
                INSERT INTO orders_products
                    (id, order_id, product_id, price_cents, quantity, created_at, updated_at)
                VALUES (?1, 'order-1', ?2, 999, ?3, ?4, ?4)
                "#,
            )
            .bind(line_id)
            .bind(&product.id)
            .bind(quantity)
            .bind(now)
            .execute(store.pool())
            .await
            .unwrap();
        }

        let lines = store.find_order_products(&product.id).await.unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].id, "line-1");
        assert_eq!(lines[0].line_total().map(|t| t.cents()), Some(1998));

        sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(&product.id)
            .execute(store.pool())
            .await
            .unwrap();
        assert!(store.find_order_products(&product.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_line_item_requires_existing_product() {
        let (_db, store) = store().await;

        let err: DbError = sqlx::query(
            r#"
            INSERT INTO orders_products
                (id, order_id, product_id, price_cents, quantity, created_at, updated_at)
            VALUES ('line-1', 'order-1', 'no-such-product', 100, 1, '', '')
            "#,
        )
        .execute(store.pool())
        .await
        .unwrap_err()
        .into();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn test_count() {
        let (_db, store) = store().await;
        assert_eq!(store.count().await.unwrap(), 0);
        store.insert(&widget(1)).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
