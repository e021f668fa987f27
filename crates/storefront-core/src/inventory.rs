//! # Inventory Module
//!
//! The stock-decrement rule behind `ProductRepository::update_quantity`.
//!
//! ## Validate Everything, Then Write
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order: [Widget × 3, Gadget × 1, Widget × 2]          │
//! │                                                                         │
//! │  stored snapshot      running quantity                                 │
//! │  Widget = 10   ──►    10 - 3 = 7   ──►   7 - 2 = 5                      │
//! │  Gadget = 1    ──►     1 - 1 = 0                                        │
//! │                                                                         │
//! │  lines   = [Widget 7, Gadget 0, Widget 5]   (request order)            │
//! │  changes = [Widget 5, Gadget 0]             (one write per product)    │
//! │                                                                         │
//! │  Any missing id or negative result → Err, and nothing is written.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A product that appears twice in one batch is checked against its running
//! quantity, so an order cannot oversell by splitting one product over
//! several lines.

use std::collections::{HashMap, HashSet};

use crate::error::{CoreError, CoreResult};
use crate::types::{Product, QuantityAdjustment};
use crate::validation::validate_adjustment;

/// Outcome of a successful stock check.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityUpdatePlan {
    /// One product per request, in request order, with the quantity left
    /// after that line.
    pub lines: Vec<Product>,

    /// Each touched product once, with its final quantity, in first-seen
    /// order. This is what gets persisted.
    pub changes: Vec<Product>,
}

/// Distinct product ids of a batch, in first-seen order.
pub fn distinct_ids(requests: &[QuantityAdjustment]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(requests.len());
    requests
        .iter()
        .filter(|r| seen.insert(r.id.as_str()))
        .map(|r| r.id.clone())
        .collect()
}

/// Applies a batch of adjustments to a snapshot of stored products.
///
/// ## Arguments
/// * `stored` - Products loaded for the batch's ids (missing ones omitted)
/// * `requests` - Adjustments in order
///
/// ## Returns
/// * `Ok(QuantityUpdatePlan)` - Every line fits in stock
/// * `Err(CoreError::ProductsNotFound)` - First request whose id is not in `stored`
/// * `Err(CoreError::InsufficientQuantity)` - First line that would go negative
/// * `Err(CoreError::Validation)` - A request with an empty id or negative quantity
pub fn plan_quantity_update(
    stored: Vec<Product>,
    requests: &[QuantityAdjustment],
) -> CoreResult<QuantityUpdatePlan> {
    let mut running: HashMap<String, Product> =
        stored.into_iter().map(|p| (p.id.clone(), p)).collect();
    let mut touched: Vec<String> = Vec::new();
    let mut lines = Vec::with_capacity(requests.len());

    for request in requests {
        validate_adjustment(request)?;

        let product = running
            .get_mut(&request.id)
            .ok_or_else(|| CoreError::ProductsNotFound {
                id: request.id.clone(),
            })?;

        if !product.has_stock_for(request.quantity) {
            return Err(CoreError::InsufficientQuantity {
                id: product.id.clone(),
                name: product.name.clone(),
                available: product.quantity,
                requested: request.quantity,
            });
        }

        product.quantity -= request.quantity;
        if !touched.contains(&request.id) {
            touched.push(request.id.clone());
        }
        lines.push(product.clone());
    }

    let changes = touched
        .into_iter()
        .filter_map(|id| running.remove(&id))
        .collect();

    Ok(QuantityUpdatePlan { lines, changes })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn stored(id: &str, name: &str, quantity: i64) -> Product {
        let now = Utc::now();
        Product {
            id: id.to_string(),
            name: name.to_string(),
            price_cents: 999,
            quantity,
            order_products: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_single_decrement() {
        let plan = plan_quantity_update(
            vec![stored("w", "Widget", 10)],
            &[QuantityAdjustment::new("w", 3)],
        )
        .unwrap();

        assert_eq!(plan.lines.len(), 1);
        assert_eq!(plan.lines[0].quantity, 7);
        assert_eq!(plan.changes[0].quantity, 7);
    }

    #[test]
    fn test_decrement_to_exactly_zero() {
        let plan = plan_quantity_update(
            vec![stored("w", "Widget", 2)],
            &[QuantityAdjustment::new("w", 2)],
        )
        .unwrap();
        assert_eq!(plan.lines[0].quantity, 0);
    }

    #[test]
    fn test_insufficient_quantity_names_product() {
        let err = plan_quantity_update(
            vec![stored("w", "Widget", 2)],
            &[QuantityAdjustment::new("w", 5)],
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "Insufficient quantity of product Widget");
        match err {
            CoreError::InsufficientQuantity {
                available,
                requested,
                ..
            } => {
                assert_eq!(available, 2);
                assert_eq!(requested, 5);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_product_rejects_batch() {
        let err = plan_quantity_update(
            vec![stored("w", "Widget", 10)],
            &[
                QuantityAdjustment::new("w", 1),
                QuantityAdjustment::new("nonexistent-uuid", 1),
            ],
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "Products not found in repository");
        assert!(matches!(err, CoreError::ProductsNotFound { ref id } if id == "nonexistent-uuid"));
    }

    #[test]
    fn test_first_failing_line_wins() {
        // Missing id comes before the oversold line, so it is reported.
        let err = plan_quantity_update(
            vec![stored("w", "Widget", 1)],
            &[
                QuantityAdjustment::new("ghost", 1),
                QuantityAdjustment::new("w", 5),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::ProductsNotFound { .. }));
    }

    #[test]
    fn test_lines_follow_request_order() {
        let plan = plan_quantity_update(
            vec![stored("a", "Alpha", 5), stored("b", "Beta", 5), stored("c", "Gamma", 5)],
            &[
                QuantityAdjustment::new("c", 1),
                QuantityAdjustment::new("a", 2),
                QuantityAdjustment::new("b", 3),
            ],
        )
        .unwrap();

        let ids: Vec<&str> = plan.lines.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
        let quantities: Vec<i64> = plan.lines.iter().map(|p| p.quantity).collect();
        assert_eq!(quantities, [4, 3, 2]);
    }

    #[test]
    fn test_duplicate_ids_are_cumulative() {
        let plan = plan_quantity_update(
            vec![stored("w", "Widget", 10), stored("g", "Gadget", 1)],
            &[
                QuantityAdjustment::new("w", 3),
                QuantityAdjustment::new("g", 1),
                QuantityAdjustment::new("w", 2),
            ],
        )
        .unwrap();

        let quantities: Vec<i64> = plan.lines.iter().map(|p| p.quantity).collect();
        assert_eq!(quantities, [7, 0, 5]);

        assert_eq!(plan.changes.len(), 2);
        assert_eq!(plan.changes[0].id, "w");
        assert_eq!(plan.changes[0].quantity, 5);
        assert_eq!(plan.changes[1].id, "g");
        assert_eq!(plan.changes[1].quantity, 0);
    }

    #[test]
    fn test_duplicate_ids_cannot_oversell() {
        // Each line fits the stored 4 on its own; together they do not.
        let err = plan_quantity_update(
            vec![stored("w", "Widget", 4)],
            &[QuantityAdjustment::new("w", 3), QuantityAdjustment::new("w", 3)],
        )
        .unwrap_err();

        match err {
            CoreError::InsufficientQuantity { available, .. } => assert_eq!(available, 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_negative_request_is_rejected() {
        let err = plan_quantity_update(
            vec![stored("w", "Widget", 4)],
            &[QuantityAdjustment::new("w", -2)],
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_empty_batch() {
        let plan = plan_quantity_update(vec![stored("w", "Widget", 4)], &[]).unwrap();
        assert!(plan.lines.is_empty());
        assert!(plan.changes.is_empty());
    }

    #[test]
    fn test_distinct_ids_keep_first_seen_order() {
        let ids = distinct_ids(&[
            QuantityAdjustment::new("b", 1),
            QuantityAdjustment::new("a", 1),
            QuantityAdjustment::new("b", 2),
        ]);
        assert_eq!(ids, ["b", "a"]);
    }
}
