//! # Domain Types
//!
//! Core domain types used throughout Vela POS.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │   Product ──┐                                                   │
//! │   (stock)   │  CheckoutRequest                                  │
//! │             ▼        │                                          │
//! │        Checkout Engine (vela-db)                                │
//! │             │                                                   │
//! │             ▼                                                   │
//! │   Order ──► OrderLine (price/name snapshot at sale time)        │
//! │             │                                                   │
//! │             ▼                                                   │
//! │   SalesReport / BestSeller (read-only aggregation)              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! An order line freezes the product name and the computed subtotal at the
//! moment of sale. Later edits to the product never rewrite sales history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// Stock is mutated through the checkout engine's locked decrement; the
/// plain CRUD path may also set it directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, assigned by storage.
    pub id: i64,

    /// Display name shown on receipts and in reports.
    pub name: String,

    /// Unit price in minor units.
    pub price: Money,

    /// Current stock level. Never negative at any observable instant.
    pub stock: i64,

    /// Optional category reference.
    pub category_id: Option<i64>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Checks whether the current stock covers a requested quantity.
    #[inline]
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

/// Payload for creating or updating a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub price: Money,
    pub stock: i64,
    pub category_id: Option<i64>,
}

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// Payload for creating or updating a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

// =============================================================================
// Checkout Request
// =============================================================================

/// One requested line in a checkout: a product and a quantity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItem {
    pub product_id: i64,
    pub quantity: i64,
}

/// The transient input to the checkout engine.
///
/// Never persisted as-is; a committed checkout is recorded as an [`Order`]
/// with its [`OrderLine`]s.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
}

// =============================================================================
// Order
// =============================================================================

/// A committed multi-item purchase.
///
/// Created exactly once, atomically, by the checkout engine and immutable
/// thereafter. `total_amount` always equals the sum of line subtotals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub total_amount: Money,
    pub created_at: DateTime<Utc>,
    /// Line items in request order. Loaded separately from the order row.
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default)]
    pub lines: Vec<OrderLine>,
}

/// One product's contribution to an order.
///
/// `product_name` and `subtotal` are snapshots taken at sale time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    /// Unit price at sale time multiplied by quantity.
    pub subtotal: Money,
}

// =============================================================================
// Sales Report
// =============================================================================

/// The best selling product within a report window.
///
/// The default value (id 0, empty name, zero quantity) is returned when no
/// order lines exist in the window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct BestSeller {
    pub product_id: i64,
    pub product_name: String,
    /// Summed quantity across all order lines in the window.
    pub quantity: i64,
}

/// Aggregated sales statistics over a closed `[start, end]` interval.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub total_revenue: Money,
    pub total_transactions: i64,
    pub best_seller: BestSeller,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_fulfill() {
        let product = Product {
            id: 3,
            name: "Roti Bakar".to_string(),
            price: Money::from_minor(12000),
            stock: 5,
            category_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(product.can_fulfill(5));
        assert!(!product.can_fulfill(10));
    }

    #[test]
    fn test_checkout_request_wire_shape() {
        let request: CheckoutRequest =
            serde_json::from_str(r#"{"items":[{"productId":1,"quantity":2}]}"#).unwrap();

        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].product_id, 1);
        assert_eq!(request.items[0].quantity, 2);
    }

    #[test]
    fn test_empty_report_wire_shape() {
        let json = serde_json::to_string(&SalesReport::default()).unwrap();
        assert_eq!(
            json,
            r#"{"totalRevenue":0,"totalTransactions":0,"bestSeller":{"productId":0,"productName":"","quantity":0}}"#
        );
    }
}
