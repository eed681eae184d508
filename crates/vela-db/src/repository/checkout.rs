//! # Checkout Repository
//!
//! The atomic checkout transaction engine.
//!
//! ## Checkout Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checkout Lifecycle                                 │
//! │                                                                         │
//! │  1. VALIDATE (before any storage effect)                                │
//! │     └── empty request / bad quantity → ValidationError                  │
//! │                                                                         │
//! │  2. OPEN TRANSACTION                                                    │
//! │     └── dropped without commit ⇒ rollback on EVERY exit path            │
//! │                                                                         │
//! │  3. PER LINE, STRICTLY IN REQUEST ORDER                                 │
//! │     └── lock_and_read()   → take write lock, read name/price/stock      │
//! │     └── stock check       → InsufficientStock aborts everything         │
//! │     └── decrement_stock() → guarded UPDATE under the held lock          │
//! │     └── snapshot          → (product_id, name, qty, subtotal)           │
//! │                                                                         │
//! │  4. PERSIST                                                             │
//! │     └── insert order, then all lines referencing its id                 │
//! │                                                                         │
//! │  5. COMMIT                                                              │
//! │     └── observers see the whole order or nothing at all                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Locking Strategy
//! SQLite has no `SELECT ... FOR UPDATE`. The equivalent here is a
//! self-assignment `UPDATE products SET stock = stock` issued as the
//! transaction's **first** statement: it takes the database write lock
//! (SQLite's single-writer lock subsumes the row lock) and reports unknown
//! ids via `rows_affected`. Writing first also keeps the busy handler in
//! play, so a concurrent checkout waits up to `busy_timeout` instead of
//! failing immediately with a snapshot conflict.
//!
//! The lock is held until commit or rollback, so two checkouts touching the
//! same product are fully serialized and stock can never be lost to a
//! concurrent decrement.

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

use crate::error::{CheckoutError, DbError};
use vela_core::validation::validate_checkout;
use vela_core::{CheckoutRequest, CoreError, Money, Order, OrderLine};

/// Repository running the atomic checkout transaction.
#[derive(Debug, Clone)]
pub struct CheckoutRepository {
    pool: SqlitePool,
}

/// Product fields read under the write lock, as of sale time.
#[derive(Debug, sqlx::FromRow)]
struct ProductAtSale {
    name: String,
    price: Money,
    stock: i64,
}

/// One validated line waiting to be persisted with the order.
#[derive(Debug)]
struct LineSnapshot {
    product_id: i64,
    product_name: String,
    quantity: i64,
    subtotal: Money,
}

impl CheckoutRepository {
    /// Creates a new CheckoutRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CheckoutRepository { pool }
    }

    /// Commits a multi-item order atomically against the stock ledger.
    ///
    /// Processes line items strictly in request order. The first failing
    /// line determines the single error returned; no partial success is
    /// ever reported. Duplicate product ids are processed as independent
    /// sequential lines inside the one transaction.
    ///
    /// ## Returns
    /// * `Ok(Order)` - The committed order with its lines, stock decremented
    /// * `Err(CheckoutError)` - Nothing persisted, no stock changed
    pub async fn checkout(&self, request: &CheckoutRequest) -> Result<Order, CheckoutError> {
        validate_checkout(request).map_err(CoreError::from)?;

        debug!(lines = request.items.len(), "starting checkout transaction");

        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        let mut total_amount = Money::zero();
        let mut lines: Vec<LineSnapshot> = Vec::with_capacity(request.items.len());

        for item in &request.items {
            let product = lock_and_read(&mut tx, item.product_id).await?;

            if product.stock < item.quantity {
                // tx is dropped here without commit: every decrement so far
                // rolls back along with it.
                return Err(CoreError::InsufficientStock {
                    product_id: item.product_id,
                    name: product.name,
                    available: product.stock,
                    requested: item.quantity,
                }
                .into());
            }

            decrement_stock(&mut tx, item.product_id, item.quantity).await?;

            let subtotal = product.price * item.quantity;
            total_amount += subtotal;

            lines.push(LineSnapshot {
                product_id: item.product_id,
                product_name: product.name,
                quantity: item.quantity,
                subtotal,
            });
        }

        let order = insert_order(&mut tx, total_amount, lines).await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(
            order_id = order.id,
            total = %order.total_amount,
            "checkout committed"
        );

        Ok(order)
    }
}

/// Takes the write lock and reads the product as of sale time.
///
/// The self-assignment UPDATE is the locking primitive (see module docs);
/// the SELECT that follows runs under the lock just taken, so the values it
/// returns cannot be invalidated by a concurrent checkout.
async fn lock_and_read(
    tx: &mut Transaction<'_, Sqlite>,
    product_id: i64,
) -> Result<ProductAtSale, CheckoutError> {
    let locked = sqlx::query("UPDATE products SET stock = stock WHERE id = ?1")
        .bind(product_id)
        .execute(&mut **tx)
        .await
        .map_err(DbError::from)?;

    if locked.rows_affected() == 0 {
        return Err(CoreError::ProductNotFound(product_id).into());
    }

    let product = sqlx::query_as::<_, ProductAtSale>(
        r#"
        SELECT name, price, stock
        FROM products
        WHERE id = ?1
        "#,
    )
    .bind(product_id)
    .fetch_one(&mut **tx)
    .await
    .map_err(DbError::from)?;

    Ok(product)
}

/// Reduces stock by `qty` under the held lock.
///
/// The caller has already verified `stock >= qty` in the same lock window.
/// The `stock >= ?2` guard (plus the schema CHECK) keeps stock non-negative
/// even if that discipline is ever broken.
async fn decrement_stock(
    tx: &mut Transaction<'_, Sqlite>,
    product_id: i64,
    qty: i64,
) -> Result<(), DbError> {
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        UPDATE products
        SET stock = stock - ?2, updated_at = ?3
        WHERE id = ?1 AND stock >= ?2
        "#,
    )
    .bind(product_id)
    .bind(qty)
    .bind(now)
    .execute(&mut **tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::Internal(format!(
            "stock guard rejected decrement of {qty} for product {product_id}"
        )));
    }

    Ok(())
}

/// Inserts the order row, then all line rows referencing its id.
async fn insert_order(
    tx: &mut Transaction<'_, Sqlite>,
    total_amount: Money,
    lines: Vec<LineSnapshot>,
) -> Result<Order, CheckoutError> {
    let created_at = Utc::now();

    let (order_id, created_at) = sqlx::query_as::<_, (i64, DateTime<Utc>)>(
        r#"
        INSERT INTO orders (total_amount, created_at)
        VALUES (?1, ?2)
        RETURNING id, created_at
        "#,
    )
    .bind(total_amount)
    .bind(created_at)
    .fetch_one(&mut **tx)
    .await
    .map_err(DbError::from)?;

    let mut order_lines = Vec::with_capacity(lines.len());

    for line in lines {
        let order_line = sqlx::query_as::<_, OrderLine>(
            r#"
            INSERT INTO order_lines (order_id, product_id, product_name, quantity, subtotal)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, order_id, product_id, product_name, quantity, subtotal
            "#,
        )
        .bind(order_id)
        .bind(line.product_id)
        .bind(&line.product_name)
        .bind(line.quantity)
        .bind(line.subtotal)
        .fetch_one(&mut **tx)
        .await
        .map_err(DbError::from)?;

        order_lines.push(order_line);
    }

    Ok(Order {
        id: order_id,
        total_amount,
        created_at,
        lines: order_lines,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use vela_core::{CheckoutItem, ProductInput};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed(db: &Database, name: &str, price: i64, stock: i64) -> i64 {
        db.products()
            .insert(&ProductInput {
                name: name.to_string(),
                price: Money::from_minor(price),
                stock,
                category_id: None,
            })
            .await
            .unwrap()
            .id
    }

    fn request(items: Vec<(i64, i64)>) -> CheckoutRequest {
        CheckoutRequest {
            items: items
                .into_iter()
                .map(|(product_id, quantity)| CheckoutItem {
                    product_id,
                    quantity,
                })
                .collect(),
        }
    }

    async fn stock_of(db: &Database, id: i64) -> i64 {
        db.products().get(id).await.unwrap().unwrap().stock
    }

    #[tokio::test]
    async fn test_checkout_happy_path() {
        let db = test_db().await;

        // The worked example: {1:(15000,100), 2:(8000,150)},
        // checkout [(1,2),(2,1)] => total 38000, stocks 98/149.
        let kopi = seed(&db, "Kopi Susu", 15000, 100).await;
        let teh = seed(&db, "Teh Manis", 8000, 150).await;

        let order = db
            .checkout()
            .checkout(&request(vec![(kopi, 2), (teh, 1)]))
            .await
            .unwrap();

        assert_eq!(order.total_amount, Money::from_minor(38000));
        assert_eq!(order.lines.len(), 2);

        // Lines keep request order and snapshot name + subtotal
        assert_eq!(order.lines[0].product_id, kopi);
        assert_eq!(order.lines[0].product_name, "Kopi Susu");
        assert_eq!(order.lines[0].quantity, 2);
        assert_eq!(order.lines[0].subtotal, Money::from_minor(30000));
        assert_eq!(order.lines[1].product_id, teh);
        assert_eq!(order.lines[1].subtotal, Money::from_minor(8000));
        assert!(order.lines.iter().all(|l| l.order_id == order.id));

        assert_eq!(stock_of(&db, kopi).await, 98);
        assert_eq!(stock_of(&db, teh).await, 149);
    }

    #[tokio::test]
    async fn test_checkout_total_is_sum_of_subtotals() {
        let db = test_db().await;
        let a = seed(&db, "A", 1500, 50).await;
        let b = seed(&db, "B", 700, 50).await;
        let c = seed(&db, "C", 99, 50).await;

        let order = db
            .checkout()
            .checkout(&request(vec![(a, 3), (b, 10), (c, 1)]))
            .await
            .unwrap();

        let sum: Money = order.lines.iter().map(|l| l.subtotal).sum();
        assert_eq!(order.total_amount, sum);
        assert_eq!(order.total_amount, Money::from_minor(3 * 1500 + 10 * 700 + 99));
    }

    #[tokio::test]
    async fn test_checkout_unknown_product() {
        let db = test_db().await;
        let kopi = seed(&db, "Kopi Susu", 15000, 100).await;

        let err = db
            .checkout()
            .checkout(&request(vec![(kopi, 1), (9999, 1)]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CheckoutError::Domain(CoreError::ProductNotFound(9999))
        ));

        // The first line's decrement rolled back with the transaction
        assert_eq!(stock_of(&db, kopi).await, 100);
    }

    #[tokio::test]
    async fn test_checkout_insufficient_stock() {
        let db = test_db().await;

        // stock 5, request 10 => fails, stock stays 5
        let roti = seed(&db, "Roti Bakar", 12000, 5).await;

        let err = db
            .checkout()
            .checkout(&request(vec![(roti, 10)]))
            .await
            .unwrap_err();

        match err {
            CheckoutError::Domain(CoreError::InsufficientStock {
                product_id,
                available,
                requested,
                ..
            }) => {
                assert_eq!(product_id, roti);
                assert_eq!(available, 5);
                assert_eq!(requested, 10);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        assert_eq!(stock_of(&db, roti).await, 5);
    }

    #[tokio::test]
    async fn test_checkout_mid_request_failure_rolls_back_everything() {
        let db = test_db().await;
        let kopi = seed(&db, "Kopi Susu", 15000, 100).await;
        let teh = seed(&db, "Teh Manis", 8000, 2).await;
        let roti = seed(&db, "Roti Bakar", 12000, 50).await;

        // Second line fails: neither the first line's decrement nor any
        // order rows may survive.
        let err = db
            .checkout()
            .checkout(&request(vec![(kopi, 10), (teh, 3), (roti, 1)]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CheckoutError::Domain(CoreError::InsufficientStock { product_id, .. })
                if product_id == teh
        ));

        assert_eq!(stock_of(&db, kopi).await, 100);
        assert_eq!(stock_of(&db, teh).await, 2);
        assert_eq!(stock_of(&db, roti).await, 50);

        let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(db.pool())
            .await
            .unwrap();
        let lines: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_lines")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(orders, 0);
        assert_eq!(lines, 0);
    }

    #[tokio::test]
    async fn test_checkout_first_failing_line_wins() {
        let db = test_db().await;
        let empty = seed(&db, "Sold Out", 5000, 0).await;

        // Both lines would fail; the error names the first in request order.
        let err = db
            .checkout()
            .checkout(&request(vec![(empty, 1), (4242, 1)]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CheckoutError::Domain(CoreError::InsufficientStock { product_id, .. })
                if product_id == empty
        ));
    }

    #[tokio::test]
    async fn test_checkout_duplicate_lines_same_product() {
        let db = test_db().await;
        let kopi = seed(&db, "Kopi Susu", 15000, 10).await;

        // Same product twice: two independent sequential lines in one
        // transaction, decrements accumulate.
        let order = db
            .checkout()
            .checkout(&request(vec![(kopi, 4), (kopi, 3)]))
            .await
            .unwrap();

        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.total_amount, Money::from_minor(7 * 15000));
        assert_eq!(stock_of(&db, kopi).await, 3);
    }

    #[tokio::test]
    async fn test_checkout_duplicate_lines_combined_oversell() {
        let db = test_db().await;
        let kopi = seed(&db, "Kopi Susu", 15000, 10).await;

        // First line fits, second sees the already-decremented stock.
        let err = db
            .checkout()
            .checkout(&request(vec![(kopi, 8), (kopi, 5)]))
            .await
            .unwrap_err();

        match err {
            CheckoutError::Domain(CoreError::InsufficientStock {
                available,
                requested,
                ..
            }) => {
                assert_eq!(available, 2);
                assert_eq!(requested, 5);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        assert_eq!(stock_of(&db, kopi).await, 10);
    }

    #[tokio::test]
    async fn test_checkout_rejects_invalid_requests_before_storage() {
        let db = test_db().await;
        let kopi = seed(&db, "Kopi Susu", 15000, 100).await;

        let empty = db.checkout().checkout(&request(vec![])).await.unwrap_err();
        assert!(matches!(
            empty,
            CheckoutError::Domain(CoreError::Validation(_))
        ));

        let zero_qty = db
            .checkout()
            .checkout(&request(vec![(kopi, 0)]))
            .await
            .unwrap_err();
        assert!(matches!(
            zero_qty,
            CheckoutError::Domain(CoreError::Validation(_))
        ));

        assert_eq!(stock_of(&db, kopi).await, 100);
    }

    #[tokio::test]
    async fn test_checkout_does_not_touch_other_products() {
        let db = test_db().await;
        let kopi = seed(&db, "Kopi Susu", 15000, 100).await;
        let teh = seed(&db, "Teh Manis", 8000, 150).await;

        db.checkout()
            .checkout(&request(vec![(kopi, 5)]))
            .await
            .unwrap();

        assert_eq!(stock_of(&db, kopi).await, 95);
        assert_eq!(stock_of(&db, teh).await, 150);
    }

    // -------------------------------------------------------------------------
    // Concurrency
    // -------------------------------------------------------------------------
    // These run against a temp-file database with a multi-connection pool:
    // an in-memory SQLite is limited to one connection, which would
    // serialize the checkouts before they ever reach the write lock.

    async fn concurrent_db(dir: &tempfile::TempDir) -> Database {
        Database::new(
            DbConfig::new(dir.path().join("vela.db"))
                .max_connections(4)
                .busy_timeout(std::time::Duration::from_secs(10)),
        )
        .await
        .unwrap()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_checkouts_no_lost_update() {
        let dir = tempfile::tempdir().unwrap();
        let db = concurrent_db(&dir).await;
        let kopi = seed(&db, "Kopi Susu", 15000, 100).await;

        // Combined quantity fits: both must succeed and both decrements
        // must land (no lost update).
        let repo_a = db.checkout();
        let repo_b = db.checkout();
        let a = tokio::spawn(async move { repo_a.checkout(&request(vec![(kopi, 30)])).await });
        let b = tokio::spawn(async move { repo_b.checkout(&request(vec![(kopi, 25)])).await });

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        assert!(a.is_ok(), "first checkout failed: {:?}", a.err());
        assert!(b.is_ok(), "second checkout failed: {:?}", b.err());

        assert_eq!(stock_of(&db, kopi).await, 100 - 30 - 25);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_checkouts_combined_oversell() {
        let dir = tempfile::tempdir().unwrap();
        let db = concurrent_db(&dir).await;
        let kopi = seed(&db, "Kopi Susu", 15000, 10).await;

        // Combined quantity exceeds stock: exactly one fits (whichever
        // commits first), the other fails, stock never goes negative.
        let repo_a = db.checkout();
        let repo_b = db.checkout();
        let a = tokio::spawn(async move { repo_a.checkout(&request(vec![(kopi, 7)])).await });
        let b = tokio::spawn(async move { repo_b.checkout(&request(vec![(kopi, 7)])).await });

        let (a, b) = (a.await.unwrap(), b.await.unwrap());

        let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
        assert_eq!(successes, 1, "exactly one of the two checkouts must fit");

        let failure = if a.is_err() { a } else { b };
        assert!(matches!(
            failure.unwrap_err(),
            CheckoutError::Domain(CoreError::InsufficientStock { available: 3, requested: 7, .. })
        ));

        assert_eq!(stock_of(&db, kopi).await, 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_many_concurrent_checkouts_drain_exact_stock() {
        let dir = tempfile::tempdir().unwrap();
        let db = concurrent_db(&dir).await;
        let kopi = seed(&db, "Kopi Susu", 15000, 50).await;

        // 10 checkouts x 5 units drain the stock to exactly zero.
        let mut handles = Vec::new();
        for _ in 0..10 {
            let repo = db.checkout();
            handles.push(tokio::spawn(async move {
                repo.checkout(&request(vec![(kopi, 5)])).await
            }));
        }

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(stock_of(&db, kopi).await, 0);
    }
}
