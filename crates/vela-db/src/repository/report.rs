//! # Report Repository
//!
//! Read-only sales aggregation over committed orders.
//!
//! ## Report Window
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    [start ──────────── end]   (closed interval)         │
//! │                                                                         │
//! │  totalRevenue       SUM(orders.total_amount)      0 when no orders      │
//! │  totalTransactions  COUNT(orders)                                       │
//! │  bestSeller         product with MAX(SUM(quantity)) over order lines    │
//! │                     zero value when no lines in the window              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! "Today" is the local calendar day of the serving process, widened to
//! nanosecond bounds (00:00:00.000000000 through 23:59:59.999999999) and
//! resolved to UTC for querying, since order timestamps are stored in UTC.
//!
//! ## Consistency
//! The aggregate queries run inside one read transaction, so a report is
//! computed against a single WAL snapshot: an in-flight checkout is either
//! entirely visible or entirely invisible, and the three numbers always
//! agree with each other. Reports never wait on the write lock.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use vela_core::{BestSeller, Money, SalesReport};

/// Repository for read-only sales report queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Computes the sales report for the closed interval `[start, end]`.
    pub async fn for_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DbResult<SalesReport> {
        debug!(%start, %end, "computing sales report");

        // One read transaction = one WAL snapshot for all three aggregates.
        let mut tx = self.pool.begin().await?;

        let (total_revenue, total_transactions) = sqlx::query_as::<_, (Money, i64)>(
            r#"
            SELECT COALESCE(SUM(total_amount), 0), COUNT(*)
            FROM orders
            WHERE created_at BETWEEN ?1 AND ?2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&mut *tx)
        .await?;

        // Ties on summed quantity break toward the lowest product id so the
        // report is deterministic.
        let best_seller = sqlx::query_as::<_, BestSeller>(
            r#"
            SELECT l.product_id, l.product_name, SUM(l.quantity) AS quantity
            FROM order_lines l
            JOIN orders o ON o.id = l.order_id
            WHERE o.created_at BETWEEN ?1 AND ?2
            GROUP BY l.product_id, l.product_name
            ORDER BY quantity DESC, l.product_id ASC
            LIMIT 1
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_optional(&mut *tx)
        .await?
        .unwrap_or_default();

        tx.commit().await?;

        Ok(SalesReport {
            total_revenue,
            total_transactions,
            best_seller,
        })
    }

    /// Computes the sales report for a span of local calendar dates.
    ///
    /// The window runs from the start of `start_date` to the end of
    /// `end_date`, both interpreted in the serving process's local time
    /// zone and resolved to UTC for querying.
    pub async fn for_dates(&self, start_date: NaiveDate, end_date: NaiveDate) -> DbResult<SalesReport> {
        let (start, _) = local_day_bounds(start_date);
        let (_, end) = local_day_bounds(end_date);
        self.for_range(start, end).await
    }

    /// Computes the sales report for the current local calendar day.
    pub async fn today(&self) -> DbResult<SalesReport> {
        let (start, end) = local_day_bounds(Local::now().date_naive());
        self.for_range(start, end).await
    }
}

/// Returns the UTC bounds of one local calendar day:
/// 00:00:00.000000000 through 23:59:59.999999999 local time.
pub fn local_day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(NaiveTime::MIN);
    let end = start + Duration::days(1) - Duration::nanoseconds(1);
    (local_to_utc(start), local_to_utc(end))
}

/// Resolves a local-naive timestamp to UTC.
///
/// An ambiguous local time (DST fold) takes the earlier instant; a local
/// time skipped by a DST gap falls back to reading the timestamp as UTC.
fn local_to_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    naive
        .and_local_timezone(Local)
        .earliest()
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

// =============================================================================
// Unit Tests
// =============================================================================
