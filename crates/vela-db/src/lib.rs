//! # vela-db: Database Layer for Vela POS
//!
//! This crate provides storage for the Vela POS system: SQLite via sqlx,
//! with embedded migrations and repository types per concern.
//!
//! ## Data Flow
//! ```text
//! HTTP handler (apps/server)
//!      │
//!      ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    vela-db (THIS CRATE)                      │
//! │                                                              │
//! │   Database (pool.rs)      repositories                       │
//! │   SqlitePool, WAL     ◄── ProductRepository   (plain CRUD)   │
//! │   busy_timeout            CategoryRepository  (plain CRUD)   │
//! │   migrations              CheckoutRepository  (transaction)  │
//! │                           ReportRepository    (aggregation)  │
//! └──────────────────────────────────────────────────────────────┘
//!      │
//!      ▼
//! SQLite database file (or :memory: for tests)
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Storage and checkout error types
//! - [`repository`] - Repository implementations

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

pub use error::{CheckoutError, DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::category::CategoryRepository;
pub use repository::checkout::CheckoutRepository;
pub use repository::product::ProductRepository;
pub use repository::report::ReportRepository;
