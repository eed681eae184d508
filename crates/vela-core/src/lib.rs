//! # vela-core: Pure Business Logic for Vela POS
//!
//! This crate is the heart of Vela POS. It contains the domain model and
//! business rules as pure code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Vela POS Architecture                       │
//! │                                                                 │
//! │   HTTP client ──► apps/server (axum routing, JSON)              │
//! │                        │                                        │
//! │                        ▼                                        │
//! │             ★ vela-core (THIS CRATE) ★                          │
//! │     types • money • validation • errors                         │
//! │     NO I/O • NO DATABASE • NO NETWORK                           │
//! │                        │                                        │
//! │                        ▼                                        │
//! │   vela-db (SQLite): checkout engine, reports, repositories      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, OrderLine, SalesReport, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure**: every function is deterministic, same input = same output
//! 2. **Integer Money**: monetary values are i64 minor units, never floats
//! 3. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use vela_core::Money` instead of
// `use vela_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed in a single checkout request.
///
/// ## Business Reason
/// Prevents runaway requests and keeps a single checkout transaction short,
/// which matters because checkouts hold the stock write lock end to end.
pub const MAX_CHECKOUT_LINES: usize = 100;

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g. typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
