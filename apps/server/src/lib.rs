//! # vela-server: HTTP API for Vela POS
//!
//! A thin axum routing layer over the vela-db repositories.
//!
//! ## Request Flow
//! ```text
//! HTTP request
//!      │
//!      ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 vela-server (THIS CRATE)                     │
//! │                                                              │
//! │   routes    decode JSON / query params, dispatch             │
//! │   error     ApiError: status code + {code, message} body     │
//! │   config    env vars with defaults (PORT, DATABASE_PATH, …)  │
//! └──────────────────────────────────────────────────────────────┘
//!      │
//!      ▼
//! vela-db repositories (checkout, reports, product/category CRUD)
//! ```
//!
//! The library target exists so integration tests can build the router
//! and drive it in-process; the binary in `main.rs` is the real server.

pub mod config;
pub mod error;
pub mod routes;

pub use routes::app;
