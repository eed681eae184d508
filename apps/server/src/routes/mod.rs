//! # Routes Module
//!
//! HTTP surface of Vela POS.
//!
//! ## Endpoints
//! ```text
//! GET    /                   service banner
//! GET    /health             liveness + database ping
//!
//! GET    /products           list (optional ?name= filter)
//! POST   /products           create
//! GET    /products/:id       fetch one
//! PUT    /products/:id       update
//! DELETE /products/:id       delete
//!
//! GET    /categories         list
//! POST   /categories         create
//! GET    /categories/:id     fetch one
//! PUT    /categories/:id     update
//! DELETE /categories/:id     delete
//!
//! POST   /transactions       checkout (the atomic order commit)
//!
//! GET    /reports            ?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD
//! GET    /reports/today      convenience window for the local day
//! ```
//!
//! Handlers decode the request, call one repository method and encode the
//! result. Anything smarter than that belongs in vela-core or vela-db.

use axum::routing::{get, post};
use axum::Router;

use vela_db::Database;

pub mod categories;
pub mod products;
pub mod reports;
pub mod system;
pub mod transactions;

/// Builds the application router with all routes attached.
pub fn app(db: Database) -> Router {
    Router::new()
        .route("/", get(system::index))
        .route("/health", get(system::health))
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/:id",
            get(products::get_one)
                .put(products::update)
                .delete(products::remove),
        )
        .route("/categories", get(categories::list).post(categories::create))
        .route(
            "/categories/:id",
            get(categories::get_one)
                .put(categories::update)
                .delete(categories::remove),
        )
        .route("/transactions", post(transactions::checkout))
        .route("/reports", get(reports::by_date_range))
        .route("/reports/today", get(reports::today))
        .with_state(db)
}
