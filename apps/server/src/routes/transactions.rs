//! Checkout endpoint.
//!
//! The handler is deliberately a one-liner over the checkout engine:
//! locking, validation, rollback and commit all live in
//! [`vela_db::CheckoutRepository`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use vela_core::{CheckoutRequest, Order};
use vela_db::Database;

use crate::error::ApiError;

/// `POST /transactions` - commit a multi-item order atomically.
///
/// ## Responses
/// * `201` - The committed order with its lines
/// * `400` - Malformed request (empty items, non-positive quantity)
/// * `404` - A referenced product does not exist
/// * `409` - Insufficient stock for a line item
///
/// Any failure rolls back the whole attempt: no stock changes, no order.
pub async fn checkout(
    State(db): State<Database>,
    Json(request): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let order = db.checkout().checkout(&request).await?;
    Ok((StatusCode::CREATED, Json(order)))
}
