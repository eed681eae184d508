//! Product CRUD endpoints.
//!
//! Thin pass-through to [`vela_db::ProductRepository`]. Stock-safe mutation
//! during a sale goes through `POST /transactions`, never through here.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use vela_core::validation::validate_product_input;
use vela_core::{Product, ProductInput};
use vela_db::Database;

use crate::error::ApiError;

/// Query parameters for `GET /products`.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Optional case-insensitive substring filter on the product name.
    pub name: Option<String>,
}

/// `GET /products` - list products, optionally filtered by name.
pub async fn list(
    State(db): State<Database>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = db.products().list(params.name.as_deref()).await?;
    Ok(Json(products))
}

/// `GET /products/:id` - fetch one product.
pub async fn get_one(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, ApiError> {
    let product = db
        .products()
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("product", id))?;
    Ok(Json(product))
}

/// `POST /products` - create a product.
pub async fn create(
    State(db): State<Database>,
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    validate_product_input(&input)?;
    let product = db.products().insert(&input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /products/:id` - update a product field by field.
pub async fn update(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>, ApiError> {
    validate_product_input(&input)?;
    let product = db.products().update(id, &input).await?;
    Ok(Json(product))
}

/// `DELETE /products/:id` - delete a product.
pub async fn remove(State(db): State<Database>, Path(id): Path<i64>) -> Result<StatusCode, ApiError> {
    db.products().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
