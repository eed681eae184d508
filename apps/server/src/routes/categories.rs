//! Category CRUD endpoints.
//!
//! Same shape as the product endpoints, over categories.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use vela_core::validation::validate_category_input;
use vela_core::{Category, CategoryInput};
use vela_db::Database;

use crate::error::ApiError;

/// `GET /categories` - list all categories.
pub async fn list(State(db): State<Database>) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = db.categories().list().await?;
    Ok(Json(categories))
}

/// `GET /categories/:id` - fetch one category.
pub async fn get_one(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<Category>, ApiError> {
    let category = db
        .categories()
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("category", id))?;
    Ok(Json(category))
}

/// `POST /categories` - create a category.
pub async fn create(
    State(db): State<Database>,
    Json(input): Json<CategoryInput>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    validate_category_input(&input)?;
    let category = db.categories().insert(&input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// `PUT /categories/:id` - update a category.
pub async fn update(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(input): Json<CategoryInput>,
) -> Result<Json<Category>, ApiError> {
    validate_category_input(&input)?;
    let category = db.categories().update(id, &input).await?;
    Ok(Json(category))
}

/// `DELETE /categories/:id` - delete a category.
pub async fn remove(State(db): State<Database>, Path(id): Path<i64>) -> Result<StatusCode, ApiError> {
    db.categories().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
