//! # Category Repository
//!
//! Plain field-by-field CRUD for categories. Thin pass-through accessor;
//! no business logic lives here.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use vela_core::{Category, CategoryInput};

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists all categories ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Gets a category by its id.
    pub async fn get(&self, id: i64) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Inserts a new category and returns it with its assigned id.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - Category name already exists
    pub async fn insert(&self, input: &CategoryInput) -> DbResult<Category> {
        debug!(name = %input.name, "inserting category");

        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description)
            VALUES (?1, ?2)
            RETURNING id, name, description
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    /// Updates an existing category.
    pub async fn update(&self, id: i64, input: &CategoryInput) -> DbResult<Category> {
        debug!(id, "updating category");

        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories SET name = ?2, description = ?3
            WHERE id = ?1
            RETURNING id, name, description
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("category", id))?;

        Ok(category)
    }

    /// Deletes a category. Products keep existing with a cleared category.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "deleting category");

        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("category", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn input(name: &str, description: &str) -> CategoryInput {
        CategoryInput {
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn test_crud_roundtrip() {
        let db = test_db().await;
        let repo = db.categories();

        let created = repo.insert(&input("Beverages", "Various drinks")).await.unwrap();
        assert_eq!(created.name, "Beverages");

        let fetched = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.description, "Various drinks");

        let updated = repo
            .update(created.id, &input("Drinks", "Hot and cold"))
            .await
            .unwrap();
        assert_eq!(updated.name, "Drinks");

        repo.delete(created.id).await.unwrap();
        assert!(repo.get(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let db = test_db().await;
        let repo = db.categories();

        repo.insert(&input("Food", "")).await.unwrap();
        let dup = repo.insert(&input("Food", "again")).await;

        assert!(matches!(dup, Err(DbError::UniqueViolation { .. })));
    }

    #[tokio::test]
    async fn test_deleting_category_clears_product_reference() {
        use vela_core::{Money, ProductInput};

        let db = test_db().await;

        let category = db.categories().insert(&input("Food", "")).await.unwrap();
        let product = db
            .products()
            .insert(&ProductInput {
                name: "Roti Bakar".to_string(),
                price: Money::from_minor(12000),
                stock: 50,
                category_id: Some(category.id),
            })
            .await
            .unwrap();

        db.categories().delete(category.id).await.unwrap();

        let product = db.products().get(product.id).await.unwrap().unwrap();
        assert_eq!(product.category_id, None);
    }
}
