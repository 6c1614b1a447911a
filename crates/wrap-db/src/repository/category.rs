//! # Category Repository
//!
//! Vehicle categories ("Van", "Compact", ...). Deleting a category
//! leaves its vehicles uncategorised (`ON DELETE SET NULL`).

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use wrap_core::validation::validate_category;
use wrap_core::Category;

use crate::error::{DbError, DbResult};

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: String,
    name: String,
    description: Option<String>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            description: row.description,
        }
    }
}

/// Writes one already validated category on `conn`.
pub(crate) async fn write_category(
    conn: &mut SqliteConnection,
    category: &Category,
    now: DateTime<Utc>,
) -> DbResult<()> {
    debug!(id = %category.id, name = %category.name, "Upserting category");

    sqlx::query(
        r#"
        INSERT INTO categories (id, name, description, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?4)
        ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            description = excluded.description,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(&category.id)
    .bind(category.name.trim())
    .bind(&category.description)
    .bind(now)
    .execute(conn)
    .await?;

    Ok(())
}

/// Repository for category operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists all categories by name.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description FROM categories ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description FROM categories WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Category::from))
    }

    /// Inserts the category or replaces the stored one with the same id.
    pub async fn upsert(&self, category: &Category) -> DbResult<()> {
        validate_category(category)?;

        let mut conn = self.pool.acquire().await?;
        write_category(&mut *conn, category, Utc::now()).await
    }

    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting category");

        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(())
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
