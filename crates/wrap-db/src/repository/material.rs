//! # Material Repository
//!
//! Print and lamination materials. Both are global to the catalog and
//! priced by [`CalculationMode`] + value; print materials also decide
//! whether white print may be charged.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use wrap_core::validation::{validate_lamination_material, validate_print_material};
use wrap_core::{CalculationMode, LaminationMaterial, PrintMaterial};

use crate::error::{DbError, DbResult};

#[derive(Debug, sqlx::FromRow)]
struct PrintMaterialRow {
    id: String,
    name: String,
    mode: CalculationMode,
    value: f64,
    allows_white_print: bool,
}

impl From<PrintMaterialRow> for PrintMaterial {
    fn from(row: PrintMaterialRow) -> Self {
        PrintMaterial::new(row.id, row.name, row.mode, row.value)
            .with_white_print(row.allows_white_print)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LaminationMaterialRow {
    id: String,
    name: String,
    mode: CalculationMode,
    value: f64,
}

impl From<LaminationMaterialRow> for LaminationMaterial {
    fn from(row: LaminationMaterialRow) -> Self {
        LaminationMaterial::new(row.id, row.name, row.mode, row.value)
    }
}

/// Writes one already validated print material on `conn`.
pub(crate) async fn write_print_material(
    conn: &mut SqliteConnection,
    material: &PrintMaterial,
    now: DateTime<Utc>,
) -> DbResult<()> {
    debug!(id = %material.id, mode = ?material.mode, value = material.value, "Upserting print material");

    sqlx::query(
        r#"
        INSERT INTO print_materials (
            id, name, mode, value, allows_white_print, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
        ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            mode = excluded.mode,
            value = excluded.value,
            allows_white_print = excluded.allows_white_print,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(&material.id)
    .bind(material.name.trim())
    .bind(material.mode)
    .bind(material.value)
    .bind(material.allows_white_print)
    .bind(now)
    .execute(conn)
    .await?;

    Ok(())
}

/// Writes one already validated lamination material on `conn`.
pub(crate) async fn write_lamination_material(
    conn: &mut SqliteConnection,
    material: &LaminationMaterial,
    now: DateTime<Utc>,
) -> DbResult<()> {
    debug!(id = %material.id, mode = ?material.mode, value = material.value, "Upserting lamination material");

    sqlx::query(
        r#"
        INSERT INTO lamination_materials (id, name, mode, value, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?5)
        ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            mode = excluded.mode,
            value = excluded.value,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(&material.id)
    .bind(material.name.trim())
    .bind(material.mode)
    .bind(material.value)
    .bind(now)
    .execute(conn)
    .await?;

    Ok(())
}

/// Repository for print and lamination materials.
#[derive(Debug, Clone)]
pub struct MaterialRepository {
    pool: SqlitePool,
}

impl MaterialRepository {
    pub fn new(pool: SqlitePool) -> Self {
        MaterialRepository { pool }
    }

    // =========================================================================
    // Print materials
    // =========================================================================

    pub async fn list_print(&self) -> DbResult<Vec<PrintMaterial>> {
        let rows = sqlx::query_as::<_, PrintMaterialRow>(
            r#"
            SELECT id, name, mode, value, allows_white_print
            FROM print_materials
            ORDER BY name, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PrintMaterial::from).collect())
    }

    pub async fn get_print(&self, id: &str) -> DbResult<Option<PrintMaterial>> {
        let row = sqlx::query_as::<_, PrintMaterialRow>(
            r#"
            SELECT id, name, mode, value, allows_white_print
            FROM print_materials
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PrintMaterial::from))
    }

    pub async fn upsert_print(&self, material: &PrintMaterial) -> DbResult<()> {
        validate_print_material(material)?;

        let mut conn = self.pool.acquire().await?;
        write_print_material(&mut *conn, material, Utc::now()).await
    }

    pub async fn delete_print(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting print material");

        let result = sqlx::query("DELETE FROM print_materials WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("PrintMaterial", id));
        }

        Ok(())
    }

    pub async fn count_print(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM print_materials")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Lamination materials
    // =========================================================================

    pub async fn list_lamination(&self) -> DbResult<Vec<LaminationMaterial>> {
        let rows = sqlx::query_as::<_, LaminationMaterialRow>(
            "SELECT id, name, mode, value FROM lamination_materials ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(LaminationMaterial::from).collect())
    }

    pub async fn get_lamination(&self, id: &str) -> DbResult<Option<LaminationMaterial>> {
        let row = sqlx::query_as::<_, LaminationMaterialRow>(
            "SELECT id, name, mode, value FROM lamination_materials WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(LaminationMaterial::from))
    }

    pub async fn upsert_lamination(&self, material: &LaminationMaterial) -> DbResult<()> {
        validate_lamination_material(material)?;

        let mut conn = self.pool.acquire().await?;
        write_lamination_material(&mut *conn, material, Utc::now()).await
    }

    pub async fn delete_lamination(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting lamination material");

        let result = sqlx::query("DELETE FROM lamination_materials WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("LaminationMaterial", id));
        }

        Ok(())
    }

    pub async fn count_lamination(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lamination_materials")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
