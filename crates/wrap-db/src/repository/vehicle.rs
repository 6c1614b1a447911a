//! # Vehicle Repository
//!
//! Vehicles together with their coverages and extra options.
//!
//! ## Variant Storage
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  vehicles                coverages / extra_options                     │
//! │  ┌──────────────┐        ┌────────────┬──────┬───────┬──────────┐      │
//! │  │ id = golf    │◄───────│ vehicle_id │ id   │ price │ position │      │
//! │  │ Volkswagen   │        │ golf       │ full │ 1000  │ 0        │      │
//! │  │ Golf         │        │ golf       │ half │  600  │ 1        │      │
//! │  └──────────────┘        └────────────┴──────┴───────┴──────────┘      │
//! │                                                                         │
//! │  upsert(vehicle) = one transaction:                                    │
//! │    1. INSERT .. ON CONFLICT(id) DO UPDATE   (vehicle row)              │
//! │    2. DELETE variants of this vehicle                                  │
//! │    3. INSERT variants with position = index in the vehicle's list      │
//! │                                                                         │
//! │  A reader never sees a vehicle with half of its variants.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use wrap_core::validation::validate_vehicle;
use wrap_core::{Amount, Coverage, ExtraOption, Vehicle};

use crate::error::{DbError, DbResult};

#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    id: String,
    manufacturer: String,
    model: String,
    category_id: Option<String>,
    production_period: Option<String>,
}

/// A coverage or extra option row; both tables share the shape.
#[derive(Debug, sqlx::FromRow)]
struct VariantRow {
    vehicle_id: String,
    id: String,
    name: String,
    price: f64,
}

impl VehicleRow {
    fn into_vehicle(self, coverages: Vec<Coverage>, extra_options: Vec<ExtraOption>) -> Vehicle {
        Vehicle {
            id: self.id,
            manufacturer: self.manufacturer,
            model: self.model,
            category_id: self.category_id,
            production_period: self.production_period,
            coverages,
            extra_options,
        }
    }
}

/// Groups variant rows by vehicle, keeping row order.
fn group_variants<T>(
    rows: Vec<VariantRow>,
    build: impl Fn(VariantRow) -> T,
) -> HashMap<String, Vec<T>> {
    let mut grouped: HashMap<String, Vec<T>> = HashMap::new();
    for row in rows {
        grouped
            .entry(row.vehicle_id.clone())
            .or_default()
            .push(build(row));
    }
    grouped
}

fn to_coverage(row: VariantRow) -> Coverage {
    Coverage::new(row.id, row.name, Amount::new(row.price))
}

fn to_extra_option(row: VariantRow) -> ExtraOption {
    ExtraOption::new(row.id, row.name, Amount::new(row.price))
}

/// Writes one already validated vehicle on `conn`, replacing its variants.
///
/// Callers run this inside a transaction.
pub(crate) async fn write_vehicle(
    conn: &mut SqliteConnection,
    vehicle: &Vehicle,
    now: DateTime<Utc>,
) -> DbResult<()> {
    debug!(
        id = %vehicle.id,
        coverages = vehicle.coverages.len(),
        extra_options = vehicle.extra_options.len(),
        "Upserting vehicle"
    );

    sqlx::query(
        r#"
        INSERT INTO vehicles (
            id, manufacturer, model, category_id, production_period,
            created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
        ON CONFLICT(id) DO UPDATE SET
            manufacturer = excluded.manufacturer,
            model = excluded.model,
            category_id = excluded.category_id,
            production_period = excluded.production_period,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(&vehicle.id)
    .bind(vehicle.manufacturer.trim())
    .bind(vehicle.model.trim())
    .bind(&vehicle.category_id)
    .bind(&vehicle.production_period)
    .bind(now)
    .execute(&mut *conn)
    .await
    .map_err(|err| match (DbError::from(err), &vehicle.category_id) {
        (DbError::ConstraintViolation { .. }, Some(category_id)) => DbError::UnknownCategory {
            vehicle_id: vehicle.id.clone(),
            category_id: category_id.clone(),
        },
        (other, _) => other,
    })?;

    sqlx::query("DELETE FROM coverages WHERE vehicle_id = ?1")
        .bind(&vehicle.id)
        .execute(&mut *conn)
        .await?;

    sqlx::query("DELETE FROM extra_options WHERE vehicle_id = ?1")
        .bind(&vehicle.id)
        .execute(&mut *conn)
        .await?;

    for (position, coverage) in vehicle.coverages.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO coverages (vehicle_id, id, name, price, position)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&vehicle.id)
        .bind(&coverage.id)
        .bind(coverage.name.trim())
        .bind(coverage.price.value())
        .bind(position as i64)
        .execute(&mut *conn)
        .await?;
    }

    for (position, option) in vehicle.extra_options.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO extra_options (vehicle_id, id, name, price, position)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&vehicle.id)
        .bind(&option.id)
        .bind(option.name.trim())
        .bind(option.price.value())
        .bind(position as i64)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

/// Repository for vehicle operations.
#[derive(Debug, Clone)]
pub struct VehicleRepository {
    pool: SqlitePool,
}

impl VehicleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        VehicleRepository { pool }
    }

    /// Lists all vehicles with their variants, by manufacturer and model.
    ///
    /// Three queries regardless of catalog size.
    pub async fn list(&self) -> DbResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT id, manufacturer, model, category_id, production_period
            FROM vehicles
            ORDER BY manufacturer, model, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let coverages = sqlx::query_as::<_, VariantRow>(
            "SELECT vehicle_id, id, name, price FROM coverages ORDER BY vehicle_id, position",
        )
        .fetch_all(&self.pool)
        .await?;

        let extra_options = sqlx::query_as::<_, VariantRow>(
            "SELECT vehicle_id, id, name, price FROM extra_options ORDER BY vehicle_id, position",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut coverages = group_variants(coverages, to_coverage);
        let mut extra_options = group_variants(extra_options, to_extra_option);

        let vehicles: Vec<Vehicle> = vehicles
            .into_iter()
            .map(|row| {
                let covs = coverages.remove(&row.id).unwrap_or_default();
                let opts = extra_options.remove(&row.id).unwrap_or_default();
                row.into_vehicle(covs, opts)
            })
            .collect();

        debug!(count = vehicles.len(), "Listed vehicles");
        Ok(vehicles)
    }

    /// Gets a vehicle and its variants.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT id, manufacturer, model, category_id, production_period
            FROM vehicles
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let coverages = sqlx::query_as::<_, VariantRow>(
            "SELECT vehicle_id, id, name, price FROM coverages WHERE vehicle_id = ?1 ORDER BY position",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let extra_options = sqlx::query_as::<_, VariantRow>(
            "SELECT vehicle_id, id, name, price FROM extra_options WHERE vehicle_id = ?1 ORDER BY position",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(row.into_vehicle(
            coverages.into_iter().map(to_coverage).collect(),
            extra_options.into_iter().map(to_extra_option).collect(),
        )))
    }

    /// Inserts the vehicle or replaces the stored one, variants included.
    ///
    /// ## Returns
    /// * `Err(DbError::Validation)` - Vehicle breaks a catalog rule
    /// * `Err(DbError::UnknownCategory)` - `category_id` is not stored
    pub async fn upsert(&self, vehicle: &Vehicle) -> DbResult<()> {
        validate_vehicle(vehicle)?;

        let mut tx = self.pool.begin().await?;
        write_vehicle(&mut *tx, vehicle, Utc::now()).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Deletes a vehicle; its variants go with it.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting vehicle");

        let result = sqlx::query("DELETE FROM vehicles WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Vehicle", id));
        }

        Ok(())
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vehicles")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
