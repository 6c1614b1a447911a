//! # Settings Repository
//!
//! The white-print surcharge lives in a single-row table seeded by the
//! initial migration with "percentage, 0" (no surcharge).

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, warn};

use wrap_core::validation::validate_white_print;
use wrap_core::{CalculationMode, WhitePrintSettings};

use crate::error::DbResult;

#[derive(Debug, sqlx::FromRow)]
struct WhitePrintRow {
    mode: CalculationMode,
    value: f64,
}

/// Writes the already validated white-print settings on `conn`.
pub(crate) async fn write_white_print(
    conn: &mut SqliteConnection,
    settings: &WhitePrintSettings,
    now: DateTime<Utc>,
) -> DbResult<()> {
    debug!(mode = ?settings.mode, value = settings.value, "Updating white print settings");

    sqlx::query(
        r#"
        INSERT INTO white_print_settings (id, mode, value, updated_at)
        VALUES (1, ?1, ?2, ?3)
        ON CONFLICT(id) DO UPDATE SET
            mode = excluded.mode,
            value = excluded.value,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(settings.mode)
    .bind(settings.value)
    .bind(now)
    .execute(conn)
    .await?;

    Ok(())
}

/// Repository for catalog-wide settings.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Returns the white-print settings, or the default if the row is gone.
    pub async fn white_print(&self) -> DbResult<WhitePrintSettings> {
        let row = sqlx::query_as::<_, WhitePrintRow>(
            "SELECT mode, value FROM white_print_settings WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(match row {
            Some(row) => WhitePrintSettings::new(row.mode, row.value),
            None => {
                warn!("White print settings row missing, using default");
                WhitePrintSettings::default()
            }
        })
    }

    pub async fn set_white_print(&self, settings: &WhitePrintSettings) -> DbResult<()> {
        validate_white_print(settings)?;

        let mut conn = self.pool.acquire().await?;
        write_white_print(&mut *conn, settings, Utc::now()).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_default_is_no_surcharge() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let settings = db.settings().white_print().await.unwrap();
        assert_eq!(settings, WhitePrintSettings::default());
    }

    #[tokio::test]
    async fn test_set_white_print() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.settings();

        repo.set_white_print(&WhitePrintSettings::new(CalculationMode::FixedAmount, 75.0))
            .await
            .unwrap();
        repo.set_white_print(&WhitePrintSettings::new(CalculationMode::Percentage, 12.5))
            .await
            .unwrap();

        let stored = repo.white_print().await.unwrap();
        assert_eq!(stored.mode, CalculationMode::Percentage);
        assert_eq!(stored.value, 12.5);

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM white_print_settings")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_missing_row_falls_back_to_default() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        sqlx::query("DELETE FROM white_print_settings")
            .execute(db.pool())
            .await
            .unwrap();

        assert_eq!(
            db.settings().white_print().await.unwrap(),
            WhitePrintSettings::default()
        );
        assert!(matches!(
            db.settings()
                .set_white_print(&WhitePrintSettings::new(CalculationMode::Percentage, f64::NAN))
                .await,
            Err(DbError::Validation(_))
        ));
    }
}
