//! # Database Error Types
//!
//! Errors raised by the catalog store.
//!
//! ```text
//! sqlx::Error ──────────────┐
//! MigrateError ─────────────┼──► DbError ──► AppError (quote-cli)
//! ValidationError (core) ───┘
//! ```
//!
//! Every write validates first, so a constraint failure from SQLite means
//! the row passed validation but refers to something that is not stored.

use thiserror::Error;
use wrap_core::ValidationError;

/// Catalog store errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// No row with this id (delete of an unknown entity).
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A vehicle names a category that is not stored.
    #[error("Vehicle {vehicle_id} refers to unknown category {category_id}")]
    UnknownCategory {
        vehicle_id: String,
        category_id: String,
    },

    /// Any other FOREIGN KEY or CHECK failure reported by SQLite.
    #[error("Constraint violation: {message}")]
    ConstraintViolation { message: String },

    /// Rejected by `wrap_core::validation` before reaching SQLite.
    #[error("Invalid entity: {0}")]
    Validation(#[from] ValidationError),

    /// The database file could not be opened or created.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Timed out waiting for a pooled connection.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// ```text
/// Database("FOREIGN KEY constraint failed") → ConstraintViolation
/// Database("CHECK constraint failed: ..")   → ConstraintViolation
/// Database(other)                           → QueryFailed
/// PoolTimedOut                              → PoolExhausted
/// PoolClosed                                → ConnectionFailed
/// other                                     → Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();
                if msg.contains("FOREIGN KEY constraint failed")
                    || msg.contains("CHECK constraint failed")
                {
                    DbError::ConstraintViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = DbError::UnknownCategory {
            vehicle_id: "transit".to_string(),
            category_id: "van".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Vehicle transit refers to unknown category van"
        );
        assert_eq!(
            DbError::not_found("Vehicle", "golf").to_string(),
            "Vehicle not found: golf"
        );
    }

    #[test]
    fn test_pool_errors() {
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));
    }
}
