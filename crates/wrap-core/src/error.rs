//! # Error Types
//!
//! Domain-specific error types for wrap-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  wrap-core errors (this file)                                          │
//! │  ├── SelectionError   - A selection does not resolve against a catalog │
//! │  ├── ValidationError  - A catalog entity breaks a business rule        │
//! │  └── CoreError        - Either of the above                            │
//! │                                                                         │
//! │  wrap-db errors (separate crate)                                       │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── AppError         - What the user sees (code + message)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## SelectionError in the UI
//! A `SelectionError` almost always means "the user is still choosing".
//! Front ends show a neutral placeholder instead of a total and do not
//! surface the raw message.

use std::fmt;

use thiserror::Error;

// =============================================================================
// Selection Error
// =============================================================================

/// Which reference of a selection failed to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionField {
    Vehicle,
    Coverage,
    /// The `index`-th requested extra option (in the selection's iteration order).
    ExtraOption { index: usize, id: String },
    PrintMaterial,
    LaminationMaterial,
}

impl fmt::Display for SelectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionField::Vehicle => write!(f, "vehicle"),
            SelectionField::Coverage => write!(f, "coverage"),
            SelectionField::ExtraOption { index, .. } => write!(f, "extraOption[{}]", index),
            SelectionField::PrintMaterial => write!(f, "printMaterial"),
            SelectionField::LaminationMaterial => write!(f, "laminationMaterial"),
        }
    }
}

/// Why the reference failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionErrorKind {
    /// The id does not exist (or not under the selected vehicle).
    NotFound,
    /// A required choice has not been made yet (draft selections only).
    Missing,
}

impl fmt::Display for SelectionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionErrorKind::NotFound => write!(f, "not found"),
            SelectionErrorKind::Missing => write!(f, "not selected"),
        }
    }
}

/// A selection that cannot be priced.
///
/// ## When This Occurs
/// - Coverage or extra option id is not one of the vehicle's own
/// - Print or lamination material id is absent from the catalog
/// - A draft selection is converted before every required field is set
///
/// No partial breakdown is ever returned alongside this error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} {kind}")]
pub struct SelectionError {
    pub kind: SelectionErrorKind,
    pub field: SelectionField,
}

impl SelectionError {
    /// Creates a NotFound error for the given field.
    pub fn not_found(field: SelectionField) -> Self {
        SelectionError {
            kind: SelectionErrorKind::NotFound,
            field,
        }
    }

    /// Creates a Missing error for the given field.
    pub fn missing(field: SelectionField) -> Self {
        SelectionError {
            kind: SelectionErrorKind::Missing,
            field,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Catalog entity validation errors.
///
/// Raised by the store before writing an entity, never by the pricing engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Amount or material value is below zero.
    #[error("{field} must not be negative (got {value})")]
    MustBeNonNegative { field: String, value: f64 },

    /// Amount or material value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Duplicate id inside one entity (e.g. two coverages with the same id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// A collection that needs at least one element is empty.
    #[error("{field} must contain at least one entry")]
    Empty { field: String },
}

// =============================================================================
// Core Error
// =============================================================================

/// Any wrap-core error.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid selection: {0}")]
    Selection(#[from] SelectionError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_error_messages() {
        let err = SelectionError::not_found(SelectionField::Coverage);
        assert_eq!(err.to_string(), "coverage not found");

        let err = SelectionError::not_found(SelectionField::ExtraOption {
            index: 2,
            id: "uv".to_string(),
        });
        assert_eq!(err.to_string(), "extraOption[2] not found");

        let err = SelectionError::missing(SelectionField::PrintMaterial);
        assert_eq!(err.to_string(), "printMaterial not selected");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBeNonNegative {
            field: "price".to_string(),
            value: -5.0,
        };
        assert_eq!(err.to_string(), "price must not be negative (got -5)");

        let err = ValidationError::Empty {
            field: "coverages".to_string(),
        };
        assert_eq!(err.to_string(), "coverages must contain at least one entry");
    }

    #[test]
    fn test_errors_convert_to_core_error() {
        let core: CoreError = SelectionError::not_found(SelectionField::Vehicle).into();
        assert!(matches!(core, CoreError::Selection(_)));

        let core: CoreError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert!(matches!(core, CoreError::Validation(_)));
    }
}
