//! # Validation Module
//!
//! Business-rule checks for catalog entities.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end                                                    │
//! │  └── Immediate form feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Catalog store (wrap-db)                                      │
//! │  └── THIS MODULE: runs before every write                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: SQLite                                                       │
//! │  └── NOT NULL / CHECK / FOREIGN KEY constraints                        │
//! │                                                                         │
//! │  The pricing engine itself trusts the catalog it is given.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::amount::Amount;
use crate::error::ValidationError;
use crate::types::{Category, LaminationMaterial, PrintMaterial, Vehicle, WhitePrintSettings};
use crate::MAX_NAME_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a display name: required, at most [`MAX_NAME_LENGTH`] characters.
///
/// ## Example
/// ```rust
/// use wrap_core::validation::validate_name;
///
/// assert!(validate_name("model", "Sprinter").is_ok());
/// assert!(validate_name("model", "   ").is_err());
/// ```
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates an id: required, no surrounding whitespace.
pub fn validate_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() || id.trim() != id {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a rate or price value: finite and not negative.
///
/// ## Example
/// ```rust
/// use wrap_core::validation::validate_non_negative;
///
/// assert!(validate_non_negative("value", 0.0).is_ok());
/// assert!(validate_non_negative("value", -0.01).is_err());
/// assert!(validate_non_negative("value", f64::INFINITY).is_err());
/// ```
pub fn validate_non_negative(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    if value < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
            value,
        });
    }

    Ok(())
}

/// Validates a price.
pub fn validate_price(field: &str, price: Amount) -> ValidationResult<()> {
    validate_non_negative(field, price.value())
}

// =============================================================================
// Entity Validators
// =============================================================================

pub fn validate_category(category: &Category) -> ValidationResult<()> {
    validate_id("category.id", &category.id)?;
    validate_name("category.name", &category.name)
}

/// Validates a vehicle and its variants.
///
/// ## Rules
/// - manufacturer and model are required
/// - at least one coverage (a vehicle without coverage cannot be quoted)
/// - coverage ids unique, extra option ids unique
/// - every variant has a name and a non-negative price
pub fn validate_vehicle(vehicle: &Vehicle) -> ValidationResult<()> {
    validate_id("vehicle.id", &vehicle.id)?;
    validate_name("vehicle.manufacturer", &vehicle.manufacturer)?;
    validate_name("vehicle.model", &vehicle.model)?;

    if vehicle.coverages.is_empty() {
        return Err(ValidationError::Empty {
            field: "vehicle.coverages".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for coverage in &vehicle.coverages {
        validate_id("coverage.id", &coverage.id)?;
        validate_name("coverage.name", &coverage.name)?;
        validate_price("coverage.price", coverage.price)?;
        if !seen.insert(coverage.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "coverage.id".to_string(),
                value: coverage.id.clone(),
            });
        }
    }

    let mut seen = HashSet::new();
    for option in &vehicle.extra_options {
        validate_id("extra_option.id", &option.id)?;
        validate_name("extra_option.name", &option.name)?;
        validate_price("extra_option.price", option.price)?;
        if !seen.insert(option.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "extra_option.id".to_string(),
                value: option.id.clone(),
            });
        }
    }

    Ok(())
}

pub fn validate_print_material(material: &PrintMaterial) -> ValidationResult<()> {
    validate_id("print_material.id", &material.id)?;
    validate_name("print_material.name", &material.name)?;
    validate_non_negative("print_material.value", material.value)
}

pub fn validate_lamination_material(material: &LaminationMaterial) -> ValidationResult<()> {
    validate_id("lamination_material.id", &material.id)?;
    validate_name("lamination_material.name", &material.name)?;
    validate_non_negative("lamination_material.value", material.value)
}

pub fn validate_white_print(settings: &WhitePrintSettings) -> ValidationResult<()> {
    validate_non_negative("white_print.value", settings.value)
}

// =============================================================================
// Unit Tests
// =============================================================================
