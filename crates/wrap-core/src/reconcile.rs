//! # Import Reconciliation
//!
//! Decides whether an imported row updates an existing catalog entity or
//! creates a new one.
//!
//! ## Matching Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  imported row                                                           │
//! │       │                                                                 │
//! │       ├── id present AND known? ──────────► Existing (by Id)            │
//! │       │                                                                 │
//! │       ├── normalised name key known? ─────► Existing (by Name)          │
//! │       │     "VW  Golf" ≡ "vw-golf" ≡ "VWGolf"                            │
//! │       │                                                                 │
//! │       ├── same id or key as an earlier ───► SameAs (that row)           │
//! │       │   New row of this batch                                        │
//! │       │                                                                 │
//! │       └── otherwise ──────────────────────► New                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An unknown id is not an error: spreadsheets exported from another
//! installation carry foreign ids, so the name key gets a chance.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{Category, LaminationMaterial, PrintMaterial, Vehicle};

/// An entity that import rows can be matched against.
pub trait Reconcilable {
    /// The stored id. Empty for rows that carry none.
    fn entity_id(&self) -> &str;

    /// Human-facing identity, normalised with [`normalize_key`].
    fn match_key(&self) -> String;
}

/// Lower-cases and keeps only alphanumeric characters.
///
/// ## Example
/// ```rust
/// use wrap_core::reconcile::normalize_key;
///
/// assert_eq!(normalize_key(" Mercedes-Benz  Sprinter "), "mercedesbenzsprinter");
/// ```
pub fn normalize_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

impl Reconcilable for Vehicle {
    fn entity_id(&self) -> &str {
        &self.id
    }

    fn match_key(&self) -> String {
        let period = self.production_period.as_deref().unwrap_or_default();
        normalize_key(&format!("{}{}{}", self.manufacturer, self.model, period))
    }
}

impl Reconcilable for Category {
    fn entity_id(&self) -> &str {
        &self.id
    }

    fn match_key(&self) -> String {
        normalize_key(&self.name)
    }
}

impl Reconcilable for PrintMaterial {
    fn entity_id(&self) -> &str {
        &self.id
    }

    fn match_key(&self) -> String {
        normalize_key(&self.name)
    }
}

impl Reconcilable for LaminationMaterial {
    fn entity_id(&self) -> &str {
        &self.id
    }

    fn match_key(&self) -> String {
        normalize_key(&self.name)
    }
}

// =============================================================================
// Results
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchedBy {
    Id,
    Name,
}

/// Outcome for one imported row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RowMatch {
    /// Update the entity with this id.
    Existing { id: String, matched_by: MatchedBy },
    /// Insert as a new entity.
    New,
    /// Repeats the earlier `New` row at this index of the same batch.
    SameAs { row: usize, matched_by: MatchedBy },
}

impl RowMatch {
    pub fn existing_id(&self) -> Option<&str> {
        match self {
            RowMatch::Existing { id, .. } => Some(id),
            RowMatch::New | RowMatch::SameAs { .. } => None,
        }
    }
}

/// Per-row outcomes of an import, in row order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub matches: Vec<RowMatch>,
    pub matched: usize,
    pub created: usize,
    /// Rows folded into an earlier row of the same batch.
    pub merged: usize,
}

// =============================================================================
// Matching
// =============================================================================

/// Matches a single imported row against existing entities.
pub fn reconcile<T: Reconcilable>(row: &T, existing: &[T]) -> RowMatch {
    let row_id = row.entity_id().trim();
    if !row_id.is_empty() {
        if let Some(found) = existing.iter().find(|e| e.entity_id() == row_id) {
            return RowMatch::Existing {
                id: found.entity_id().to_string(),
                matched_by: MatchedBy::Id,
            };
        }
    }

    let key = row.match_key();
    if key.is_empty() {
        return RowMatch::New;
    }

    existing
        .iter()
        .find(|e| e.match_key() == key)
        .map_or(RowMatch::New, |found| RowMatch::Existing {
            id: found.entity_id().to_string(),
            matched_by: MatchedBy::Name,
        })
}

/// Matches every row and counts the outcome.
///
/// A row that matches nothing stored is also compared with the `New` rows
/// before it, so a batch never creates the same entity twice.
pub fn reconcile_all<T: Reconcilable>(rows: &[T], existing: &[T]) -> ReconcileReport {
    let mut report = ReconcileReport::default();
    // First New row of this batch per id and per name key
    let mut new_ids: HashMap<String, usize> = HashMap::new();
    let mut new_keys: HashMap<String, usize> = HashMap::new();

    for (index, row) in rows.iter().enumerate() {
        let id = row.entity_id().trim().to_string();
        let key = row.match_key();

        let decided = match reconcile(row, existing) {
            RowMatch::New => {
                let by_id = new_ids.get(&id).map(|&first| (first, MatchedBy::Id));
                let by_key = new_keys.get(&key).map(|&first| (first, MatchedBy::Name));
                match by_id.or(by_key) {
                    Some((first, matched_by)) => RowMatch::SameAs {
                        row: first,
                        matched_by,
                    },
                    None => {
                        if !id.is_empty() {
                            new_ids.insert(id, index);
                        }
                        if !key.is_empty() {
                            new_keys.insert(key, index);
                        }
                        RowMatch::New
                    }
                }
            }
            matched => matched,
        };

        match decided {
            RowMatch::Existing { .. } => report.matched += 1,
            RowMatch::New => report.created += 1,
            RowMatch::SameAs { .. } => report.merged += 1,
        }
        report.matches.push(decided);
    }

    report
}

// =============================================================================
// Unit Tests
// =============================================================================
