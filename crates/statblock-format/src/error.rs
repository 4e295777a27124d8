//! Error types for ability formatting.

use statblock_dice::DiceError;
use statblock_parser::AbilityCategory;

/// Formatting of an ability batch stopped at a dice error.
///
/// Warnings collected up to the failure, including those of the failing
/// ability's spell references, are kept so they can still be reported.
#[derive(Debug, thiserror::Error)]
#[error("{category} ability {ability:?}: {source}")]
pub struct FormatError {
    /// Category of the failing ability.
    pub category: AbilityCategory,
    /// Name of the failing ability (empty for unnamed abilities).
    pub ability: String,
    /// Warnings accumulated up to the failure.
    pub warnings: Vec<String>,
    /// Underlying dice error.
    pub source: DiceError,
}
