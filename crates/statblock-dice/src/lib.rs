//! Dice notation engine for character sheet markup.
//!
//! Parses and validates dice notation such as `2d6+3` or `d20`, and rewrites
//! roll expressions embedded in ability text into rollable markup:
//!
//! ```text
//! damage: 2d6+3
//!   -> [rollable]10(2d6+3);{"diceNotation":"2d6+3","rollType":"damage","rollAction":"Greatsword"}[/rollable]
//! ```
//!
//! # Example
//!
//! ```
//! use statblock_dice::{convert_rolls, normalize};
//!
//! assert_eq!(normalize("d20").unwrap(), "1d20");
//!
//! let text = convert_rolls("to hit: 1d20+5", "Longsword");
//! assert_eq!(
//!     text,
//!     r#"[rollable]+5;{"diceNotation":"1d20+5","rollType":"to hit","rollAction":"Longsword"}[/rollable]"#
//! );
//! ```

mod error;
mod notation;
mod rollable;

pub use error::DiceError;
pub use notation::{DiceNotation, VALID_SIDES};
pub use rollable::{ROLL_KEYWORDS, convert_rolls, render_rollable, try_convert_rolls};

/// Validate dice notation and return its canonical form.
///
/// The count is always made explicit (`d20` becomes `1d20`); the modifier is
/// kept exactly as written.
///
/// # Errors
///
/// Returns [`DiceError::InvalidFormat`] if the input does not match
/// `[count]d<sides>[(+|-)modifier]`, or [`DiceError::InvalidDiceType`] if the
/// die is not one of [`VALID_SIDES`].
pub fn normalize(notation: &str) -> Result<String, DiceError> {
    notation
        .parse::<DiceNotation>()
        .map(DiceNotation::into_string)
}
