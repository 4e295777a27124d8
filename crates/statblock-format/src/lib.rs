//! Ability formatting into character sheet markup.
//!
//! Each ability is rendered as `Name. Description` (or the description alone
//! for unnamed abilities), then spell references and roll expressions are
//! converted:
//!
//! 1. `{{spell:Name}}` becomes `[spell]Name[/spell]` (see `statblock-spells`)
//! 2. `damage: 2d6+3` becomes a `[rollable]` fragment (see `statblock-dice`)
//!
//! Formatted abilities are joined with blank lines.
//!
//! # Example
//!
//! ```
//! use statblock_format::format_abilities;
//! use statblock_parser::{Ability, AbilityCategory};
//! use statblock_spells::SpellBook;
//!
//! let abilities = [Ability::named(
//!     "Darkvision",
//!     "You can see in dim light within 60 feet.",
//!     AbilityCategory::Trait,
//! )];
//! let formatted = format_abilities(&abilities, &SpellBook::new()).unwrap();
//! assert_eq!(formatted.text, "Darkvision. You can see in dim light within 60 feet.");
//! ```

mod error;
mod formatter;

pub use error::FormatError;
pub use formatter::{AbilityFormatter, CategoryOutput, FormattedAbilities, format_abilities};
