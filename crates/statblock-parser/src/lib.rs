//! Markdown segmenter for character ability sheets.
//!
//! Recognizes a fixed markdown convention: level-2 headers name an ability
//! category, and each blank-line separated paragraph below is one ability,
//! optionally prefixed by a bold name.
//!
//! ```markdown
//! ## Actions
//!
//! **Bite.** Melee Weapon Attack: to hit: 1d20+4, reach 5 ft.
//!
//! **Claw**. Melee Weapon Attack: to hit: 1d20+4, reach 5 ft.
//! ```
//!
//! Headers other than `Traits`, `Actions`, `Bonus Actions` and `Reactions`
//! (case-insensitive) are ignored together with their content.
//!
//! # Example
//!
//! ```
//! use statblock_parser::{AbilityCategory, segment};
//!
//! let result = segment("## Traits\n\n**Darkvision.** You can see in the dark.");
//! let traits = result.abilities(AbilityCategory::Trait);
//! assert_eq!(traits[0].name(), Some("Darkvision"));
//! assert_eq!(traits[0].description(), "You can see in the dark.");
//! ```

mod ability;
mod segmenter;

pub use ability::{Ability, AbilityCategory, ParseResult};
pub use segmenter::{PlainParagraphs, Segmenter, segment};
