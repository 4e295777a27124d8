//! Spell dictionary and spell reference conversion.
//!
//! Ability text references spells as `{{spell:Name}}`. [`convert_spell_links`]
//! rewrites each reference to `[spell]Name[/spell]` and reports names missing
//! from the [`SpellBook`] as [`SpellWarning`]s.

mod book;
mod error;
mod linker;

pub use book::SpellBook;
pub use error::SpellError;
pub use linker::{SpellWarning, convert_spell_links};
