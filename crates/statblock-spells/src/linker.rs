//! `{{spell:Name}}` reference conversion.

use std::fmt::{self, Write as _};
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::SpellBook;

static SPELL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{spell:([^}]*)\}\}").unwrap());

/// Problem found with a spell reference.
///
/// References are converted regardless; warnings are for the author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpellWarning {
    /// `{{spell:}}` with nothing but whitespace inside.
    EmptyName,
    /// Name not present in the spell book (as written, trimmed).
    Unknown(String),
}

impl fmt::Display for SpellWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => f.write_str("Empty spell name in {{spell:}}"),
            Self::Unknown(name) => {
                f.write_str("Unknown spell: ")?;
                write_quoted(f, name)
            }
        }
    }
}

/// Write `s` in double quotes. Quotes, backslashes and non-printable
/// characters are escaped as `\n`, `\xHH`, `\uHHHH` or `\UHHHHHHHH`.
fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for ch in s.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\u{07}' => f.write_str("\\a")?,
            '\u{08}' => f.write_str("\\b")?,
            '\u{0C}' => f.write_str("\\f")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{0B}' => f.write_str("\\v")?,
            ch if is_printable(ch) => f.write_char(ch)?,
            ch if u32::from(ch) < 0x80 => write!(f, "\\x{:02x}", u32::from(ch))?,
            ch if u32::from(ch) < 0x1_0000 => write!(f, "\\u{:04x}", u32::from(ch))?,
            ch => write!(f, "\\U{:08x}", u32::from(ch))?,
        }
    }
    f.write_char('"')
}

/// Anything but control characters, whitespace other than the ASCII space,
/// and invisible format characters.
fn is_printable(ch: char) -> bool {
    if ch == ' ' {
        return true;
    }
    !(ch.is_control()
        || ch.is_whitespace()
        || matches!(
            ch,
            '\u{AD}'
                | '\u{200B}'..='\u{200F}'
                | '\u{202A}'..='\u{202E}'
                | '\u{2060}'..='\u{2064}'
                | '\u{FEFF}'
        ))
}

/// Convert `{{spell:Name}}` references to `[spell]Name[/spell]`.
///
/// Names are trimmed and keep their original casing. Every reference is
/// converted; names not found in `spells` produce a warning. Warnings are
/// returned in the order the references appear.
#[must_use]
pub fn convert_spell_links(text: &str, spells: &SpellBook) -> (String, Vec<SpellWarning>) {
    let mut warnings = Vec::new();

    let converted = SPELL_PATTERN.replace_all(text, |caps: &Captures<'_>| {
        let name = caps[1].trim();
        if !spells.contains(name) {
            warnings.push(if name.is_empty() {
                SpellWarning::EmptyName
            } else {
                SpellWarning::Unknown(name.to_owned())
            });
        }
        format!("[spell]{name}[/spell]")
    });

    (converted.into_owned(), warnings)
}
